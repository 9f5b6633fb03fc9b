use std::collections::HashMap;

use tokio::time::{Duration, sleep};
use tracing::warn;

use poise::serenity_prelude as serenity;

use crate::template::structure::{CategorySpec, ChannelKind, STAFF_ROLES, full_channel_name};

/// Pause between create calls so a big layout doesn't trip rate limits.
const CREATE_PACING: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
pub struct BuildReport {
    pub created_roles: usize,
    pub created_categories: usize,
    pub created_channels: usize,
    pub skipped_existing: usize,
    pub failures: Vec<String>,
}

impl BuildReport {
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "**Created :** {} categories, {} channels, {} roles",
            self.created_categories, self.created_channels, self.created_roles
        )];

        if self.skipped_existing > 0 {
            lines.push(format!(
                "**Skipped :** {} already existed",
                self.skipped_existing
            ));
        }

        if !self.failures.is_empty() {
            let mut failed = self.failures.clone();
            let overflow = failed.len().saturating_sub(10);
            failed.truncate(10);
            let mut failed_list = failed.join("\n");
            if overflow > 0 {
                failed_list.push_str(&format!("\n... and {} more", overflow));
            }
            lines.push(format!("**Failed :**\n{}", failed_list));
        }

        lines.join("\n")
    }
}

/// Create the staff role ladder, reusing roles that already exist by name.
/// Returns the name → id map used for permission overwrites.
pub async fn ensure_staff_roles(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    report: &mut BuildReport,
) -> anyhow::Result<HashMap<&'static str, serenity::RoleId>> {
    let existing = guild_id.roles(http).await?;
    let mut role_map = HashMap::new();

    for spec in STAFF_ROLES {
        if let Some(role) = existing.values().find(|role| role.name == spec.name) {
            role_map.insert(spec.name, role.id);
            report.skipped_existing += 1;
            continue;
        }

        let created = guild_id
            .create_role(
                http,
                serenity::EditRole::new()
                    .name(spec.name)
                    .colour(spec.color)
                    .permissions(spec.permissions)
                    .hoist(true)
                    .mentionable(false),
            )
            .await;

        match created {
            Ok(role) => {
                role_map.insert(spec.name, role.id);
                report.created_roles += 1;
            }
            Err(source) => {
                warn!(?source, role = spec.name, "failed to create template role");
                report.failures.push(format!("role {}", spec.name));
            }
        }

        sleep(CREATE_PACING).await;
    }

    Ok(role_map)
}

fn staff_overwrites(
    guild_id: serenity::GuildId,
    role_map: &HashMap<&'static str, serenity::RoleId>,
) -> Vec<serenity::PermissionOverwrite> {
    let mut overwrites = vec![serenity::PermissionOverwrite {
        allow: serenity::Permissions::empty(),
        deny: serenity::Permissions::VIEW_CHANNEL,
        // The @everyone role id equals the guild id.
        kind: serenity::PermissionOverwriteType::Role(serenity::RoleId::new(guild_id.get())),
    }];

    for role_id in role_map.values() {
        overwrites.push(serenity::PermissionOverwrite {
            allow: serenity::Permissions::VIEW_CHANNEL,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Role(*role_id),
        });
    }

    overwrites
}

/// Create the categories and channels of a plan, skipping anything that
/// already exists by name.
pub async fn apply_categories(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    categories: &[CategorySpec],
    role_map: &HashMap<&'static str, serenity::RoleId>,
    report: &mut BuildReport,
) -> anyhow::Result<()> {
    let existing = guild_id.channels(http).await?;

    for category_spec in categories {
        let category_id = match existing.values().find(|channel| {
            channel.kind == serenity::ChannelType::Category && channel.name == category_spec.name
        }) {
            Some(existing_category) => {
                report.skipped_existing += 1;
                existing_category.id
            }
            None => {
                let mut builder = serenity::CreateChannel::new(category_spec.name)
                    .kind(serenity::ChannelType::Category);
                if category_spec.staff_only {
                    builder = builder.permissions(staff_overwrites(guild_id, role_map));
                }

                match guild_id.create_channel(http, builder).await {
                    Ok(category) => {
                        report.created_categories += 1;
                        sleep(CREATE_PACING).await;
                        category.id
                    }
                    Err(source) => {
                        warn!(
                            ?source,
                            category = category_spec.name,
                            "failed to create template category"
                        );
                        report
                            .failures
                            .push(format!("category {}", category_spec.name));
                        continue;
                    }
                }
            }
        };

        for channel_spec in category_spec.channels {
            let full_name = full_channel_name(channel_spec);

            let already_there = existing.values().any(|channel| {
                channel.parent_id == Some(category_id) && channel.name == full_name
            });
            if already_there {
                report.skipped_existing += 1;
                continue;
            }

            let kind = match channel_spec.kind {
                ChannelKind::Text => serenity::ChannelType::Text,
                ChannelKind::Voice => serenity::ChannelType::Voice,
            };

            let mut builder = serenity::CreateChannel::new(full_name.clone())
                .kind(kind)
                .category(category_id);
            if category_spec.staff_only {
                builder = builder.permissions(staff_overwrites(guild_id, role_map));
            }

            if let Err(source) = guild_id.create_channel(http, builder).await {
                warn!(?source, channel = %full_name, "failed to create template channel");
                report.failures.push(format!("channel {}", full_name));
            } else {
                report.created_channels += 1;
            }

            sleep(CREATE_PACING).await;
        }
    }

    Ok(())
}
