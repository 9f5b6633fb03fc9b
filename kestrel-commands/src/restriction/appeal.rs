use std::collections::HashSet;

use poise::serenity_prelude as serenity;
use tracing::{error, warn};

use crate::CommandMeta;
use crate::embeds::{guild_only_message, usage_message};
use crate::restriction::checks::is_bot_owner;
use kestrel_core::{Context, Data, Error};
use kestrel_database::impls::appeals::cooldown_remaining;
use kestrel_database::impls::restrictions::lookup_active;
use kestrel_database::impls::staff;
use kestrel_database::model::restriction::RestrictionKind;
use kestrel_utils::embed::{DEFAULT_EMBED_COLOR, error_embed, info_embed};
use kestrel_utils::formatting::format_compact_duration;

pub const META: CommandMeta = CommandMeta {
    name: "appeal",
    desc: "Appeal your command ban to the bot staff.",
    category: "restriction",
    usage: "k!appeal <reason>",
};

pub const APPEAL_EMBED_TITLE: &str = "Command Ban Appeal";

pub const APPROVE_EMOJI: &str = "\u{2705}";
pub const DENY_EMOJI: &str = "\u{274C}";

/// The `(user, guild)` pair recovered from an appeal notification embed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppealRef {
    pub user_id: u64,
    pub guild_id: u64,
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn appeal(
    ctx: Context<'_>,
    #[description = "Why your ban should be lifted"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let Some(reason) = reason.as_deref().map(str::trim).filter(|reason| !reason.is_empty())
    else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let data = ctx.data();
    let user_id = ctx.author().id.get();

    let restriction = lookup_active(&data.db, guild_id.get(), user_id).await?;
    let banned = restriction
        .as_ref()
        .is_some_and(|record| record.kind == RestrictionKind::Ban);
    if !banned {
        ctx.send(
            poise::CreateReply::default()
                .ephemeral(true)
                .embed(error_embed(
                    "No Ban Found",
                    "You are not currently banned from using commands.",
                )),
        )
        .await?;
        return Ok(());
    }

    if let Some(remaining) = cooldown_remaining(&data.db, guild_id.get(), user_id).await? {
        ctx.send(
            poise::CreateReply::default()
                .ephemeral(true)
                .embed(error_embed(
                    "Appeal Cooldown",
                    format!(
                        "Your last appeal was denied. You can appeal again in {}.",
                        format_compact_duration(remaining)
                    ),
                )),
        )
        .await?;
        return Ok(());
    }

    ctx.send(
        poise::CreateReply::default()
            .ephemeral(true)
            .embed(info_embed(
                "Appeal Submitted",
                format!(
                    "Your appeal has been submitted with reason: {}\nA staff member will review your case.",
                    reason
                ),
            )),
    )
    .await?;

    let guild_name = match guild_id.to_partial_guild(ctx.http()).await {
        Ok(guild) => guild.name,
        Err(_) => format!("Server {}", guild_id.get()),
    };

    let embed = build_appeal_embed(
        ctx.author(),
        guild_id.get(),
        &guild_name,
        reason,
    );

    let notified = fan_out_to_staff(ctx.http(), data, embed).await;
    if notified == 0 {
        warn!(user_id, "appeal submitted but no staff member was reachable");
    }

    Ok(())
}

/// Build the staff notification. The adjudicating reaction handler recovers
/// the ids from the `User ID` / `Server ID` lines, so their format is load
/// bearing.
pub fn build_appeal_embed(
    user: &serenity::User,
    guild_id: u64,
    guild_name: &str,
    reason: &str,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(APPEAL_EMBED_TITLE)
        .description(format!(
            "**User:** <@{}> ({})\n**User ID:** {}\n**Server:** {}\n**Server ID:** {}\n**Reason:** {}\n\nReact with {} to approve or {} to deny the appeal.",
            user.id.get(),
            user.name,
            user.id.get(),
            guild_name,
            guild_id,
            reason.replace('@', "@\u{200B}"),
            APPROVE_EMOJI,
            DENY_EMOJI,
        ))
}

/// Recover the appealing user and originating guild from a notification
/// embed. Returns `None` for embeds that aren't appeal notifications.
pub fn parse_appeal_embed(title: Option<&str>, description: Option<&str>) -> Option<AppealRef> {
    if title != Some(APPEAL_EMBED_TITLE) {
        return None;
    }

    let description = description?;
    let mut user_id = None;
    let mut guild_id = None;

    for line in description.lines() {
        if let Some(rest) = line.strip_prefix("**User ID:**") {
            user_id = rest.trim().parse::<u64>().ok();
        } else if let Some(rest) = line.strip_prefix("**Server ID:**") {
            guild_id = rest.trim().parse::<u64>().ok();
        }
    }

    match (user_id, guild_id) {
        (Some(user_id), Some(guild_id)) => Some(AppealRef { user_id, guild_id }),
        _ => None,
    }
}

/// DM every reachable owner and admin, seeding the adjudication reactions.
/// Returns how many staff members received the notification.
async fn fan_out_to_staff(
    http: &serenity::Http,
    data: &Data,
    embed: serenity::CreateEmbed,
) -> usize {
    let mut recipients: HashSet<u64> = data.owner_ids.iter().copied().collect();

    match staff::list_owners(&data.db).await {
        Ok(entries) => recipients.extend(entries.iter().map(|entry| entry.user_id)),
        Err(source) => error!(?source, "failed to load bot owners for appeal fan-out"),
    }
    match staff::list_admins(&data.db).await {
        Ok(entries) => recipients.extend(entries.iter().map(|entry| entry.user_id)),
        Err(source) => error!(?source, "failed to load bot admins for appeal fan-out"),
    }

    let mut notified = 0;
    for recipient in recipients {
        let user = match http.get_user(serenity::UserId::new(recipient)).await {
            Ok(user) => user,
            Err(_) => continue,
        };

        let dm_channel = match user.create_dm_channel(http).await {
            Ok(channel) => channel,
            Err(_) => continue,
        };

        let message = match dm_channel
            .send_message(http, serenity::CreateMessage::new().embed(embed.clone()))
            .await
        {
            Ok(message) => message,
            Err(_) => continue,
        };

        for emoji in [APPROVE_EMOJI, DENY_EMOJI] {
            if let Err(source) = message
                .react(http, serenity::ReactionType::Unicode(emoji.to_owned()))
                .await
            {
                warn!(?source, "failed to seed appeal reaction");
            }
        }

        notified += 1;
    }

    notified
}

/// Whether a user may adjudicate appeals.
pub async fn can_adjudicate(data: &Data, user_id: u64) -> anyhow::Result<bool> {
    if is_bot_owner(data, user_id).await? {
        return Ok(true);
    }
    staff::is_admin(&data.db, user_id).await
}

#[cfg(test)]
mod tests {
    use super::{APPEAL_EMBED_TITLE, AppealRef, parse_appeal_embed};

    fn description(user_id: &str, guild_id: &str) -> String {
        format!(
            "**User:** <@1> (someone)\n**User ID:** {}\n**Server:** Testing\n**Server ID:** {}\n**Reason:** please",
            user_id, guild_id
        )
    }

    #[test]
    fn parses_ids_from_notification() {
        let parsed = parse_appeal_embed(
            Some(APPEAL_EMBED_TITLE),
            Some(&description("123456789", "987654321")),
        );
        assert_eq!(
            parsed,
            Some(AppealRef {
                user_id: 123_456_789,
                guild_id: 987_654_321,
            })
        );
    }

    #[test]
    fn ignores_unrelated_embeds() {
        assert_eq!(
            parse_appeal_embed(Some("Welcome"), Some(&description("1", "2"))),
            None
        );
        assert_eq!(parse_appeal_embed(None, Some(&description("1", "2"))), None);
    }

    #[test]
    fn requires_both_ids() {
        let missing_guild = "**User ID:** 42\n**Reason:** please";
        assert_eq!(
            parse_appeal_embed(Some(APPEAL_EMBED_TITLE), Some(missing_guild)),
            None
        );
        assert_eq!(parse_appeal_embed(Some(APPEAL_EMBED_TITLE), None), None);
    }

    #[test]
    fn rejects_malformed_ids() {
        let parsed = parse_appeal_embed(
            Some(APPEAL_EMBED_TITLE),
            Some(&description("not-a-number", "2")),
        );
        assert_eq!(parsed, None);
    }
}
