use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, warn};

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use crate::moderation::logging::{LoggedAction, log_and_publish};
use crate::restriction::checks::is_bot_owner;
use kestrel_core::{Context, Error};
use kestrel_database::impls::app_settings::{WIPE_GLOBAL_SETTING, get_setting, set_setting};
use kestrel_database::impls::guild_flags::{WIPE_ENABLED_FLAG, get_flag, set_flag};
use kestrel_utils::confirmation::{prompt_confirm_decline, resolve_confirmation_result};
use kestrel_utils::embed::{error_embed, info_embed, success_embed};
use kestrel_utils::permissions::has_user_permission;

pub const WIPE_META: CommandMeta = CommandMeta {
    name: "wipe",
    desc: "Delete every channel, category and deletable role.",
    category: "template",
    usage: "k!wipe",
};

pub const WIPETOGGLE_META: CommandMeta = CommandMeta {
    name: "wipetoggle",
    desc: "Enable or disable the wipe command for this server.",
    category: "template",
    usage: "k!wipetoggle",
};

pub const WIPESTATUS_META: CommandMeta = CommandMeta {
    name: "wipestatus",
    desc: "Check whether the wipe command is enabled here.",
    category: "template",
    usage: "k!wipestatus",
};

pub const WIPEGLOBAL_META: CommandMeta = CommandMeta {
    name: "wipeglobal",
    desc: "Owner kill-switch for the wipe command everywhere.",
    category: "template",
    usage: "k!wipeglobal <on|off>",
};

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);
const DELETE_PACING: Duration = Duration::from_millis(300);

#[poise::command(prefix_command, slash_command, category = "Template")]
pub async fn wipe(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let db = &ctx.data().db;

    // Owner kill-switch beats everything, including guild administrators.
    let global_status = get_setting(db, WIPE_GLOBAL_SETTING).await?;
    if global_status.as_deref() == Some("off") {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Globally Disabled",
            "The wipe command is globally disabled by the bot owner.\nThis cannot be overridden by server administrators.",
        )))
        .await?;
        return Ok(());
    }

    if !get_flag(db, guild_id.get(), WIPE_ENABLED_FLAG).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Command Disabled",
            "The wipe command is disabled for this server.\nUse `k!wipetoggle` to enable it.",
        )))
        .await?;
        return Ok(());
    }

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::ADMINISTRATOR,
    )
    .await?
    {
        ctx.say("Only administrators can use this command.").await?;
        return Ok(());
    }

    let channels = guild_id.channels(ctx.http()).await?;
    let roles = guild_id.roles(ctx.http()).await?;

    let bot_member = guild_id.member(ctx.http(), ctx.framework().bot_id).await?;
    let bot_top_position = bot_member
        .roles
        .iter()
        .filter_map(|role_id| roles.get(role_id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0);

    let everyone_role_id = serenity::RoleId::new(guild_id.get());
    let deletable_roles: Vec<serenity::RoleId> = roles
        .values()
        .filter(|role| {
            role.id != everyone_role_id && !role.managed && role.position < bot_top_position
        })
        .map(|role| role.id)
        .collect();

    let category_count = channels
        .values()
        .filter(|channel| channel.kind == serenity::ChannelType::Category)
        .count();
    let channel_count = channels.len() - category_count;
    let total = channel_count + category_count + deletable_roles.len();

    let warning = info_embed(
        "Wipe This Server?",
        format!(
            "This will permanently delete:\n\n**{} channels**\n**{} categories**\n**{} roles** (excluding @everyone and managed roles)\n\n**Total: {} items.** This cannot be undone.",
            channel_count,
            category_count,
            deletable_roles.len(),
            total,
        ),
    );

    let confirmation = prompt_confirm_decline(ctx, "", warning, CONFIRM_TIMEOUT).await?;
    let confirmed = resolve_confirmation_result(
        ctx,
        confirmation,
        "Confirmation timed out. Wipe cancelled.",
        "Wipe cancelled.",
        "Wiping server...",
    )
    .await?;

    if confirmed.is_none() {
        return Ok(());
    }

    let mut deleted_channels = 0_usize;
    let mut deleted_categories = 0_usize;
    let mut deleted_roles = 0_usize;
    let mut failures: Vec<String> = Vec::new();

    let current_channel = ctx.channel_id();

    // Channels first, categories after, so categories empty out before
    // their own deletion. The invoking channel survives for the report.
    let mut ordered: Vec<&serenity::GuildChannel> = channels.values().collect();
    ordered.sort_by_key(|channel| channel.kind == serenity::ChannelType::Category);

    for channel in ordered {
        if channel.id == current_channel {
            continue;
        }

        let is_category = channel.kind == serenity::ChannelType::Category;
        if let Err(source) = channel.delete(ctx.http()).await {
            warn!(?source, channel = %channel.name, "failed to delete channel during wipe");
            failures.push(format!("#{}", channel.name));
        } else if is_category {
            deleted_categories += 1;
        } else {
            deleted_channels += 1;
        }

        sleep(DELETE_PACING).await;
    }

    for role_id in deletable_roles {
        if let Err(source) = guild_id.delete_role(ctx.http(), role_id).await {
            warn!(?source, role_id = role_id.get(), "failed to delete role during wipe");
            failures.push(format!("role {}", role_id.get()));
        } else {
            deleted_roles += 1;
        }

        sleep(DELETE_PACING).await;
    }

    if log_and_publish(
        &ctx,
        LoggedAction {
            guild_id: guild_id.get(),
            target_user_id: ctx.author().id.get(),
            moderator_user_id: ctx.author().id.get(),
            action: "wipe",
            reason: "Server wipe executed",
            duration_seconds: None,
        },
    )
    .await
    .is_none()
    {
        error!("failed to record wipe in moderation log");
    }

    let mut summary = format!(
        "Deleted **{}** items:\n\n**{}** channels\n**{}** categories\n**{}** roles",
        deleted_channels + deleted_categories + deleted_roles,
        deleted_channels,
        deleted_categories,
        deleted_roles,
    );

    if !failures.is_empty() {
        let overflow = failures.len().saturating_sub(10);
        failures.truncate(10);
        summary.push_str(&format!("\n\n**Failed to delete :**\n{}", failures.join("\n")));
        if overflow > 0 {
            summary.push_str(&format!("\n... and {} more", overflow));
        }
    }

    current_channel
        .send_message(
            ctx.http(),
            serenity::CreateMessage::new().embed(success_embed("Wipe Complete", summary)),
        )
        .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Template")]
pub async fn wipetoggle(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::ADMINISTRATOR,
    )
    .await?
    {
        return Ok(());
    }

    let db = &ctx.data().db;
    let enabled = !get_flag(db, guild_id.get(), WIPE_ENABLED_FLAG).await?;
    set_flag(
        db,
        guild_id.get(),
        WIPE_ENABLED_FLAG,
        enabled,
        ctx.author().id.get(),
    )
    .await?;

    let mut description = format!(
        "The wipe command has been **{}** for this server.",
        if enabled { "enabled" } else { "disabled" }
    );
    if enabled {
        description.push_str("\n\nWipe permanently deletes every channel and role. Use with extreme caution.");
    }

    ctx.send(
        poise::CreateReply::default().embed(success_embed(
            if enabled { "Wipe Enabled" } else { "Wipe Disabled" },
            description,
        )),
    )
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Template")]
pub async fn wipestatus(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::ADMINISTRATOR,
    )
    .await?
    {
        return Ok(());
    }

    let db = &ctx.data().db;
    let enabled = get_flag(db, guild_id.get(), WIPE_ENABLED_FLAG).await?;
    let global_off = get_setting(db, WIPE_GLOBAL_SETTING).await?.as_deref() == Some("off");

    let status = match (global_off, enabled) {
        (true, _) => "Globally disabled by the bot owner",
        (false, true) => "Enabled",
        (false, false) => "Disabled",
    };

    ctx.send(poise::CreateReply::default().embed(info_embed(
        "Wipe Status",
        format!("**Status :** {}\n\nUse `k!wipetoggle` to change the per-server setting.", status),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Template")]
pub async fn wipeglobal(
    ctx: Context<'_>,
    #[description = "on or off"] state: Option<String>,
) -> Result<(), Error> {
    if !is_bot_owner(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot owners can use this command.",
        )))
        .await?;
        return Ok(());
    }

    let db = &ctx.data().db;

    let value = match state.as_deref().map(str::trim) {
        Some("on") => "on",
        Some("off") => "off",
        _ => {
            let current = get_setting(db, WIPE_GLOBAL_SETTING)
                .await?
                .unwrap_or_else(|| "on".to_owned());
            ctx.say(format!(
                "Global wipe status is **{}**. Use `k!wipeglobal on|off` to change it.",
                current
            ))
            .await?;
            return Ok(());
        }
    };

    set_setting(db, WIPE_GLOBAL_SETTING, value, ctx.author().id.get()).await?;

    let description = if value == "on" {
        "The wipe command is globally enabled.\nServers still control it locally with `k!wipetoggle`."
    } else {
        "The wipe command is globally disabled.\nNo server can use it until re-enabled."
    };

    ctx.send(
        poise::CreateReply::default()
            .embed(success_embed("Global Wipe Status Updated", description)),
    )
    .await?;

    Ok(())
}
