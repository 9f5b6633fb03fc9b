use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::{
    moderation_self_action_message, send_moderation_target_dm, usage_message,
};
use crate::moderation::logging::{LoggedAction, log_and_publish};
use crate::restriction::checks::is_bot_staff;
use kestrel_core::{Context, Error};
use kestrel_database::impls::restrictions::{
    NewRestriction, remove_global_restriction, upsert_restriction,
};
use kestrel_database::model::restriction::RestrictionKind;
use kestrel_utils::embed::{error_embed, success_embed};
use kestrel_utils::formatting::format_compact_duration;
use kestrel_utils::parse::parse_duration_seconds;
use kestrel_utils::time::now_unix_secs;

pub const MUTE_META: CommandMeta = CommandMeta {
    name: "commandmute",
    desc: "Mute a user from bot commands for a duration.",
    category: "restriction",
    usage: "k!commandmute <user> <duration> [reason]",
};

pub const UNMUTE_META: CommandMeta = CommandMeta {
    name: "commandunmute",
    desc: "Lift a user's global command mute.",
    category: "restriction",
    usage: "k!commandunmute <user>",
};

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn commandmute(
    ctx: Context<'_>,
    #[description = "The user to command-mute"] user: Option<serenity::User>,
    #[description = "Duration (e.g. 30m, 2h, 1d, 1w)"] duration: Option<String>,
    #[description = "Reason for the mute"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    if !is_bot_staff(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot staff can use this command.",
        )))
        .await?;
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(MUTE_META.usage)).await?;
        return Ok(());
    };

    if user.id == ctx.author().id {
        ctx.say(moderation_self_action_message("command-mute")).await?;
        return Ok(());
    }

    let Some(duration_seconds) = duration.as_deref().and_then(parse_duration_seconds) else {
        ctx.say(format!(
            "Invalid duration. Usage: `{}` (examples: 30m, 2h, 1d, 1h30m)",
            MUTE_META.usage
        ))
        .await?;
        return Ok(());
    };

    let duration_label = format_compact_duration(duration_seconds);
    let expires_at = now_unix_secs().saturating_add(duration_seconds);
    let guild_id = ctx.guild_id().map(|guild_id| guild_id.get()).unwrap_or(0);
    let reason_text = format!(
        "{}. Continued abuse may lead to a command ban.",
        reason.as_deref().unwrap_or("No reason provided")
    );

    upsert_restriction(
        &ctx.data().db,
        NewRestriction {
            guild_id,
            user_id: user.id.get(),
            kind: RestrictionKind::Mute,
            reason: &reason_text,
            expires_at: Some(expires_at),
            moderator_id: ctx.author().id.get(),
            is_global: true,
        },
    )
    .await?;

    if let Some(guild_id) = ctx.guild_id() {
        log_and_publish(
            &ctx,
            LoggedAction {
                guild_id: guild_id.get(),
                target_user_id: user.id.get(),
                moderator_user_id: ctx.author().id.get(),
                action: "command_mute",
                reason: &reason_text,
                duration_seconds: Some(duration_seconds),
            },
        )
        .await;
    }

    let _ = send_moderation_target_dm(
        ctx.http(),
        &user,
        "all servers",
        "command muted",
        Some(&reason_text),
        Some(&duration_label),
    )
    .await;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Global Command Mute",
        format!(
            "**User :** <@{}>\n**Duration :** {}\n**Reason :** {}\n\nThis user cannot use bot commands in any server until the mute lapses.",
            user.id.get(),
            duration_label,
            reason_text.replace('@', "@\u{200B}"),
        ),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn commandunmute(
    ctx: Context<'_>,
    #[description = "The user to command-unmute"] user: Option<serenity::User>,
) -> Result<(), Error> {
    if !is_bot_staff(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot staff can use this command.",
        )))
        .await?;
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(UNMUTE_META.usage)).await?;
        return Ok(());
    };

    let removed = remove_global_restriction(&ctx.data().db, user.id.get()).await?;

    if !removed {
        ctx.say("That user has no global command restriction.").await?;
        return Ok(());
    }

    if let Some(guild_id) = ctx.guild_id() {
        log_and_publish(
            &ctx,
            LoggedAction {
                guild_id: guild_id.get(),
                target_user_id: user.id.get(),
                moderator_user_id: ctx.author().id.get(),
                action: "command_unmute",
                reason: "Global command mute removed",
                duration_seconds: None,
            },
        )
        .await;
    }

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Global Command Unmute",
        format!(
            "**User :** <@{}>\n\nThis user can use bot commands again in every server.",
            user.id.get()
        ),
    )))
    .await?;

    Ok(())
}
