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

pub const BAN_META: CommandMeta = CommandMeta {
    name: "commandban",
    desc: "Ban a user from using bot commands everywhere.",
    category: "restriction",
    usage: "k!commandban <user> [reason]",
};

pub const UNBAN_META: CommandMeta = CommandMeta {
    name: "commandunban",
    desc: "Lift a user's global command ban.",
    category: "restriction",
    usage: "k!commandunban <user>",
};

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn commandban(
    ctx: Context<'_>,
    #[description = "The user to command-ban"] user: Option<serenity::User>,
    #[description = "Reason for the ban"]
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
        ctx.say(usage_message(BAN_META.usage)).await?;
        return Ok(());
    };

    if user.id == ctx.author().id {
        ctx.say(moderation_self_action_message("command-ban")).await?;
        return Ok(());
    }

    if user.bot {
        ctx.say("Bots don't use commands; there's nothing to ban.").await?;
        return Ok(());
    }

    let guild_id = ctx.guild_id().map(|guild_id| guild_id.get()).unwrap_or(0);
    let reason_text = format!(
        "{}. You may appeal with `k!appeal <reason>`.",
        reason.as_deref().unwrap_or("No reason provided")
    );

    upsert_restriction(
        &ctx.data().db,
        NewRestriction {
            guild_id,
            user_id: user.id.get(),
            kind: RestrictionKind::Ban,
            reason: &reason_text,
            expires_at: None,
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
                action: "command_ban",
                reason: &reason_text,
                duration_seconds: None,
            },
        )
        .await;
    }

    let _ = send_moderation_target_dm(
        ctx.http(),
        &user,
        "all servers",
        "command banned",
        Some(&reason_text),
        None,
    )
    .await;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Global Command Ban",
        format!(
            "**User :** <@{}>\n**Reason :** {}\n\nThis user can no longer use bot commands in any server. They may appeal with `k!appeal <reason>`.",
            user.id.get(),
            reason_text.replace('@', "@\u{200B}"),
        ),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn commandunban(
    ctx: Context<'_>,
    #[description = "The user to command-unban"] user: Option<serenity::User>,
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
        ctx.say(usage_message(UNBAN_META.usage)).await?;
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
                action: "command_unban",
                reason: "Global command ban removed",
                duration_seconds: None,
            },
        )
        .await;
    }

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Global Command Unban",
        format!(
            "**User :** <@{}>\n\nThis user can use bot commands again in every server.",
            user.id.get()
        ),
    )))
    .await?;

    Ok(())
}
