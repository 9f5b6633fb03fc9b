use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::usage_message;
use crate::restriction::checks::{is_bot_owner, is_bot_staff};
use kestrel_core::{Context, Error};
use kestrel_database::impls::staff;
use kestrel_utils::embed::{error_embed, info_embed, success_embed};

pub const ADDADMIN_META: CommandMeta = CommandMeta {
    name: "addadmin",
    desc: "Grant a user bot admin privileges.",
    category: "restriction",
    usage: "k!addadmin <user> [reason]",
};

pub const REMOVEADMIN_META: CommandMeta = CommandMeta {
    name: "removeadmin",
    desc: "Revoke a user's bot admin privileges.",
    category: "restriction",
    usage: "k!removeadmin <user>",
};

pub const ADMINS_META: CommandMeta = CommandMeta {
    name: "admins",
    desc: "List bot admins.",
    category: "restriction",
    usage: "k!admins",
};

pub const ADDOWNER_META: CommandMeta = CommandMeta {
    name: "addowner",
    desc: "Grant a user bot owner privileges.",
    category: "restriction",
    usage: "k!addowner <user> [reason]",
};

pub const REMOVEOWNER_META: CommandMeta = CommandMeta {
    name: "removeowner",
    desc: "Revoke a user's bot owner privileges.",
    category: "restriction",
    usage: "k!removeowner <user>",
};

pub const OWNERS_META: CommandMeta = CommandMeta {
    name: "owners",
    desc: "List bot owners.",
    category: "restriction",
    usage: "k!owners",
};

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn addadmin(
    ctx: Context<'_>,
    #[description = "The user to make a bot admin"] user: Option<serenity::User>,
    #[description = "Why they're being granted admin"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    if !is_bot_owner(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot owners can manage bot admins.",
        )))
        .await?;
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(ADDADMIN_META.usage)).await?;
        return Ok(());
    };

    if user.bot {
        ctx.say("Bots can't be staff.").await?;
        return Ok(());
    }

    if staff::is_admin(&ctx.data().db, user.id.get()).await? {
        ctx.say("That user is already a bot admin.").await?;
        return Ok(());
    }

    let reason_text = reason.as_deref().unwrap_or("Granted admin privileges");
    staff::add_admin(
        &ctx.data().db,
        user.id.get(),
        reason_text,
        ctx.author().id.get(),
    )
    .await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Bot Admin Added",
        format!(
            "**User :** <@{}>\n**Reason :** {}\n\nThey can now manage command restrictions and review appeals.",
            user.id.get(),
            reason_text
        ),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn removeadmin(
    ctx: Context<'_>,
    #[description = "The bot admin to remove"] user: Option<serenity::User>,
) -> Result<(), Error> {
    if !is_bot_owner(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot owners can manage bot admins.",
        )))
        .await?;
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(REMOVEADMIN_META.usage)).await?;
        return Ok(());
    };

    if !staff::remove_admin(&ctx.data().db, user.id.get()).await? {
        ctx.say("That user is not a bot admin.").await?;
        return Ok(());
    }

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Bot Admin Removed",
        format!("<@{}> is no longer a bot admin.", user.id.get()),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn admins(ctx: Context<'_>) -> Result<(), Error> {
    if !is_bot_staff(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot staff can view the admin list.",
        )))
        .await?;
        return Ok(());
    }

    let entries = staff::list_admins(&ctx.data().db).await?;

    let description = if entries.is_empty() {
        "No bot admins have been added.".to_owned()
    } else {
        entries
            .iter()
            .map(|entry| {
                format!(
                    "• <@{}> — {} (added by <@{}>)",
                    entry.user_id, entry.reason, entry.granted_by
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    ctx.send(poise::CreateReply::default().embed(info_embed("Bot Admins", description)))
        .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn addowner(
    ctx: Context<'_>,
    #[description = "The user to make a bot owner"] user: Option<serenity::User>,
    #[description = "Why they're being granted ownership"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    if !is_bot_owner(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot owners can manage owners.",
        )))
        .await?;
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(ADDOWNER_META.usage)).await?;
        return Ok(());
    };

    if user.id == ctx.author().id {
        ctx.say("You cannot add yourself as an owner.").await?;
        return Ok(());
    }

    if user.bot {
        ctx.say("Bots can't be staff.").await?;
        return Ok(());
    }

    if is_bot_owner(ctx.data(), user.id.get()).await? {
        ctx.say("That user is already a bot owner.").await?;
        return Ok(());
    }

    let reason_text = reason.as_deref().unwrap_or("Added as bot owner");
    staff::add_owner(
        &ctx.data().db,
        user.id.get(),
        reason_text,
        ctx.author().id.get(),
    )
    .await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Bot Owner Added",
        format!(
            "**User :** <@{}>\n**Reason :** {}\n\nThey can now manage bot admins and server bans.",
            user.id.get(),
            reason_text
        ),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn removeowner(
    ctx: Context<'_>,
    #[description = "The bot owner to remove"] user: Option<serenity::User>,
) -> Result<(), Error> {
    if !is_bot_owner(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot owners can manage owners.",
        )))
        .await?;
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(REMOVEOWNER_META.usage)).await?;
        return Ok(());
    };

    // Root owners come from the environment and cannot be revoked at runtime.
    if ctx.data().is_root_owner(user.id.get()) {
        ctx.say("Root owners cannot be removed.").await?;
        return Ok(());
    }

    if !staff::remove_owner(&ctx.data().db, user.id.get()).await? {
        ctx.say("That user is not a bot owner.").await?;
        return Ok(());
    }

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Bot Owner Removed",
        format!("<@{}> is no longer a bot owner.", user.id.get()),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn owners(ctx: Context<'_>) -> Result<(), Error> {
    if !is_bot_staff(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot staff can view the owner list.",
        )))
        .await?;
        return Ok(());
    }

    let mut lines: Vec<String> = ctx
        .data()
        .owner_ids
        .iter()
        .map(|owner_id| format!("• <@{}> (root)", owner_id))
        .collect();
    lines.sort();

    for entry in staff::list_owners(&ctx.data().db).await? {
        lines.push(format!("• <@{}> — {}", entry.user_id, entry.reason));
    }

    let description = if lines.is_empty() {
        "No bot owners are configured.".to_owned()
    } else {
        lines.join("\n")
    };

    ctx.send(poise::CreateReply::default().embed(info_embed("Bot Owners", description)))
        .await?;

    Ok(())
}
