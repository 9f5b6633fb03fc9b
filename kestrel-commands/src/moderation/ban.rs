use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::{
    guild_only_message, moderation_action_embed, moderation_self_action_message,
    send_moderation_target_dm_for_guild, target_profile_from_user, usage_message,
};
use crate::moderation::logging::{LoggedAction, log_and_publish};
use kestrel_core::{Context, Error};
use kestrel_database::impls::guild_settings::get_appeal_link;
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "ban",
    desc: "Ban a user from the server.",
    category: "moderation",
    usage: "k!ban <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "The user to ban"] user: Option<serenity::User>,
    #[description = "Reason for the ban"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::BAN_MEMBERS,
    )
    .await?
    {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if user.id == ctx.author().id {
        ctx.say(moderation_self_action_message("ban")).await?;
        return Ok(());
    }

    let reason_text = reason.as_deref().unwrap_or("No reason provided");

    // A configured appeal link rides along in the DM so banned members know
    // where to go; DM first, the ban closes the shared-guild channel.
    let appeal_link = get_appeal_link(&ctx.data().db, guild_id.get())
        .await
        .unwrap_or_default();
    let dm_reason = match appeal_link.as_deref() {
        Some(link) => format!("{}\nYou can appeal this ban at: {}", reason_text, link),
        None => reason_text.to_owned(),
    };
    let _ = send_moderation_target_dm_for_guild(
        ctx.http(),
        &user,
        guild_id,
        "banned",
        Some(&dm_reason),
        None,
    )
    .await;

    let ban_result = guild_id
        .ban_with_reason(ctx.http(), user.id, 0, reason_text)
        .await;

    if let Err(source) = ban_result {
        error!(?source, "ban request failed");
        ctx.say("I couldn't ban that user. Check role hierarchy and permissions.")
            .await?;
        return Ok(());
    }

    let case_id = log_and_publish(
        &ctx,
        LoggedAction {
            guild_id: guild_id.get(),
            target_user_id: user.id.get(),
            moderator_user_id: ctx.author().id.get(),
            action: "ban",
            reason: reason_text,
            duration_seconds: None,
        },
    )
    .await;

    let target_profile = target_profile_from_user(&user);
    let mut embed =
        moderation_action_embed(&target_profile, user.id, "banned", reason.as_deref(), None);
    if let Some(case_id) = case_id {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!("Case #{}", case_id)));
    }
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
