use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::{
    guild_only_message, moderation_action_embed, moderation_self_action_message,
    send_moderation_target_dm_for_guild, target_profile_from_user, usage_message,
};
use crate::moderation::logging::{LoggedAction, log_and_publish};
use kestrel_core::{Context, Error};
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "warn",
    desc: "Warn a user and record it in the modlog.",
    category: "moderation",
    usage: "k!warn <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "The user to warn"] user: Option<serenity::User>,
    #[description = "Reason for the warning"]
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
        serenity::Permissions::MODERATE_MEMBERS,
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
        ctx.say(moderation_self_action_message("warn")).await?;
        return Ok(());
    }

    let reason_text = reason.as_deref().unwrap_or("No reason provided");

    let _ = send_moderation_target_dm_for_guild(
        ctx.http(),
        &user,
        guild_id,
        "warned",
        Some(reason_text),
        None,
    )
    .await;

    let case_id = log_and_publish(
        &ctx,
        LoggedAction {
            guild_id: guild_id.get(),
            target_user_id: user.id.get(),
            moderator_user_id: ctx.author().id.get(),
            action: "warn",
            reason: reason_text,
            duration_seconds: None,
        },
    )
    .await;

    let target_profile = target_profile_from_user(&user);
    let mut embed =
        moderation_action_embed(&target_profile, user.id, "warned", reason.as_deref(), None);
    if let Some(case_id) = case_id {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!("Case #{}", case_id)));
    }
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
