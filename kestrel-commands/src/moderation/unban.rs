use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::{guild_only_message, usage_message};
use crate::moderation::logging::{LoggedAction, log_and_publish};
use kestrel_core::{Context, Error};
use kestrel_utils::embed::success_embed;
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "unban",
    desc: "Unban a user by their user id.",
    category: "moderation",
    usage: "k!unban <user_id> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "The user id to unban"] user_id: Option<u64>,
    #[description = "Reason for the unban"]
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

    let Some(user_id) = user_id else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let reason_text = reason.as_deref().unwrap_or("No reason provided");
    let target = serenity::UserId::new(user_id);

    if let Err(source) = guild_id.unban(ctx.http(), target).await {
        error!(?source, "unban request failed");
        ctx.say("I couldn't unban that user. Are they actually banned?")
            .await?;
        return Ok(());
    }

    let case_id = log_and_publish(
        &ctx,
        LoggedAction {
            guild_id: guild_id.get(),
            target_user_id: user_id,
            moderator_user_id: ctx.author().id.get(),
            action: "unban",
            reason: reason_text,
            duration_seconds: None,
        },
    )
    .await;

    let mut embed = success_embed(
        "User Unbanned",
        format!("<@{}> has been unbanned.\n**Reason :** {}", user_id, reason_text),
    );
    if let Some(case_id) = case_id {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!("Case #{}", case_id)));
    }
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
