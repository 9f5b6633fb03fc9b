use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::{guild_only_message, usage_message};
use crate::moderation::logging::{LoggedAction, log_and_publish};
use kestrel_core::{Context, Error};
use kestrel_utils::embed::success_embed;
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "untimeout",
    desc: "Remove an active timeout from a user.",
    category: "moderation",
    usage: "k!untimeout <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn untimeout(
    ctx: Context<'_>,
    #[description = "The user to untimeout"] user: Option<serenity::User>,
    #[description = "Reason for the untimeout"]
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

    let edit = serenity::EditMember::new().enable_communication();
    if let Err(source) = guild_id.edit_member(ctx.http(), user.id, edit).await {
        error!(?source, "untimeout request failed");
        ctx.say("I couldn't remove that user's timeout. Check role hierarchy and permissions.")
            .await?;
        return Ok(());
    }

    let reason_text = reason.as_deref().unwrap_or("No reason provided");
    let case_id = log_and_publish(
        &ctx,
        LoggedAction {
            guild_id: guild_id.get(),
            target_user_id: user.id.get(),
            moderator_user_id: ctx.author().id.get(),
            action: "untimeout",
            reason: reason_text,
            duration_seconds: None,
        },
    )
    .await;

    let mut embed = success_embed(
        "Timeout Removed",
        format!("<@{}>'s timeout has been removed.", user.id.get()),
    );
    if let Some(case_id) = case_id {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!("Case #{}", case_id)));
    }
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
