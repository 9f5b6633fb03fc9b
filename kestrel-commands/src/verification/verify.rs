use tracing::warn;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::guild_settings::get_verification_role_id;
use kestrel_database::impls::verification::{is_verified, set_verified};
use kestrel_utils::embed::{info_embed, success_embed};

pub const META: CommandMeta = CommandMeta {
    name: "verify",
    desc: "Verify yourself in this server.",
    category: "verification",
    usage: "k!verify",
};

#[poise::command(prefix_command, slash_command, category = "Verification")]
pub async fn verify(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let db = &ctx.data().db;
    let user_id = ctx.author().id.get();

    if is_verified(db, guild_id.get(), user_id).await? {
        ctx.send(poise::CreateReply::default().embed(info_embed(
            "Already Verified",
            "You are already verified in this server!",
        )))
        .await?;
        return Ok(());
    }

    set_verified(db, guild_id.get(), user_id, true).await?;

    // Best effort: the role may be missing or above the bot.
    if let Some(role_id) = get_verification_role_id(db, guild_id.get()).await? {
        let member = guild_id.member(ctx.http(), ctx.author().id).await?;
        if let Err(source) = member
            .add_role(ctx.http(), serenity::RoleId::new(role_id))
            .await
        {
            warn!(?source, "failed to grant verification role");
        }
    }

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Verification Successful",
        "You have been verified in this server!",
    )))
    .await?;

    Ok(())
}
