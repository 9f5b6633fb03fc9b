use tracing::warn;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::{guild_only_message, usage_message};
use kestrel_core::{Context, Error};
use kestrel_database::impls::guild_settings::get_verification_role_id;
use kestrel_database::impls::verification::set_verified;
use kestrel_utils::embed::success_embed;
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "unverify",
    desc: "Remove verification from a user.",
    category: "verification",
    usage: "k!unverify <user>",
};

#[poise::command(prefix_command, slash_command, category = "Verification")]
pub async fn unverify(
    ctx: Context<'_>,
    #[description = "The user to unverify"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::MANAGE_ROLES,
    )
    .await?
    {
        return Ok(());
    }

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let db = &ctx.data().db;
    set_verified(db, guild_id.get(), user.id.get(), false).await?;

    if let Some(role_id) = get_verification_role_id(db, guild_id.get()).await? {
        match guild_id.member(ctx.http(), user.id).await {
            Ok(member) => {
                if let Err(source) = member
                    .remove_role(ctx.http(), serenity::RoleId::new(role_id))
                    .await
                {
                    warn!(?source, "failed to remove verification role");
                }
            }
            Err(source) => warn!(?source, "failed to fetch member for unverify"),
        }
    }

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "User Unverified",
        format!("<@{}> has been unverified.", user.id.get()),
    )))
    .await?;

    Ok(())
}
