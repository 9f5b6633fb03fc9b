use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::guild_settings::{get_verification_role_id, set_verification_role_id};
use kestrel_utils::embed::{error_embed, info_embed, success_embed};
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "verifysetup",
    desc: "View or set the role granted on verification.",
    category: "verification",
    usage: "k!verifysetup [@role]",
};

#[poise::command(prefix_command, slash_command, category = "Verification")]
pub async fn verifysetup(
    ctx: Context<'_>,
    #[description = "The role to grant verified members"] role: Option<serenity::Role>,
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

    let db = &ctx.data().db;

    let Some(role) = role else {
        let embed = match get_verification_role_id(db, guild_id.get()).await? {
            Some(role_id) => info_embed(
                "Current Verification Role",
                format!("The verification role is set to: <@&{}>", role_id),
            ),
            None => info_embed(
                "No Verification Role",
                "No verification role is configured for this server.\nUse `k!verifysetup @role` to set one.",
            ),
        };
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    if role.id.get() == guild_id.get() {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Invalid Role",
            "Cannot use @everyone for verification.",
        )))
        .await?;
        return Ok(());
    }

    let bot_member = guild_id
        .member(ctx.http(), ctx.framework().bot_id)
        .await?;
    let roles = guild_id.roles(ctx.http()).await?;
    let bot_top_position = bot_member
        .roles
        .iter()
        .filter_map(|role_id| roles.get(role_id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0);

    if role.position >= bot_top_position {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Role Too High",
            "I cannot manage this role; it sits at or above my highest role.",
        )))
        .await?;
        return Ok(());
    }

    set_verification_role_id(db, guild_id.get(), role.id.get()).await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Verification Setup Complete",
        format!(
            "**Verification Role :** <@&{}>\n\nMembers who run `k!verify` will now receive this role.",
            role.id.get()
        ),
    )))
    .await?;

    Ok(())
}
