use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use crate::template::builder::{BuildReport, ensure_staff_roles};
use kestrel_core::{Context, Error};
use kestrel_utils::embed::{error_embed, info_embed, success_embed};
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "temproles",
    desc: "Create the staff role ladder without any channels.",
    category: "template",
    usage: "k!temproles",
};

#[poise::command(prefix_command, slash_command, category = "Template")]
pub async fn temproles(ctx: Context<'_>) -> Result<(), Error> {
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

    let bot_id = ctx.framework().bot_id;
    if !has_user_permission(
        ctx.http(),
        guild_id,
        bot_id,
        serenity::Permissions::MANAGE_ROLES,
    )
    .await?
    {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Missing Bot Permissions",
            "I need **Manage Roles** to create the role ladder.",
        )))
        .await?;
        return Ok(());
    }

    let status = ctx
        .send(
            poise::CreateReply::default()
                .embed(info_embed("Role Template", "Creating staff roles...")),
        )
        .await?;

    let mut report = BuildReport::default();
    if let Err(source) = ensure_staff_roles(ctx.http(), guild_id, &mut report).await {
        error!(?source, "role template creation failed");
        status
            .edit(
                ctx,
                poise::CreateReply::default().embed(error_embed(
                    "Role Template Failed",
                    "I couldn't create the staff roles. Check my permissions and try again.",
                )),
            )
            .await?;
        return Ok(());
    }

    status
        .edit(
            ctx,
            poise::CreateReply::default()
                .embed(success_embed("Role Template Complete", report.summary())),
        )
        .await?;

    Ok(())
}
