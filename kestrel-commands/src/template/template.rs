use std::collections::HashMap;

use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use crate::template::builder::{BuildReport, apply_categories, ensure_staff_roles};
use crate::template::structure::plan_for_description;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::{error_embed, info_embed, success_embed};
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "template",
    desc: "Bulk-create categories and channels from a template.",
    category: "template",
    usage: "k!template [description]",
};

#[poise::command(prefix_command, slash_command, category = "Template")]
pub async fn template(
    ctx: Context<'_>,
    #[description = "What kind of server to set up (e.g. gaming, appeal)"]
    #[rest]
    description: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::MANAGE_CHANNELS,
    )
    .await?
    {
        return Ok(());
    }

    let bot_id = ctx.framework().bot_id;
    let required =
        serenity::Permissions::MANAGE_CHANNELS | serenity::Permissions::MANAGE_ROLES;
    if !has_user_permission(ctx.http(), guild_id, bot_id, required).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Missing Bot Permissions",
            "I need **Manage Channels** and **Manage Roles** to build a template.\nGrant them (or Administrator) and try again.",
        )))
        .await?;
        return Ok(());
    }

    let plan = plan_for_description(description.as_deref());

    let status = ctx
        .send(poise::CreateReply::default().embed(info_embed(
            "Template Creation",
            "Creating categories and channels...",
        )))
        .await?;

    let mut report = BuildReport::default();
    let role_map = if plan.create_staff_roles {
        match ensure_staff_roles(ctx.http(), guild_id, &mut report).await {
            Ok(role_map) => role_map,
            Err(source) => {
                error!(?source, "template role creation failed");
                status
                    .edit(
                        ctx,
                        poise::CreateReply::default().embed(error_embed(
                            "Template Creation Failed",
                            "I couldn't create the staff roles. Check my permissions and try again.",
                        )),
                    )
                    .await?;
                return Ok(());
            }
        }
    } else {
        HashMap::new()
    };

    if let Err(source) =
        apply_categories(ctx.http(), guild_id, &plan.categories, &role_map, &mut report).await
    {
        error!(?source, "template creation failed");
        status
            .edit(
                ctx,
                poise::CreateReply::default().embed(error_embed(
                    "Template Creation Failed",
                    "Something went wrong while creating channels. Partial progress may remain.",
                )),
            )
            .await?;
        return Ok(());
    }

    status
        .edit(
            ctx,
            poise::CreateReply::default()
                .embed(success_embed("Template Creation Complete", report.summary())),
        )
        .await?;

    Ok(())
}
