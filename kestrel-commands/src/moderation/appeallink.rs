use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::guild_settings::{get_appeal_link, set_appeal_link};
use kestrel_utils::embed::{info_embed, success_embed};
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "appeallink",
    desc: "View or set the appeal link shown to banned members.",
    category: "moderation",
    usage: "k!appeallink [link]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn appeallink(
    ctx: Context<'_>,
    #[description = "Where banned members can appeal"]
    #[rest]
    link: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::ADMINISTRATOR,
    )
    .await?
    {
        return Ok(());
    }

    let db = &ctx.data().db;

    let Some(link) = link.as_deref().map(str::trim).filter(|link| !link.is_empty()) else {
        let embed = match get_appeal_link(db, guild_id.get()).await? {
            Some(current) => info_embed(
                "Appeal Link",
                format!("Members banned from this server can appeal at: {}", current),
            ),
            None => info_embed(
                "Appeal Link",
                "No appeal link is configured.\nUse `k!appeallink <link>` to set one.",
            ),
        };
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    set_appeal_link(db, guild_id.get(), link).await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Appeal Link Updated",
        format!("Banned members will now be pointed at: {}", link),
    )))
    .await?;

    Ok(())
}
