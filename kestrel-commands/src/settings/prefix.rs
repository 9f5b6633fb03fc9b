use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::guild_settings::{get_prefix, set_prefix};
use kestrel_utils::DEFAULT_COMMAND_PREFIX;
use kestrel_utils::embed::{info_embed, success_embed};
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "prefix",
    desc: "View or change the command prefix for this server.",
    category: "settings",
    usage: "k!prefix [new_prefix]",
};

const MAX_PREFIX_LEN: usize = 5;

#[poise::command(prefix_command, slash_command, category = "Settings")]
pub async fn prefix(
    ctx: Context<'_>,
    #[description = "The new prefix (max 5 characters)"] new_prefix: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let db = &ctx.data().db;

    let Some(new_prefix) = new_prefix
        .as_deref()
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
    else {
        let current = get_prefix(db, guild_id.get())
            .await?
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_owned());
        ctx.send(poise::CreateReply::default().embed(info_embed(
            "Current Prefix",
            format!("The current prefix is: `{}`", current),
        )))
        .await?;
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

    if new_prefix.len() > MAX_PREFIX_LEN {
        ctx.say(format!(
            "Prefix cannot be longer than {} characters.",
            MAX_PREFIX_LEN
        ))
        .await?;
        return Ok(());
    }

    set_prefix(db, guild_id.get(), new_prefix).await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Prefix Changed",
        format!("Prefix has been changed to: `{}`", new_prefix),
    )))
    .await?;

    Ok(())
}
