use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::afk::set_afk;
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "afk",
    desc: "Mark yourself AFK with an optional message.",
    category: "utility",
    usage: "k!afk [message]",
};

const MAX_AFK_MESSAGE_LEN: usize = 200;

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn afk(
    ctx: Context<'_>,
    #[description = "Why you're away"]
    #[rest]
    message: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let message = message
        .as_deref()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .unwrap_or("AFK");

    if message.len() > MAX_AFK_MESSAGE_LEN {
        ctx.say(format!(
            "AFK message cannot be longer than {} characters.",
            MAX_AFK_MESSAGE_LEN
        ))
        .await?;
        return Ok(());
    }

    set_afk(&ctx.data().db, guild_id.get(), ctx.author().id.get(), message).await?;

    ctx.send(poise::CreateReply::default().embed(info_embed(
        "AFK Set",
        format!("<@{}> is now AFK: {}", ctx.author().id.get(), message),
    )))
    .await?;

    Ok(())
}
