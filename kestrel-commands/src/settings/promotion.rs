use crate::CommandMeta;
use crate::embeds::usage_message;
use crate::restriction::checks::is_bot_owner;
use kestrel_core::{Context, Error};
use kestrel_database::impls::app_settings::{PROMOTION_SETTING, get_setting, set_setting};
use kestrel_utils::embed::{error_embed, info_embed, success_embed};

pub const PROMOTE_META: CommandMeta = CommandMeta {
    name: "promote",
    desc: "Set the promotion text shown across all servers.",
    category: "settings",
    usage: "k!promote <text>",
};

pub const PROMOTION_META: CommandMeta = CommandMeta {
    name: "promotion",
    desc: "View the current cross-server promotion.",
    category: "settings",
    usage: "k!promotion",
};

const MAX_PROMOTION_LEN: usize = 1000;

#[poise::command(prefix_command, slash_command, category = "Settings")]
pub async fn promote(
    ctx: Context<'_>,
    #[description = "The promotion text"]
    #[rest]
    text: Option<String>,
) -> Result<(), Error> {
    if !is_bot_owner(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot owners can set the global promotion.",
        )))
        .await?;
        return Ok(());
    }

    let Some(text) = text.as_deref().map(str::trim).filter(|text| !text.is_empty()) else {
        ctx.say(usage_message(PROMOTE_META.usage)).await?;
        return Ok(());
    };

    if text.len() > MAX_PROMOTION_LEN {
        ctx.say(format!(
            "Promotion text cannot exceed {} characters.",
            MAX_PROMOTION_LEN
        ))
        .await?;
        return Ok(());
    }

    set_setting(
        &ctx.data().db,
        PROMOTION_SETTING,
        text,
        ctx.author().id.get(),
    )
    .await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Global Promotion Set",
        format!("The promotion shown across all servers is now:\n\n{}", text),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Settings")]
pub async fn promotion(ctx: Context<'_>) -> Result<(), Error> {
    let embed = match get_setting(&ctx.data().db, PROMOTION_SETTING).await? {
        Some(text) => info_embed("Server Promotion", text),
        None => info_embed("Server Promotion", "No promotion has been set yet."),
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
