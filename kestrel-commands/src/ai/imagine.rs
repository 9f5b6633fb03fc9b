use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::usage_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::ai_config::get_ai_enabled;
use kestrel_utils::embed::{DEFAULT_EMBED_COLOR, error_embed, info_embed};

pub const META: CommandMeta = CommandMeta {
    name: "imagine",
    desc: "Generate an AI image from a description.",
    category: "ai",
    usage: "k!imagine <description>",
};

const MAX_DESCRIPTION_LEN: usize = 1000;

#[poise::command(prefix_command, slash_command, category = "AI")]
pub async fn imagine(
    ctx: Context<'_>,
    #[description = "What to draw"]
    #[rest]
    description: Option<String>,
) -> Result<(), Error> {
    let Some(description) = description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty())
    else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if description.len() > MAX_DESCRIPTION_LEN {
        ctx.say(format!(
            "Please keep your description under {} characters.",
            MAX_DESCRIPTION_LEN
        ))
        .await?;
        return Ok(());
    }

    let Some(llm) = ctx.data().llm.as_ref() else {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "AI Unavailable",
            "AI service is currently unavailable.",
        )))
        .await?;
        return Ok(());
    };

    if let Some(guild_id) = ctx.guild_id()
        && !get_ai_enabled(&ctx.data().db, guild_id.get()).await?
    {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "AI Disabled",
            "AI commands are disabled in this server.",
        )))
        .await?;
        return Ok(());
    }

    let reply = ctx
        .send(poise::CreateReply::default().embed(info_embed(
            "Generating Image...",
            format!(
                "Creating an image based on: `{}`\nThis may take a moment...",
                description
            ),
        )))
        .await?;

    let embed = match llm.generate_image(description).await {
        Ok(image_url) => serenity::CreateEmbed::new()
            .title("AI Generated Image")
            .color(DEFAULT_EMBED_COLOR)
            .description(format!("**Your prompt :** {}", description))
            .image(image_url)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Generated for {}",
                ctx.author().name
            ))),
        Err(source) => {
            error!(?source, "ai image request failed");
            error_embed(
                "Image Generation Failed",
                "Sorry, I couldn't generate the image. Please try again later.",
            )
        }
    };

    reply
        .edit(ctx, poise::CreateReply::default().embed(embed))
        .await?;

    Ok(())
}
