use tracing::error;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::usage_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::ai_config::get_ai_enabled;
use kestrel_llm::chat_system_prompt;
use kestrel_utils::embed::{DEFAULT_EMBED_COLOR, error_embed, info_embed};

pub const META: CommandMeta = CommandMeta {
    name: "ask",
    desc: "Ask the AI a question.",
    category: "ai",
    usage: "k!ask <question>",
};

const MAX_QUESTION_LEN: usize = 2000;

#[poise::command(prefix_command, slash_command, category = "AI")]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "Your question"]
    #[rest]
    question: Option<String>,
) -> Result<(), Error> {
    let Some(question) = question
        .as_deref()
        .map(str::trim)
        .filter(|question| !question.is_empty())
    else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if question.len() > MAX_QUESTION_LEN {
        ctx.say(format!(
            "Please keep your question under {} characters.",
            MAX_QUESTION_LEN
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
            "Thinking...",
            format!("Processing your question: `{}`", question),
        )))
        .await?;

    let embed = match llm.chat(&chat_system_prompt(), question).await {
        Ok(answer) => serenity::CreateEmbed::new()
            .title("AI Response")
            .color(DEFAULT_EMBED_COLOR)
            .field("Question", question, false)
            .field("Answer", answer, false)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Asked by {}",
                ctx.author().name
            ))),
        Err(source) => {
            error!(?source, "ai chat request failed");
            error_embed(
                "AI Response Failed",
                "Sorry, I couldn't process your question. Please try again later.",
            )
        }
    };

    reply
        .edit(ctx, poise::CreateReply::default().embed(embed))
        .await?;

    Ok(())
}
