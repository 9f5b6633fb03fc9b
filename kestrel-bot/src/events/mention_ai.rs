use poise::serenity_prelude as serenity;
use tracing::error;

use kestrel_core::{Data, Error};
use kestrel_database::impls::ai_config::get_ai_enabled;
use kestrel_database::impls::rate_limit::ai_mention_within_limit;
use kestrel_llm::mention_system_prompt;
use kestrel_utils::embed::{DEFAULT_EMBED_COLOR, error_embed, info_embed};

/// Reply with the AI when the bot is mentioned with actual content.
pub async fn handle_message_mention_ai(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) -> Result<(), Error> {
    if message.author.bot || message.webhook_id.is_some() {
        return Ok(());
    }

    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };

    let Some(llm) = data.llm.as_ref() else {
        return Ok(());
    };

    let bot_id = ctx.cache.current_user().id;
    if !message.mentions_user_id(bot_id) {
        return Ok(());
    }

    let question = strip_mentions(&message.content, bot_id.get());
    if question.is_empty() {
        return Ok(());
    }

    if !get_ai_enabled(&data.db, guild_id.get()).await? {
        return Ok(());
    }

    if !ai_mention_within_limit(
        &data.db,
        guild_id.get(),
        message.channel_id.get(),
        message.author.id.get(),
    )
    .await?
    {
        return Ok(());
    }

    let placeholder = message
        .channel_id
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new().embed(info_embed(
                "Thinking...",
                format!("Processing your question: `{}`", question),
            )),
        )
        .await?;

    let embed = match llm.chat(&mention_system_prompt(), &question).await {
        Ok(answer) => serenity::CreateEmbed::new()
            .title("AI Response")
            .color(DEFAULT_EMBED_COLOR)
            .field("Question", question, false)
            .field("Answer", answer, false)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Asked by {}",
                message.author.name
            ))),
        Err(source) => {
            error!(?source, "mention ai request failed");
            error_embed(
                "AI Response Failed",
                "Sorry, I couldn't process your question. Please try again later.",
            )
        }
    };

    message
        .channel_id
        .edit_message(
            &ctx.http,
            placeholder.id,
            serenity::EditMessage::new().embed(embed),
        )
        .await?;

    Ok(())
}

fn strip_mentions(content: &str, bot_id: u64) -> String {
    content
        .replace(&format!("<@{}>", bot_id), "")
        .replace(&format!("<@!{}>", bot_id), "")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::strip_mentions;

    #[test]
    fn strips_both_mention_forms() {
        assert_eq!(strip_mentions("<@42> hello", 42), "hello");
        assert_eq!(strip_mentions("<@!42> hello", 42), "hello");
        assert_eq!(strip_mentions("hello <@42> there", 42), "hello  there");
    }

    #[test]
    fn mention_only_messages_become_empty() {
        assert_eq!(strip_mentions("<@42>", 42), "");
        assert_eq!(strip_mentions("  <@!42>  ", 42), "");
    }
}
