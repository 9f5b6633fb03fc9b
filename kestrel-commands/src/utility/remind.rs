use tokio::time::sleep;
use tracing::warn;

use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::usage_message;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;
use kestrel_utils::formatting::format_compact_duration;
use kestrel_utils::parse::parse_duration_seconds;

pub const META: CommandMeta = CommandMeta {
    name: "remind",
    desc: "Set a reminder (e.g. 10m take a break).",
    category: "utility",
    usage: "k!remind <duration> <message>",
};

const MAX_REMINDER_SECS: u64 = 60 * 60 * 24 * 7;

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn remind(
    ctx: Context<'_>,
    #[description = "How long to wait (e.g. 10m, 2h)"] duration: Option<String>,
    #[description = "What to remind you about"]
    #[rest]
    message: Option<String>,
) -> Result<(), Error> {
    let Some(seconds) = duration.as_deref().and_then(parse_duration_seconds) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if seconds > MAX_REMINDER_SECS {
        ctx.say("Reminders can be at most one week out.").await?;
        return Ok(());
    }

    let Some(message) = message
        .as_deref()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
    else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let duration_label = format_compact_duration(seconds);
    ctx.send(poise::CreateReply::default().embed(info_embed(
        "Reminder Set",
        format!("I'll remind you in {}: {}", duration_label, message),
    )))
    .await?;

    // Reminders are in-memory only; a restart forgets them.
    let http = ctx.serenity_context().http.clone();
    let channel_id = ctx.channel_id();
    let author_id = ctx.author().id;

    tokio::spawn(async move {
        sleep(std::time::Duration::from_secs(seconds)).await;
        let content = format!("<@{}> Reminder: {}", author_id.get(), message);
        if let Err(source) = channel_id
            .send_message(&http, serenity::CreateMessage::new().content(content))
            .await
        {
            warn!(?source, "failed to deliver reminder");
        }
    });

    Ok(())
}
