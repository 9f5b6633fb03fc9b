use poise::serenity_prelude as serenity;
use tracing::error;

use kestrel_core::Data;
use kestrel_database::impls::afk::{clear_afk, get_afk};
use kestrel_utils::embed::info_embed;
use kestrel_utils::formatting::format_compact_duration;
use kestrel_utils::time::now_unix_secs;

/// Clear an AFK author's status when they speak and surface AFK notices for
/// anyone they mention.
pub async fn handle_message_afk(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) {
    if message.author.bot || message.webhook_id.is_some() {
        return;
    }

    let Some(guild_id) = message.guild_id else {
        return;
    };

    let author_afk = match get_afk(&data.db, guild_id.get(), message.author.id.get()).await {
        Ok(entry) => entry,
        Err(source) => {
            error!(?source, "failed to read afk status");
            return;
        }
    };

    if let Some(entry) = author_afk {
        if let Err(source) = clear_afk(&data.db, guild_id.get(), message.author.id.get()).await {
            error!(?source, "failed to clear afk status");
        }

        let away_for = format_compact_duration(now_unix_secs().saturating_sub(entry.since));
        let embed = info_embed(
            "Welcome Back!",
            format!(
                "<@{}>, you are no longer AFK. You were away for {}.",
                message.author.id.get(),
                away_for
            ),
        );
        let _ = message
            .channel_id
            .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
            .await;
    }

    for user in &message.mentions {
        if user.bot || user.id == message.author.id {
            continue;
        }

        let entry = match get_afk(&data.db, guild_id.get(), user.id.get()).await {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(source) => {
                error!(?source, "failed to read afk status for mention");
                continue;
            }
        };

        let away_for = format_compact_duration(now_unix_secs().saturating_sub(entry.since));
        let embed = info_embed(
            "User is AFK",
            format!(
                "<@{}> is currently AFK: {}\n**Since :** {} ago",
                user.id.get(),
                entry.message,
                away_for
            ),
        );
        let _ = message
            .channel_id
            .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
            .await;
    }
}
