use tracing::error;

use kestrel_commands::restriction::checks::{is_bot_owner, is_bot_staff};
use kestrel_core::{Context, Error};
use kestrel_database::impls::restrictions::lookup_active;
use kestrel_database::impls::server_bans::is_server_banned;
use kestrel_database::model::restriction::{
    RestrictionDecision, RestrictionKind, evaluate,
};
use kestrel_utils::embed::error_embed;
use kestrel_utils::formatting::format_compact_duration;
use kestrel_utils::time::now_unix_secs;

/// Global command gate, run before every invocation.
///
/// Order matters: owners bypass everything, `appeal` must stay reachable for
/// banned users, server-wide bans block before personal restrictions, and a
/// lapsed mute is dropped on the way through.
pub async fn restriction_gate(ctx: Context<'_>) -> Result<bool, Error> {
    let data = ctx.data();
    let user_id = ctx.author().id.get();

    if ctx.command().name == "appeal" {
        return Ok(true);
    }

    if is_bot_owner(data, user_id).await? {
        return Ok(true);
    }

    let Some(guild_id) = ctx.guild_id() else {
        return Ok(true);
    };

    let staff = is_bot_staff(data, user_id).await?;
    if !staff && is_server_banned(&data.db, guild_id.get()).await? {
        let _ = ctx
            .send(poise::CreateReply::default().embed(error_embed(
                "Server Command Banned",
                "This server is banned from using bot commands. Contact the bot administrators for more information.",
            )))
            .await;
        return Ok(false);
    }

    let record = match lookup_active(&data.db, guild_id.get(), user_id).await {
        Ok(record) => record,
        Err(source) => {
            // Fail open: a broken lookup shouldn't lock everyone out.
            error!(?source, "restriction lookup failed");
            return Ok(true);
        }
    };

    let Some(record) = record else {
        return Ok(true);
    };

    match evaluate(&record, now_unix_secs()) {
        RestrictionDecision::Expired => Ok(true),
        RestrictionDecision::Blocked {
            kind: RestrictionKind::Ban,
            reason,
            ..
        } => {
            let _ = ctx
                .send(poise::CreateReply::default().embed(error_embed(
                    "Command Banned",
                    format!(
                        "You are banned from using bot commands.\n**Reason :** {}\nYou can appeal with `k!appeal <reason>`.",
                        reason.replace('@', "@\u{200B}")
                    ),
                )))
                .await;
            Ok(false)
        }
        RestrictionDecision::Blocked {
            kind: RestrictionKind::Mute,
            remaining,
            ..
        } => {
            let duration_text = remaining
                .map(format_compact_duration)
                .unwrap_or_else(|| "indefinitely".to_owned());
            let _ = ctx
                .send(poise::CreateReply::default().embed(error_embed(
                    "Command Muted",
                    format!(
                        "You are muted from using bot commands for {}.",
                        duration_text
                    ),
                )))
                .await;
            Ok(false)
        }
    }
}
