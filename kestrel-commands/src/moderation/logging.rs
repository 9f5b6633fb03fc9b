use tracing::error;

use poise::serenity_prelude as serenity;

use kestrel_core::Context;
use kestrel_database::impls::guild_settings::get_modlog_channel_id;
use kestrel_database::impls::mod_log::record_action;
use kestrel_utils::embed::DEFAULT_EMBED_COLOR;
use kestrel_utils::formatting::{action_display_name, format_compact_duration};

pub struct LoggedAction<'a> {
    pub guild_id: u64,
    pub target_user_id: u64,
    pub moderator_user_id: u64,
    pub action: &'a str,
    pub reason: &'a str,
    pub duration_seconds: Option<u64>,
}

/// Orchestrator: record the action and mirror it to the configured modlog
/// channel. Returns the case id when the record landed.
pub async fn log_and_publish(ctx: &Context<'_>, action: LoggedAction<'_>) -> Option<u64> {
    let case_id = match record_action(
        &ctx.data().db,
        action.guild_id,
        action.target_user_id,
        action.moderator_user_id,
        action.action,
        action.reason,
    )
    .await
    {
        Ok(case_id) => case_id,
        Err(source) => {
            error!(?source, "failed to record moderation action");
            return None;
        }
    };

    if let Err(source) = publish_to_modlog_channel(ctx, &action, case_id).await {
        error!(?source, "failed to publish action to modlog channel");
    }

    Some(case_id)
}

async fn publish_to_modlog_channel(
    ctx: &Context<'_>,
    action: &LoggedAction<'_>,
    case_id: u64,
) -> Result<(), serenity::Error> {
    let channel_id = match get_modlog_channel_id(&ctx.data().db, action.guild_id).await {
        Ok(channel_id) => channel_id,
        Err(source) => {
            error!(?source, "failed to read modlog channel config");
            None
        }
    };

    let Some(channel_id) = channel_id else {
        return Ok(());
    };

    let mut fields = Vec::new();
    fields.push(format!(
        "**Action :** {}",
        action_display_name(action.action)
    ));
    fields.push(format!("**Target :** <@{}>", action.target_user_id));
    fields.push(format!(
        "**Reason :** {}",
        action.reason.replace('@', "@\u{200B}")
    ));

    if let Some(duration_seconds) = action.duration_seconds {
        fields.push(format!(
            "**Duration :** {}",
            format_compact_duration(duration_seconds)
        ));
    }

    fields.push(format!("**Moderator :** <@{}>", action.moderator_user_id));

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(format!("Case #{}", case_id))
        .description(fields.join("\n"));

    serenity::ChannelId::new(channel_id)
        .send_message(ctx.http(), serenity::CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
