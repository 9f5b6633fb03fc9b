use poise::serenity_prelude as serenity;
use tracing::{error, info};

use kestrel_commands::restriction::appeal::{
    APPROVE_EMOJI, DENY_EMOJI, can_adjudicate, parse_appeal_embed,
};
use kestrel_core::Data;
use kestrel_database::impls::appeals::{APPEAL_COOLDOWN_SECS, arm_cooldown};
use kestrel_database::impls::mod_log::record_action;
use kestrel_database::impls::restrictions::{
    remove_global_restriction, remove_guild_restriction,
};
use kestrel_utils::embed::{error_embed, info_embed, success_embed};
use kestrel_utils::formatting::format_compact_duration;

/// Adjudicate an appeal from a staff reaction on the notification DM.
///
/// ✅ lifts the restriction, ❌ denies and re-arms the appeal cooldown. Only
/// reactions from staff, in DMs, on an appeal notification count.
pub async fn handle_reaction_appeal(
    ctx: &serenity::Context,
    data: &Data,
    reaction: &serenity::Reaction,
) {
    // Appeal notifications only ever live in DMs.
    if reaction.guild_id.is_some() {
        return;
    }

    let Some(reactor_id) = reaction.user_id else {
        return;
    };

    // The bot seeds both reactions itself.
    if reactor_id == ctx.cache.current_user().id {
        return;
    }

    let serenity::ReactionType::Unicode(emoji) = &reaction.emoji else {
        return;
    };
    let approve = match emoji.as_str() {
        APPROVE_EMOJI => true,
        DENY_EMOJI => false,
        _ => return,
    };

    match can_adjudicate(data, reactor_id.get()).await {
        Ok(true) => {}
        Ok(false) => return,
        Err(source) => {
            error!(?source, "failed to check appeal adjudicator");
            return;
        }
    }

    let message = match reaction.message(&ctx.http).await {
        Ok(message) => message,
        Err(source) => {
            error!(?source, "failed to fetch appeal notification message");
            return;
        }
    };

    if message.author.id != ctx.cache.current_user().id {
        return;
    }

    let Some(embed) = message.embeds.first() else {
        return;
    };

    let Some(appeal) = parse_appeal_embed(embed.title.as_deref(), embed.description.as_deref())
    else {
        return;
    };

    if approve {
        let mut lifted = false;
        match remove_global_restriction(&data.db, appeal.user_id).await {
            Ok(removed) => lifted |= removed,
            Err(source) => {
                error!(?source, "failed to remove global restriction for appeal");
            }
        }
        match remove_guild_restriction(&data.db, appeal.guild_id, appeal.user_id).await {
            Ok(removed) => lifted |= removed,
            Err(source) => {
                error!(?source, "failed to remove guild restriction for appeal");
            }
        }

        info!(
            user_id = appeal.user_id,
            guild_id = appeal.guild_id,
            adjudicator = reactor_id.get(),
            lifted,
            "command ban appeal approved"
        );

        if let Err(source) = record_action(
            &data.db,
            appeal.guild_id,
            appeal.user_id,
            reactor_id.get(),
            "appeal_approved",
            "Command ban appeal approved",
        )
        .await
        {
            error!(?source, "failed to record appeal approval");
        }

        let _ = message
            .channel_id
            .send_message(
                &ctx.http,
                serenity::CreateMessage::new().embed(success_embed(
                    "Appeal Approved",
                    format!(
                        "Command ban appeal for <@{}> has been approved. The restriction has been lifted.",
                        appeal.user_id
                    ),
                )),
            )
            .await;

        notify_user(
            ctx,
            appeal.user_id,
            info_embed(
                "Appeal Approved",
                "Your command ban appeal has been approved. You can use bot commands again.",
            ),
        )
        .await;
    } else {
        if let Err(source) = arm_cooldown(&data.db, appeal.guild_id, appeal.user_id).await {
            error!(?source, "failed to arm appeal cooldown");
        }

        info!(
            user_id = appeal.user_id,
            guild_id = appeal.guild_id,
            adjudicator = reactor_id.get(),
            "command ban appeal denied"
        );

        if let Err(source) = record_action(
            &data.db,
            appeal.guild_id,
            appeal.user_id,
            reactor_id.get(),
            "appeal_denied",
            "Command ban appeal denied",
        )
        .await
        {
            error!(?source, "failed to record appeal denial");
        }

        let cooldown = format_compact_duration(APPEAL_COOLDOWN_SECS);
        let _ = message
            .channel_id
            .send_message(
                &ctx.http,
                serenity::CreateMessage::new().embed(error_embed(
                    "Appeal Denied",
                    format!(
                        "Command ban appeal for <@{}> has been denied. They cannot appeal again for {}.",
                        appeal.user_id, cooldown
                    ),
                )),
            )
            .await;

        notify_user(
            ctx,
            appeal.user_id,
            error_embed(
                "Appeal Denied",
                format!(
                    "Your command ban appeal has been denied. You remain banned and cannot appeal again for {}.",
                    cooldown
                ),
            ),
        )
        .await;
    }
}

async fn notify_user(ctx: &serenity::Context, user_id: u64, embed: serenity::CreateEmbed) {
    let Ok(user) = ctx.http.get_user(serenity::UserId::new(user_id)).await else {
        return;
    };
    let Ok(dm_channel) = user.create_dm_channel(&ctx.http).await else {
        return;
    };
    let _ = dm_channel
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await;
}
