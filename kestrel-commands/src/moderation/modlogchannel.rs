use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::guild_settings::{
    clear_modlog_channel_id, get_modlog_channel_id, set_modlog_channel_id,
};
use kestrel_utils::embed::{info_embed, success_embed};
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "modlogchannel",
    desc: "View, set, or clear the modlog mirror channel.",
    category: "moderation",
    usage: "k!modlogchannel [#channel|clear]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn modlogchannel(
    ctx: Context<'_>,
    #[description = "Channel to mirror moderation actions into, or `clear`"]
    #[rest]
    channel: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::MANAGE_GUILD,
    )
    .await?
    {
        return Ok(());
    }

    let db = &ctx.data().db;

    let Some(raw) = channel.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) else {
        let embed = match get_modlog_channel_id(db, guild_id.get()).await? {
            Some(channel_id) => info_embed(
                "Modlog Channel",
                format!("Moderation actions are mirrored to <#{}>.", channel_id),
            ),
            None => info_embed(
                "Modlog Channel",
                "No modlog channel is configured.\nUse `k!modlogchannel #channel` to set one.",
            ),
        };
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    if raw.eq_ignore_ascii_case("clear") {
        clear_modlog_channel_id(db, guild_id.get()).await?;
        ctx.send(
            poise::CreateReply::default()
                .embed(success_embed("Modlog Channel Cleared", "Mirroring disabled.")),
        )
        .await?;
        return Ok(());
    }

    let Some(channel_id) = parse_channel_mention(raw) else {
        ctx.say("That doesn't look like a channel. Mention it like `#modlog`.")
            .await?;
        return Ok(());
    };

    set_modlog_channel_id(db, guild_id.get(), channel_id).await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Modlog Channel Set",
        format!("Moderation actions will be mirrored to <#{}>.", channel_id),
    )))
    .await?;

    Ok(())
}

/// Accepts `<#id>` mentions or a bare channel id.
fn parse_channel_mention(raw: &str) -> Option<u64> {
    let trimmed = raw
        .strip_prefix("<#")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(raw);
    trimmed.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_channel_mention;

    #[test]
    fn parses_mentions_and_bare_ids() {
        assert_eq!(parse_channel_mention("<#123456>"), Some(123_456));
        assert_eq!(parse_channel_mention("123456"), Some(123_456));
        assert_eq!(parse_channel_mention("#general"), None);
        assert_eq!(parse_channel_mention("<#>"), None);
    }
}
