use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "serverinfo",
    desc: "Display information about this server.",
    category: "utility",
    usage: "k!serverinfo",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn serverinfo(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let guild = guild_id.to_partial_guild_with_counts(ctx.http()).await?;
    let channels = guild_id.channels(ctx.http()).await?;
    let roles = guild_id.roles(ctx.http()).await?;

    let text_channels = channels
        .values()
        .filter(|channel| channel.kind == serenity::ChannelType::Text)
        .count();
    let voice_channels = channels
        .values()
        .filter(|channel| channel.kind == serenity::ChannelType::Voice)
        .count();

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{}", guild.name))
        .color(DEFAULT_EMBED_COLOR)
        .field("Owner", format!("<@{}>", guild.owner_id.get()), true)
        .field(
            "Members",
            guild
                .approximate_member_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "Unknown".to_owned()),
            true,
        )
        .field(
            "Channels",
            format!("{} text, {} voice", text_channels, voice_channels),
            true,
        )
        .field("Roles", roles.len().to_string(), true)
        .field(
            "Created",
            format!("<t:{}:D>", guild_id.created_at().unix_timestamp()),
            true,
        );

    if let Some(icon_url) = guild.icon_url() {
        embed = embed.thumbnail(icon_url);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
