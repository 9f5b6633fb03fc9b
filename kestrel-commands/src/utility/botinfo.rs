use poise::serenity_prelude as serenity;

use crate::{COMMANDS, CommandMeta};
use kestrel_core::{Context, Error};
use kestrel_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "botinfo",
    desc: "Display information about the bot.",
    category: "utility",
    usage: "k!botinfo",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn botinfo(ctx: Context<'_>) -> Result<(), Error> {
    let cache = ctx.serenity_context().cache.clone();
    let guild_count = cache.guild_count();
    let bot_user_id = ctx.framework().bot_id;

    let embed = serenity::CreateEmbed::new()
        .title("Bot Information")
        .color(DEFAULT_EMBED_COLOR)
        .description("A community-management bot: moderation, restrictions, templates, and more.")
        .field(
            "Statistics",
            format!(
                "**Servers :** {}\n**Commands :** {}",
                guild_count,
                COMMANDS.len()
            ),
            true,
        )
        .field(
            "Links",
            "Use `k!help` for the command list.\nUse `k!promotion` for community news.",
            true,
        )
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Bot ID: {}",
            bot_user_id.get()
        )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
