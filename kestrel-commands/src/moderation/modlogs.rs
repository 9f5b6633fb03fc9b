use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_database::impls::mod_log::list_recent;
use kestrel_utils::formatting::action_display_name;
use kestrel_utils::pagination::paginate_embed_pages;
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "modlogs",
    desc: "Show recent moderation actions in this server.",
    category: "moderation",
    usage: "k!modlogs [user] [limit]",
};

const ENTRIES_PER_PAGE: usize = 10;

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn modlogs(
    ctx: Context<'_>,
    #[description = "Only show actions against this user"] user: Option<serenity::User>,
    #[description = "Maximum entries to fetch"] limit: Option<u32>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::MODERATE_MEMBERS,
    )
    .await?
    {
        return Ok(());
    }

    let entries = list_recent(
        &ctx.data().db,
        guild_id.get(),
        user.as_ref().map(|user| user.id.get()),
        limit.unwrap_or(50),
    )
    .await?;

    if entries.is_empty() {
        ctx.say("No moderation actions recorded yet.").await?;
        return Ok(());
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "`#{}` **{}** <@{}> by <@{}> — {} (<t:{}:R>)",
                entry.case_id,
                action_display_name(&entry.action),
                entry.user_id,
                entry.moderator_id,
                entry.reason.replace('@', "@\u{200B}"),
                entry.created_at,
            )
        })
        .collect();

    let pages: Vec<String> = lines
        .chunks(ENTRIES_PER_PAGE)
        .map(|chunk| chunk.join("\n"))
        .collect();

    paginate_embed_pages(ctx, "Moderation Logs", &pages, 1).await?;
    Ok(())
}
