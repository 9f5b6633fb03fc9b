use crate::CommandMeta;
use crate::embeds::guild_only_message;
use crate::restriction::checks::is_bot_staff;
use kestrel_core::{Context, Error};
use kestrel_database::impls::restrictions::list_command_bans;
use kestrel_utils::embed::error_embed;
use kestrel_utils::pagination::paginate_embed_pages;

pub const META: CommandMeta = CommandMeta {
    name: "commandbans",
    desc: "List users banned from using bot commands.",
    category: "restriction",
    usage: "k!commandbans [page]",
};

const BANS_PER_PAGE: u32 = 10;

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn commandbans(
    ctx: Context<'_>,
    #[description = "Page number"] page: Option<u32>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !is_bot_staff(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot staff can view the command ban list.",
        )))
        .await?;
        return Ok(());
    }

    let page = page.unwrap_or(1).max(1);
    let bans = list_command_bans(&ctx.data().db, guild_id.get(), page, BANS_PER_PAGE).await?;

    if bans.is_empty() {
        ctx.say("No command bans found for this server or globally.")
            .await?;
        return Ok(());
    }

    let lines: Vec<String> = bans
        .iter()
        .map(|ban| {
            let scope = if ban.is_global { "Global" } else { "Server" };
            format!(
                "**[{}]** <@{}> — {}\nModerator: <@{}> • <t:{}:R>",
                scope,
                ban.user_id,
                ban.reason.replace('@', "@\u{200B}"),
                ban.moderator_id,
                ban.created_at,
            )
        })
        .collect();

    let pages = vec![lines.join("\n\n")];
    paginate_embed_pages(ctx, "Command Banned Users", &pages, 1).await?;

    Ok(())
}
