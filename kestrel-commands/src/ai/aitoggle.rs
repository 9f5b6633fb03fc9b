use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::{guild_only_message, usage_message};
use kestrel_core::{Context, Error};
use kestrel_database::impls::ai_config::{get_ai_enabled, set_ai_enabled};
use kestrel_utils::embed::success_embed;
use kestrel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "aitoggle",
    desc: "Enable or disable AI features in this server.",
    category: "ai",
    usage: "k!aitoggle <on|off>",
};

#[poise::command(prefix_command, slash_command, category = "AI")]
pub async fn aitoggle(
    ctx: Context<'_>,
    #[description = "on or off"] state: Option<String>,
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

    let enabled = match state.as_deref().map(str::trim) {
        Some("on") => true,
        Some("off") => false,
        _ => {
            let current = get_ai_enabled(db, guild_id.get()).await?;
            ctx.say(format!(
                "AI features are currently **{}**. {}",
                if current { "enabled" } else { "disabled" },
                usage_message(META.usage)
            ))
            .await?;
            return Ok(());
        }
    };

    set_ai_enabled(db, guild_id.get(), enabled).await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "AI Toggle",
        format!(
            "AI features are now **{}** in this server.",
            if enabled { "enabled" } else { "disabled" }
        ),
    )))
    .await?;

    Ok(())
}
