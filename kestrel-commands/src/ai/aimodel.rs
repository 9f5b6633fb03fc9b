use crate::CommandMeta;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "aimodel",
    desc: "Show which AI models the bot uses.",
    category: "ai",
    usage: "k!aimodel",
};

#[poise::command(prefix_command, slash_command, category = "AI")]
pub async fn aimodel(ctx: Context<'_>) -> Result<(), Error> {
    let embed = match ctx.data().llm.as_ref() {
        Some(llm) => info_embed(
            "AI Model Information",
            format!(
                "**Text Model :** {}\n**Image Model :** {}\n**Provider :** OpenRouter\n\nUse `k!ask` to chat or `k!imagine` to generate images.",
                llm.chat_model(),
                llm.image_model(),
            ),
        ),
        None => info_embed(
            "AI Model Information",
            "AI integration is currently disabled.",
        ),
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
