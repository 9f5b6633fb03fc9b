use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "avatar",
    desc: "Show someone's avatar.",
    category: "utility",
    usage: "k!avatar [user]",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn avatar(
    ctx: Context<'_>,
    #[description = "Whose avatar to show (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.unwrap_or_else(|| ctx.author().clone());
    let display_name = user
        .global_name
        .clone()
        .unwrap_or_else(|| user.name.clone());

    let embed = serenity::CreateEmbed::new()
        .title(format!("{}'s Avatar", display_name))
        .color(DEFAULT_EMBED_COLOR)
        .image(user.face());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
