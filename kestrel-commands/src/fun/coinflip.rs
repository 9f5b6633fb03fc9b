use rand::Rng;

use crate::CommandMeta;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "coinflip",
    desc: "Flip a coin.",
    category: "fun",
    usage: "k!coinflip",
};

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn coinflip(ctx: Context<'_>) -> Result<(), Error> {
    let result = if rand::rng().random_bool(0.5) {
        "Heads"
    } else {
        "Tails"
    };

    ctx.send(poise::CreateReply::default().embed(info_embed(
        "Coin Flip",
        format!("The coin landed on: **{}**", result),
    )))
    .await?;

    Ok(())
}
