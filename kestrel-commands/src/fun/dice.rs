use rand::Rng;

use crate::CommandMeta;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "dice",
    desc: "Roll a dice with the given number of sides.",
    category: "fun",
    usage: "k!dice [sides]",
};

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn dice(
    ctx: Context<'_>,
    #[description = "Number of sides (2-100, default 6)"] sides: Option<u32>,
) -> Result<(), Error> {
    let sides = sides.unwrap_or(6);
    if !(2..=100).contains(&sides) {
        ctx.say("Dice must have between 2 and 100 sides.").await?;
        return Ok(());
    }

    let result = rand::rng().random_range(1..=sides);

    ctx.send(poise::CreateReply::default().embed(info_embed(
        "Dice Roll",
        format!("You rolled a **{}** on a {}-sided dice!", result, sides),
    )))
    .await?;

    Ok(())
}
