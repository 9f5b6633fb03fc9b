use rand::seq::IndexedRandom;

use crate::CommandMeta;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "joke",
    desc: "Get a random joke.",
    category: "fun",
    usage: "k!joke",
};

const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "Why did the scarecrow win an award? He was outstanding in his field!",
    "Why don't eggs tell jokes? They'd crack each other up!",
    "What do you call a fake noodle? An impasta!",
    "Why did the math book look so sad? Because it had too many problems!",
    "What do you call a bear with no teeth? A gummy bear!",
    "Why can't a bicycle stand up by itself? It's two tired!",
    "What do you call a sleeping bull? A bulldozer!",
    "Why don't skeletons fight each other? They don't have the guts!",
    "What's the best thing about Switzerland? I don't know, but the flag is a big plus!",
];

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn joke(ctx: Context<'_>) -> Result<(), Error> {
    let joke = JOKES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(JOKES[0]);

    ctx.send(poise::CreateReply::default().embed(info_embed("Random Joke", joke)))
        .await?;

    Ok(())
}
