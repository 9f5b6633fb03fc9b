use rand::seq::IndexedRandom;

use crate::CommandMeta;
use crate::embeds::usage_message;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "choose",
    desc: "Choose between multiple options.",
    category: "fun",
    usage: "k!choose <option> <option> [...]",
};

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn choose(
    ctx: Context<'_>,
    #[description = "Space-separated options"]
    #[rest]
    options: Option<String>,
) -> Result<(), Error> {
    let choices: Vec<&str> = options
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .collect();

    if choices.len() < 2 {
        ctx.say(format!(
            "Please provide at least 2 options. {}",
            usage_message(META.usage)
        ))
        .await?;
        return Ok(());
    }

    let choice = choices
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(choices[0]);

    ctx.send(poise::CreateReply::default().embed(info_embed(
        "Choice Made",
        format!("I choose: **{}**", choice),
    )))
    .await?;

    Ok(())
}
