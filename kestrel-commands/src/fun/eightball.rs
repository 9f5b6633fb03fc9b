use rand::seq::IndexedRandom;

use crate::CommandMeta;
use crate::embeds::usage_message;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "eightball",
    desc: "Ask the magic 8-ball a question.",
    category: "fun",
    usage: "k!eightball <question>",
};

const RESPONSES: &[&str] = &[
    "It is certain",
    "It is decidedly so",
    "Without a doubt",
    "Yes definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy, try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn eightball(
    ctx: Context<'_>,
    #[description = "Your question"]
    #[rest]
    question: Option<String>,
) -> Result<(), Error> {
    let Some(question) = question
        .as_deref()
        .map(str::trim)
        .filter(|question| !question.is_empty())
    else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let response = RESPONSES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Ask again later");

    ctx.send(poise::CreateReply::default().embed(info_embed(
        "Magic 8-Ball",
        format!("**Question :** {}\n**Answer :** {}", question, response),
    )))
    .await?;

    Ok(())
}
