use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::usage_message;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "poll",
    desc: "Start a reaction poll with up to 10 options.",
    category: "utility",
    usage: "k!poll <question> | <option> | <option> [| ...]",
};

const NUMBER_EMOJIS: &[&str] = &[
    "1\u{FE0F}\u{20E3}",
    "2\u{FE0F}\u{20E3}",
    "3\u{FE0F}\u{20E3}",
    "4\u{FE0F}\u{20E3}",
    "5\u{FE0F}\u{20E3}",
    "6\u{FE0F}\u{20E3}",
    "7\u{FE0F}\u{20E3}",
    "8\u{FE0F}\u{20E3}",
    "9\u{FE0F}\u{20E3}",
    "\u{1F51F}",
];

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn poll(
    ctx: Context<'_>,
    #[description = "Question and options separated by |"]
    #[rest]
    input: Option<String>,
) -> Result<(), Error> {
    let parts: Vec<&str> = input
        .as_deref()
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() < 3 {
        ctx.say(format!(
            "A poll needs a question and at least 2 options. {}",
            usage_message(META.usage)
        ))
        .await?;
        return Ok(());
    }

    let Some((question, options)) = parts.split_first() else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if options.len() > NUMBER_EMOJIS.len() {
        ctx.say(format!(
            "Polls support at most {} options.",
            NUMBER_EMOJIS.len()
        ))
        .await?;
        return Ok(());
    }

    let body = options
        .iter()
        .enumerate()
        .map(|(index, option)| format!("{} {}", NUMBER_EMOJIS[index], option))
        .collect::<Vec<_>>()
        .join("\n");

    let reply = ctx
        .send(poise::CreateReply::default().embed(info_embed(question, body)))
        .await?;

    let message = reply.message().await?;
    for emoji in NUMBER_EMOJIS.iter().take(options.len()) {
        message
            .react(
                ctx.http(),
                serenity::ReactionType::Unicode((*emoji).to_owned()),
            )
            .await?;
    }

    Ok(())
}
