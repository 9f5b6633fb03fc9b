use rand::seq::IndexedRandom;

use crate::CommandMeta;
use crate::embeds::usage_message;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "rps",
    desc: "Play rock, paper, scissors against the bot.",
    category: "fun",
    usage: "k!rps <rock|paper|scissors>",
};

const CHOICES: &[&str] = &["rock", "paper", "scissors"];

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn rps(
    ctx: Context<'_>,
    #[description = "rock, paper, or scissors"] choice: Option<String>,
) -> Result<(), Error> {
    let player = choice.as_deref().map(str::trim).map(str::to_lowercase);
    let Some(player) = player.filter(|choice| CHOICES.contains(&choice.as_str())) else {
        ctx.say(format!(
            "Choose rock, paper, or scissors! {}",
            usage_message(META.usage)
        ))
        .await?;
        return Ok(());
    };

    let bot = CHOICES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("rock");

    let outcome = outcome_label(&player, bot);

    ctx.send(poise::CreateReply::default().embed(info_embed(
        "Rock, Paper, Scissors",
        format!(
            "You chose **{}**, I chose **{}**.\n{}",
            player, bot, outcome
        ),
    )))
    .await?;

    Ok(())
}

fn outcome_label(player: &str, bot: &str) -> &'static str {
    if player == bot {
        return "It's a tie!";
    }

    let player_wins = matches!(
        (player, bot),
        ("rock", "scissors") | ("paper", "rock") | ("scissors", "paper")
    );

    if player_wins { "You win!" } else { "I win!" }
}

#[cfg(test)]
mod tests {
    use super::outcome_label;

    #[test]
    fn ties_are_ties() {
        assert_eq!(outcome_label("rock", "rock"), "It's a tie!");
    }

    #[test]
    fn player_beats_bot() {
        assert_eq!(outcome_label("rock", "scissors"), "You win!");
        assert_eq!(outcome_label("paper", "rock"), "You win!");
        assert_eq!(outcome_label("scissors", "paper"), "You win!");
    }

    #[test]
    fn bot_beats_player() {
        assert_eq!(outcome_label("rock", "paper"), "I win!");
        assert_eq!(outcome_label("paper", "scissors"), "I win!");
        assert_eq!(outcome_label("scissors", "rock"), "I win!");
    }
}
