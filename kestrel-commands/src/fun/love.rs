use crate::CommandMeta;
use crate::embeds::usage_message;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::info_embed;

pub const META: CommandMeta = CommandMeta {
    name: "love",
    desc: "Calculate love compatibility between two people.",
    category: "fun",
    usage: "k!love <person1> [person2]",
};

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn love(
    ctx: Context<'_>,
    #[description = "First person"] person1: Option<String>,
    #[description = "Second person (defaults to you)"] person2: Option<String>,
) -> Result<(), Error> {
    let Some(person1) = person1
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let author_name = ctx
        .author()
        .global_name
        .clone()
        .unwrap_or_else(|| ctx.author().name.clone());
    let person2 = person2
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(&author_name);

    let score = love_score(person1, person2);
    let verdict = match score {
        90..=100 => "Perfect Match!",
        70..=89 => "Great Compatibility!",
        50..=69 => "Good Potential!",
        30..=49 => "Some Chemistry!",
        _ => "Not Meant to Be...",
    };

    ctx.send(poise::CreateReply::default().embed(info_embed(
        "Love Calculator",
        format!(
            "**{}** + **{}** = **{}%**\n{}",
            person1, person2, score, verdict
        ),
    )))
    .await?;

    Ok(())
}

/// Deterministic 0..=100 score so the same pair always gets the same answer.
fn love_score(person1: &str, person2: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in person1
        .to_lowercase()
        .bytes()
        .chain(person2.to_lowercase().bytes())
    {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01B3);
    }
    hash % 101
}

#[cfg(test)]
mod tests {
    use super::love_score;

    #[test]
    fn scores_are_stable() {
        assert_eq!(love_score("alice", "bob"), love_score("alice", "bob"));
        assert_eq!(love_score("Alice", "BOB"), love_score("alice", "bob"));
    }

    #[test]
    fn scores_stay_in_range() {
        for pair in [("a", "b"), ("long name", "another one"), ("", "")] {
            assert!(love_score(pair.0, pair.1) <= 100);
        }
    }

    #[test]
    fn order_matters_like_concatenation() {
        // "ab" + "c" and "a" + "bc" hash identically; that matches the
        // concatenation the score is defined over.
        assert_eq!(love_score("ab", "c"), love_score("a", "bc"));
    }
}
