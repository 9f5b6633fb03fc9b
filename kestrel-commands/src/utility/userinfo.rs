use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::embeds::guild_only_message;
use kestrel_core::{Context, Error};
use kestrel_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "userinfo",
    desc: "Display information about a user.",
    category: "utility",
    usage: "k!userinfo [user]",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn userinfo(
    ctx: Context<'_>,
    #[description = "The user to inspect (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let user = user.unwrap_or_else(|| ctx.author().clone());
    let member = guild_id.member(ctx.http(), user.id).await.ok();

    let display_name = user
        .global_name
        .clone()
        .unwrap_or_else(|| user.name.clone());

    let mut embed = serenity::CreateEmbed::new()
        .title(display_name)
        .color(DEFAULT_EMBED_COLOR)
        .thumbnail(user.face())
        .field("Username", user.name.clone(), true)
        .field("ID", user.id.get().to_string(), true)
        .field(
            "Account Created",
            format!("<t:{}:D>", user.id.created_at().unix_timestamp()),
            true,
        );

    if let Some(member) = member {
        if let Some(joined_at) = member.joined_at {
            embed = embed.field(
                "Joined Server",
                format!("<t:{}:D>", joined_at.unix_timestamp()),
                true,
            );
        }
        embed = embed.field("Roles", member.roles.len().to_string(), true);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
