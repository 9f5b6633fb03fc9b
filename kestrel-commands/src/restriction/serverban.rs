use crate::CommandMeta;
use crate::embeds::usage_message;
use crate::restriction::checks::is_bot_owner;
use kestrel_core::{Context, Error};
use kestrel_database::impls::server_bans::{
    add_server_ban, get_server_ban, remove_server_ban,
};
use kestrel_utils::embed::{error_embed, success_embed};

pub const BAN_META: CommandMeta = CommandMeta {
    name: "serverban",
    desc: "Ban an entire server from using bot commands.",
    category: "restriction",
    usage: "k!serverban <server_id> [reason]",
};

pub const UNBAN_META: CommandMeta = CommandMeta {
    name: "serverunban",
    desc: "Lift a server-wide command ban.",
    category: "restriction",
    usage: "k!serverunban <server_id>",
};

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn serverban(
    ctx: Context<'_>,
    #[description = "The server id to ban"] server_id: Option<u64>,
    #[description = "Reason for the ban"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    if !is_bot_owner(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot owners can use this command.",
        )))
        .await?;
        return Ok(());
    }

    let Some(server_id) = server_id else {
        ctx.say(usage_message(BAN_META.usage)).await?;
        return Ok(());
    };

    let reason_text = reason.as_deref().unwrap_or("No reason provided");
    add_server_ban(
        &ctx.data().db,
        server_id,
        reason_text,
        ctx.author().id.get(),
    )
    .await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Server Command Ban",
        format!(
            "**Server :** {}\n**Reason :** {}\n\nNo commands will run in that server until the ban is lifted.",
            server_id,
            reason_text.replace('@', "@\u{200B}"),
        ),
    )))
    .await?;

    Ok(())
}

#[poise::command(prefix_command, slash_command, category = "Restriction")]
pub async fn serverunban(
    ctx: Context<'_>,
    #[description = "The server id to unban"] server_id: Option<u64>,
) -> Result<(), Error> {
    if !is_bot_owner(ctx.data(), ctx.author().id.get()).await? {
        ctx.send(poise::CreateReply::default().embed(error_embed(
            "Access Denied",
            "Only bot owners can use this command.",
        )))
        .await?;
        return Ok(());
    }

    let Some(server_id) = server_id else {
        ctx.say(usage_message(UNBAN_META.usage)).await?;
        return Ok(());
    };

    if get_server_ban(&ctx.data().db, server_id).await?.is_none() {
        ctx.say("That server is not command banned.").await?;
        return Ok(());
    }

    remove_server_ban(&ctx.data().db, server_id).await?;

    ctx.send(poise::CreateReply::default().embed(success_embed(
        "Server Command Unban",
        format!("Commands are available again in server {}.", server_id),
    )))
    .await?;

    Ok(())
}
