use std::time::Duration;

use poise::serenity_prelude as serenity;

use crate::embed::DEFAULT_EMBED_COLOR;

pub const PAGINATION_TIMEOUT_SECS: u64 = 60 * 3;

fn build_page_embed(
    title: &str,
    description: &str,
    page: usize,
    total_pages: usize,
    show_footer: bool,
) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description.to_owned());

    if show_footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page.max(1),
            total_pages.max(1)
        )));
    }

    embed
}

fn pagination_components(
    prev_id: &str,
    next_id: &str,
    current_page: usize,
    total_pages: usize,
) -> Vec<serenity::CreateActionRow> {
    let is_first_page = current_page == 0;
    let is_last_page = current_page + 1 >= total_pages;

    vec![serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(prev_id)
            .label("Prev")
            .disabled(is_first_page)
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new(next_id)
            .label("Next")
            .disabled(is_last_page)
            .style(serenity::ButtonStyle::Secondary),
    ])]
}

/// Send `pages` as a browsable embed with Prev/Next buttons scoped to the
/// invoking user. Falls back to a plain embed for a single page.
pub async fn paginate_embed_pages<U, E>(
    ctx: poise::Context<'_, U, E>,
    title: &str,
    pages: &[String],
    start_page: usize,
) -> Result<(), serenity::Error>
where
    U: Send + Sync,
    E: Send + Sync,
{
    if pages.is_empty() {
        return Ok(());
    }

    let total_pages = pages.len();
    let mut current_page = start_page.clamp(1, total_pages) - 1;

    if total_pages <= 1 {
        ctx.send(poise::CreateReply::default().embed(build_page_embed(
            title,
            &pages[current_page],
            current_page + 1,
            total_pages,
            false,
        )))
        .await?;

        return Ok(());
    }

    let ctx_id = ctx.id();
    let prev_button_id = format!("{}_prev", ctx_id);
    let next_button_id = format!("{}_next", ctx_id);

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(build_page_embed(
                    title,
                    &pages[current_page],
                    current_page + 1,
                    total_pages,
                    true,
                ))
                .components(pagination_components(
                    &prev_button_id,
                    &next_button_id,
                    current_page,
                    total_pages,
                )),
        )
        .await?;

    let message = reply.message().await?;
    let message_id = message.id;

    while let Some(press) = serenity::collector::ComponentInteractionCollector::new(ctx)
        .filter({
            let prefix = format!("{}", ctx_id);
            let author_id = ctx.author().id;
            move |interaction| {
                interaction.data.custom_id.starts_with(&prefix)
                    && interaction.user.id == author_id
                    && interaction.message.id == message_id
            }
        })
        .timeout(Duration::from_secs(PAGINATION_TIMEOUT_SECS))
        .await
    {
        if press.data.custom_id == prev_button_id {
            current_page = current_page.saturating_sub(1);
        } else if press.data.custom_id == next_button_id {
            current_page = (current_page + 1).min(total_pages - 1);
        } else {
            continue;
        }

        press
            .create_response(
                ctx.http(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(build_page_embed(
                            title,
                            &pages[current_page],
                            current_page + 1,
                            total_pages,
                            true,
                        ))
                        .components(pagination_components(
                            &prev_button_id,
                            &next_button_id,
                            current_page,
                            total_pages,
                        )),
                ),
            )
            .await?;
    }

    Ok(())
}
