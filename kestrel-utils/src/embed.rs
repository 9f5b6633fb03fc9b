use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x4E_6E_8E;
/// Color for confirmations and applied actions.
pub const SUCCESS_EMBED_COLOR: u32 = 0x43_A0_47;
/// Color for rejections and failures.
pub const ERROR_EMBED_COLOR: u32 = 0xC6_28_28;

pub fn info_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
}

pub fn success_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(SUCCESS_EMBED_COLOR)
        .description(description)
}

pub fn error_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(ERROR_EMBED_COLOR)
        .description(description)
}
