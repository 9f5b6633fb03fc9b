mod client;
mod prompt;

pub use client::OpenRouterService;
pub use prompt::{chat_system_prompt, mention_system_prompt};
