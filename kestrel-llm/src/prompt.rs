use std::{fs, path::Path};

const DEFAULT_CHAT_PROMPT: &str = "You are a helpful assistant in a Discord server. \
Keep responses concise and friendly.";

const DEFAULT_MENTION_PROMPT: &str = "You are a helpful assistant in a Discord server. \
Keep responses concise and friendly. You were mentioned in a message and should respond naturally.";

/// System prompt for the explicit `ask` command. An operator can override it
/// by dropping a `SYSTEM_PROMPT.md` next to the binary.
pub fn chat_system_prompt() -> String {
    let prompt_file = Path::new("SYSTEM_PROMPT.md");
    match fs::read_to_string(prompt_file) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_CHAT_PROMPT.to_owned(),
    }
}

/// System prompt for mention-triggered replies.
pub fn mention_system_prompt() -> String {
    DEFAULT_MENTION_PROMPT.to_owned()
}
