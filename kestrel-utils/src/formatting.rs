/// Convert internal action identifiers to user-facing names.
pub fn action_display_name(action: &str) -> String {
    match action {
        "kick" => "Kick".to_owned(),
        "ban" => "Ban".to_owned(),
        "unban" => "Unban".to_owned(),
        "timeout" => "Timeout".to_owned(),
        "untimeout" => "Untimeout".to_owned(),
        "warn" => "Warn".to_owned(),
        "purge" => "Purge".to_owned(),
        "command_ban" => "Command Ban".to_owned(),
        "command_mute" => "Command Mute".to_owned(),
        "command_unban" => "Command Unban".to_owned(),
        "command_unmute" => "Command Unmute".to_owned(),
        "appeal_approved" => "Appeal Approved".to_owned(),
        "appeal_denied" => "Appeal Denied".to_owned(),
        "wipe" => "Wipe".to_owned(),
        other => {
            let normalized = other.trim();
            if normalized.is_empty() {
                return "Unknown".to_owned();
            }

            normalized
                .split('_')
                .filter(|part| !part.is_empty())
                .map(|part| {
                    let mut chars = part.chars();
                    match chars.next() {
                        Some(first) => {
                            format!(
                                "{}{}",
                                first.to_uppercase(),
                                chars.as_str().to_ascii_lowercase()
                            )
                        }
                        None => String::new(),
                    }
                })
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h, 1d, 1h 30m).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        return if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        };
    }

    if hours > 0 {
        let mut parts = vec![format!("{}h", hours)];
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
        }
        if seconds > 0 {
            parts.push(format!("{}s", seconds));
        }
        return parts.join(" ");
    }

    if minutes > 0 {
        return if seconds > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        };
    }

    format!("{}s", seconds)
}

#[cfg(test)]
mod tests {
    use super::{action_display_name, format_compact_duration};

    #[test]
    fn action_names_are_user_friendly() {
        assert_eq!(action_display_name("kick"), "Kick");
        assert_eq!(action_display_name("command_ban"), "Command Ban");
        assert_eq!(action_display_name("server_ban"), "Server Ban");
        assert_eq!(action_display_name(""), "Unknown");
    }

    #[test]
    fn compact_duration_formatting() {
        assert_eq!(format_compact_duration(59), "59s");
        assert_eq!(format_compact_duration(60), "1m");
        assert_eq!(format_compact_duration(61), "1m 1s");
        assert_eq!(format_compact_duration(3600), "1h");
        assert_eq!(format_compact_duration(3660), "1h 1m");
        assert_eq!(format_compact_duration(3670), "1h 1m 10s");
        assert_eq!(format_compact_duration(86400), "1d");
        assert_eq!(format_compact_duration(90000), "1d 1h");
    }
}
