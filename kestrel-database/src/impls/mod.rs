pub mod afk;
pub mod ai_config;
pub mod app_settings;
pub mod appeals;
pub mod guild_flags;
pub mod guild_settings;
pub mod mod_log;
pub mod rate_limit;
pub mod restrictions;
pub mod server_bans;
pub mod staff;
pub mod verification;

use std::time::{SystemTime, UNIX_EPOCH};

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
