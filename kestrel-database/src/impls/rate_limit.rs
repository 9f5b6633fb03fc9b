use crate::cache::ai_mention_rate_limit_key;
use crate::database::Database;

/// Windowed per-user limit on AI mention replies.
pub async fn ai_mention_within_limit(
    db: &Database,
    guild_id: u64,
    channel_id: u64,
    user_id: u64,
) -> anyhow::Result<bool> {
    let cache = db.cache();
    let key = ai_mention_rate_limit_key(cache, guild_id, channel_id, user_id);
    let count = cache
        .increment_with_window(&key, cache.ai_rate_limit_window())
        .await?;

    Ok(count <= cache.ai_rate_limit_max_hits())
}
