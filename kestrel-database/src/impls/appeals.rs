use anyhow::Context as _;

use crate::{database::Database, impls::now_unix_secs};

/// A denied appeal locks out new appeals for this long.
pub const APPEAL_COOLDOWN_SECS: u64 = 15 * 60;

/// Arm the cooldown after a denial.
pub async fn arm_cooldown(db: &Database, guild_id: u64, user_id: u64) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let denied_at_i64 = i64::try_from(now_unix_secs()).context("denied_at out of i64 range")?;

    sqlx::query(
        "INSERT INTO appeal_cooldowns (guild_id, user_id, denied_at)
         VALUES ($1, $2, $3)
         ON CONFLICT (guild_id, user_id) DO UPDATE SET denied_at = excluded.denied_at",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(denied_at_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Seconds until the user may appeal again, or `None` when allowed now.
pub async fn cooldown_remaining(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<Option<u64>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let denied_at: Option<i64> = sqlx::query_scalar(
        "SELECT denied_at FROM appeal_cooldowns WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    let Some(denied_at) = denied_at else {
        return Ok(None);
    };

    let denied_at = u64::try_from(denied_at).context("denied_at row out of u64 range")?;
    let elapsed = now_unix_secs().saturating_sub(denied_at);

    if elapsed < APPEAL_COOLDOWN_SECS {
        Ok(Some(APPEAL_COOLDOWN_SECS - elapsed))
    } else {
        Ok(None)
    }
}
