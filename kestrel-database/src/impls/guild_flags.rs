use anyhow::Context as _;

use crate::{database::Database, impls::now_unix_secs};

/// Gates the destructive `wipe` command per guild.
pub const WIPE_ENABLED_FLAG: &str = "wipe_enabled";

pub async fn get_flag(db: &Database, guild_id: u64, flag: &str) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let enabled: Option<bool> =
        sqlx::query_scalar("SELECT enabled FROM guild_flags WHERE guild_id = $1 AND flag = $2")
            .bind(guild_id_i64)
            .bind(flag)
            .fetch_optional(db.pool())
            .await?;

    Ok(enabled.unwrap_or(false))
}

pub async fn set_flag(
    db: &Database,
    guild_id: u64,
    flag: &str,
    enabled: bool,
    updated_by: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let updated_by_i64 = i64::try_from(updated_by).context("updated_by out of i64 range")?;
    let updated_at_i64 = i64::try_from(now_unix_secs()).context("updated_at out of i64 range")?;

    sqlx::query(
        "INSERT INTO guild_flags (guild_id, flag, enabled, updated_by, updated_at)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (guild_id, flag) DO UPDATE SET
            enabled = excluded.enabled,
            updated_by = excluded.updated_by,
            updated_at = excluded.updated_at",
    )
    .bind(guild_id_i64)
    .bind(flag)
    .bind(enabled)
    .bind(updated_by_i64)
    .bind(updated_at_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}
