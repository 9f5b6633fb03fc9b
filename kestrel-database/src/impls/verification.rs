use anyhow::Context as _;

use crate::{database::Database, impls::now_unix_secs};

pub async fn is_verified(db: &Database, guild_id: u64, user_id: u64) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let verified: Option<bool> = sqlx::query_scalar(
        "SELECT verified FROM verification WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    Ok(verified.unwrap_or(false))
}

pub async fn set_verified(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    verified: bool,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let updated_at_i64 = i64::try_from(now_unix_secs()).context("updated_at out of i64 range")?;

    sqlx::query(
        "INSERT INTO verification (guild_id, user_id, verified, updated_at)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (guild_id, user_id) DO UPDATE SET
            verified = excluded.verified,
            updated_at = excluded.updated_at",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(verified)
    .bind(updated_at_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}
