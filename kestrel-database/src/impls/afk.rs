use anyhow::Context as _;

use crate::{database::Database, impls::now_unix_secs, model::afk::AfkEntry};

#[derive(sqlx::FromRow)]
struct AfkRow {
    message: String,
    since: i64,
}

pub async fn set_afk(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    message: &str,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let since_i64 = i64::try_from(now_unix_secs()).context("since out of i64 range")?;

    sqlx::query(
        "INSERT INTO afk_status (guild_id, user_id, message, since)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (guild_id, user_id) DO UPDATE SET
            message = excluded.message,
            since = excluded.since",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(message)
    .bind(since_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn clear_afk(db: &Database, guild_id: u64, user_id: u64) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM afk_status WHERE guild_id = $1 AND user_id = $2")
        .bind(guild_id_i64)
        .bind(user_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

pub async fn get_afk(db: &Database, guild_id: u64, user_id: u64) -> anyhow::Result<Option<AfkEntry>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let row: Option<AfkRow> = sqlx::query_as(
        "SELECT message, since FROM afk_status WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(|row| {
        Ok(AfkEntry {
            message: row.message,
            since: u64::try_from(row.since).context("since row out of u64 range")?,
        })
    })
    .transpose()
}
