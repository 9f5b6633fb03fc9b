use anyhow::Context as _;

use crate::{database::Database, impls::now_unix_secs, model::mod_log::ModLogEntry};

#[derive(sqlx::FromRow)]
struct ModLogRow {
    case_id: i64,
    user_id: i64,
    moderator_id: i64,
    action: String,
    reason: String,
    created_at: i64,
}

/// Record a moderation action and return its case id.
pub async fn record_action(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    moderator_id: u64,
    action: &str,
    reason: &str,
) -> anyhow::Result<u64> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let moderator_id_i64 = i64::try_from(moderator_id).context("moderator_id out of i64 range")?;
    let created_at_i64 = i64::try_from(now_unix_secs()).context("created_at out of i64 range")?;

    let case_id: i64 = sqlx::query_scalar(
        "INSERT INTO moderation_logs (guild_id, user_id, moderator_id, action, reason, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING case_id",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(moderator_id_i64)
    .bind(action)
    .bind(reason)
    .bind(created_at_i64)
    .fetch_one(db.pool())
    .await?;

    u64::try_from(case_id).context("case_id out of u64 range")
}

/// Recent moderation log rows for a guild, optionally filtered to one target.
pub async fn list_recent(
    db: &Database,
    guild_id: u64,
    user_id: Option<u64>,
    limit: u32,
) -> anyhow::Result<Vec<ModLogEntry>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = user_id
        .map(i64::try_from)
        .transpose()
        .context("user_id out of i64 range")?;
    let limit_i64 = i64::from(limit.clamp(1, 100));

    let rows: Vec<ModLogRow> = sqlx::query_as(
        "SELECT case_id, user_id, moderator_id, action, reason, created_at
         FROM moderation_logs
         WHERE guild_id = $1 AND ($2 IS NULL OR user_id = $2)
         ORDER BY case_id DESC
         LIMIT $3",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(limit_i64)
    .fetch_all(db.pool())
    .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(ModLogEntry {
            case_id: u64::try_from(row.case_id).context("case_id row out of u64 range")?,
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            moderator_id: u64::try_from(row.moderator_id)
                .context("moderator_id row out of u64 range")?,
            action: row.action,
            reason: row.reason,
            created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
        });
    }

    Ok(out)
}
