use anyhow::Context as _;

use crate::{database::Database, impls::now_unix_secs, model::server_ban::ServerBan};

#[derive(sqlx::FromRow)]
struct ServerBanRow {
    guild_id: i64,
    reason: String,
    banned_by: i64,
    created_at: i64,
}

pub async fn add_server_ban(
    db: &Database,
    guild_id: u64,
    reason: &str,
    banned_by: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let banned_by_i64 = i64::try_from(banned_by).context("banned_by out of i64 range")?;
    let created_at_i64 = i64::try_from(now_unix_secs()).context("created_at out of i64 range")?;

    sqlx::query(
        "INSERT INTO server_command_bans (guild_id, reason, banned_by, created_at)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (guild_id) DO UPDATE SET
            reason = excluded.reason,
            banned_by = excluded.banned_by",
    )
    .bind(guild_id_i64)
    .bind(reason)
    .bind(banned_by_i64)
    .bind(created_at_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

pub async fn remove_server_ban(db: &Database, guild_id: u64) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM server_command_bans WHERE guild_id = $1")
        .bind(guild_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

pub async fn is_server_banned(db: &Database, guild_id: u64) -> anyhow::Result<bool> {
    Ok(get_server_ban(db, guild_id).await?.is_some())
}

pub async fn get_server_ban(db: &Database, guild_id: u64) -> anyhow::Result<Option<ServerBan>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let row: Option<ServerBanRow> = sqlx::query_as(
        "SELECT guild_id, reason, banned_by, created_at
         FROM server_command_bans
         WHERE guild_id = $1",
    )
    .bind(guild_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(|row| {
        Ok(ServerBan {
            guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
            reason: row.reason,
            banned_by: u64::try_from(row.banned_by).context("banned_by row out of u64 range")?,
            created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
        })
    })
    .transpose()
}
