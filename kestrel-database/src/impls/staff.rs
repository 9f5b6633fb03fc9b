use anyhow::Context as _;

use crate::{database::Database, impls::now_unix_secs, model::staff::StaffEntry};

#[derive(sqlx::FromRow)]
struct StaffRow {
    user_id: i64,
    reason: String,
    granted_by: i64,
    created_at: i64,
}

pub async fn add_admin(
    db: &Database,
    user_id: u64,
    reason: &str,
    granted_by: u64,
) -> anyhow::Result<()> {
    insert_staff(db, "bot_admins", user_id, reason, granted_by).await
}

pub async fn remove_admin(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    delete_staff(db, "bot_admins", user_id).await
}

pub async fn is_admin(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    exists_staff(db, "bot_admins", user_id).await
}

pub async fn list_admins(db: &Database) -> anyhow::Result<Vec<StaffEntry>> {
    list_staff(db, "bot_admins").await
}

pub async fn add_owner(
    db: &Database,
    user_id: u64,
    reason: &str,
    granted_by: u64,
) -> anyhow::Result<()> {
    insert_staff(db, "bot_owners", user_id, reason, granted_by).await
}

pub async fn remove_owner(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    delete_staff(db, "bot_owners", user_id).await
}

pub async fn is_owner(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    exists_staff(db, "bot_owners", user_id).await
}

pub async fn list_owners(db: &Database) -> anyhow::Result<Vec<StaffEntry>> {
    list_staff(db, "bot_owners").await
}

// The two registries share a shape; `table` is always a literal above, never
// user input.
async fn insert_staff(
    db: &Database,
    table: &'static str,
    user_id: u64,
    reason: &str,
    granted_by: u64,
) -> anyhow::Result<()> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let granted_by_i64 = i64::try_from(granted_by).context("granted_by out of i64 range")?;
    let created_at_i64 = i64::try_from(now_unix_secs()).context("created_at out of i64 range")?;

    let sql = format!(
        "INSERT INTO {table} (user_id, reason, granted_by, created_at)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (user_id) DO UPDATE SET
            reason = excluded.reason,
            granted_by = excluded.granted_by"
    );

    sqlx::query(&sql)
        .bind(user_id_i64)
        .bind(reason)
        .bind(granted_by_i64)
        .bind(created_at_i64)
        .execute(db.pool())
        .await?;

    Ok(())
}

async fn delete_staff(db: &Database, table: &'static str, user_id: u64) -> anyhow::Result<bool> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let sql = format!("DELETE FROM {table} WHERE user_id = $1");
    let deleted = sqlx::query(&sql)
        .bind(user_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

async fn exists_staff(db: &Database, table: &'static str, user_id: u64) -> anyhow::Result<bool> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let sql = format!("SELECT user_id FROM {table} WHERE user_id = $1");
    let found: Option<i64> = sqlx::query_scalar(&sql)
        .bind(user_id_i64)
        .fetch_optional(db.pool())
        .await?;

    Ok(found.is_some())
}

async fn list_staff(db: &Database, table: &'static str) -> anyhow::Result<Vec<StaffEntry>> {
    let sql = format!(
        "SELECT user_id, reason, granted_by, created_at FROM {table} ORDER BY created_at DESC"
    );
    let rows: Vec<StaffRow> = sqlx::query_as(&sql).fetch_all(db.pool()).await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(StaffEntry {
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            reason: row.reason,
            granted_by: u64::try_from(row.granted_by).context("granted_by row out of u64 range")?,
            created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
        });
    }

    Ok(out)
}
