use anyhow::Context as _;

use crate::{database::Database, impls::now_unix_secs};

/// Global kill-switch for `wipe`; value `"off"` disables it everywhere.
pub const WIPE_GLOBAL_SETTING: &str = "wipe_global_status";

/// Cross-guild promotion text shown by `promotion`.
pub const PROMOTION_SETTING: &str = "global_promotion";

pub async fn get_setting(db: &Database, name: &str) -> anyhow::Result<Option<String>> {
    let value: Option<String> =
        sqlx::query_scalar("SELECT value FROM app_settings WHERE name = $1")
            .bind(name)
            .fetch_optional(db.pool())
            .await?;

    Ok(value)
}

pub async fn set_setting(
    db: &Database,
    name: &str,
    value: &str,
    updated_by: u64,
) -> anyhow::Result<()> {
    let updated_by_i64 = i64::try_from(updated_by).context("updated_by out of i64 range")?;
    let updated_at_i64 = i64::try_from(now_unix_secs()).context("updated_at out of i64 range")?;

    sqlx::query(
        "INSERT INTO app_settings (name, value, updated_by, updated_at)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (name) DO UPDATE SET
            value = excluded.value,
            updated_by = excluded.updated_by,
            updated_at = excluded.updated_at",
    )
    .bind(name)
    .bind(value)
    .bind(updated_by_i64)
    .bind(updated_at_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}
