use anyhow::Context as _;
use tracing::warn;

use crate::{
    cache::{
        RESTRICTION_CACHE_TTL, global_restriction_key, guild_restriction_key,
        invalidate_restriction,
    },
    database::Database,
    impls::now_unix_secs,
    model::restriction::{RestrictionDecision, RestrictionKind, RestrictionRecord, evaluate},
};

pub struct NewRestriction<'a> {
    pub guild_id: u64,
    pub user_id: u64,
    pub kind: RestrictionKind,
    pub reason: &'a str,
    pub expires_at: Option<u64>,
    pub moderator_id: u64,
    pub is_global: bool,
}

#[derive(sqlx::FromRow)]
struct RestrictionRow {
    guild_id: i64,
    user_id: i64,
    kind: String,
    reason: String,
    expires_at: Option<i64>,
    moderator_id: i64,
    is_global: bool,
    created_at: i64,
}

/// Insert or replace a restriction for `(guild, user)`.
pub async fn upsert_restriction(
    db: &Database,
    new_restriction: NewRestriction<'_>,
) -> anyhow::Result<()> {
    let guild_id_i64 =
        i64::try_from(new_restriction.guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(new_restriction.user_id).context("user_id out of i64 range")?;
    let moderator_id_i64 =
        i64::try_from(new_restriction.moderator_id).context("moderator_id out of i64 range")?;
    let expires_at_i64 = new_restriction
        .expires_at
        .map(i64::try_from)
        .transpose()
        .context("expires_at out of i64 range")?;
    let created_at_i64 = i64::try_from(now_unix_secs()).context("created_at out of i64 range")?;

    sqlx::query(
        "INSERT INTO command_restrictions (guild_id, user_id, kind, reason, expires_at, moderator_id, is_global, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         ON CONFLICT (guild_id, user_id) DO UPDATE SET
            kind = excluded.kind,
            reason = excluded.reason,
            expires_at = excluded.expires_at,
            moderator_id = excluded.moderator_id,
            is_global = excluded.is_global,
            created_at = excluded.created_at",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(new_restriction.kind.as_str())
    .bind(new_restriction.reason)
    .bind(expires_at_i64)
    .bind(moderator_id_i64)
    .bind(new_restriction.is_global)
    .bind(created_at_i64)
    .execute(db.pool())
    .await?;

    invalidate_restriction(db.cache(), new_restriction.guild_id, new_restriction.user_id).await?;

    Ok(())
}

/// Delete the guild-scoped record. Returns whether a row existed.
pub async fn remove_guild_restriction(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<bool> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let deleted =
        sqlx::query("DELETE FROM command_restrictions WHERE guild_id = $1 AND user_id = $2")
            .bind(guild_id_i64)
            .bind(user_id_i64)
            .execute(db.pool())
            .await?
            .rows_affected();

    invalidate_restriction(db.cache(), guild_id, user_id).await?;

    Ok(deleted > 0)
}

/// Delete the user's global record wherever it was issued.
pub async fn remove_global_restriction(db: &Database, user_id: u64) -> anyhow::Result<bool> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let deleted =
        sqlx::query("DELETE FROM command_restrictions WHERE user_id = $1 AND is_global = 1")
            .bind(user_id_i64)
            .execute(db.pool())
            .await?
            .rows_affected();

    // The issuing guild is unknown here; dropping the global key is enough
    // because guild-scoped cache entries never hold global records.
    db.cache()
        .del(&global_restriction_key(db.cache(), user_id))
        .await?;

    Ok(deleted > 0)
}

pub async fn get_global_restriction(
    db: &Database,
    user_id: u64,
) -> anyhow::Result<Option<RestrictionRecord>> {
    let cache_key = global_restriction_key(db.cache(), user_id);
    db.cache()
        .get_or_load_json(&cache_key, RESTRICTION_CACHE_TTL, || async {
            let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

            let row: Option<RestrictionRow> = sqlx::query_as(
                "SELECT guild_id, user_id, kind, reason, expires_at, moderator_id, is_global, created_at
                 FROM command_restrictions
                 WHERE user_id = $1 AND is_global = 1",
            )
            .bind(user_id_i64)
            .fetch_optional(db.pool())
            .await?;

            row.map(to_record).transpose()
        })
        .await
}

pub async fn get_guild_restriction(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<Option<RestrictionRecord>> {
    let cache_key = guild_restriction_key(db.cache(), guild_id, user_id);
    db.cache()
        .get_or_load_json(&cache_key, RESTRICTION_CACHE_TTL, || async {
            let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
            let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

            let row: Option<RestrictionRow> = sqlx::query_as(
                "SELECT guild_id, user_id, kind, reason, expires_at, moderator_id, is_global, created_at
                 FROM command_restrictions
                 WHERE guild_id = $1 AND user_id = $2 AND is_global = 0",
            )
            .bind(guild_id_i64)
            .bind(user_id_i64)
            .fetch_optional(db.pool())
            .await?;

            row.map(to_record).transpose()
        })
        .await
}

/// Resolve the restriction that currently applies to a user in a guild.
///
/// Global records win over guild-scoped ones. Lapsed records are deleted on
/// the way out, so callers only ever see enforceable restrictions.
pub async fn lookup_active(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<Option<RestrictionRecord>> {
    let record = match get_global_restriction(db, user_id).await? {
        Some(record) => Some(record),
        None => get_guild_restriction(db, guild_id, user_id).await?,
    };

    let Some(record) = record else {
        return Ok(None);
    };

    if matches!(
        evaluate(&record, now_unix_secs()),
        RestrictionDecision::Expired
    ) {
        let removed = if record.is_global {
            remove_global_restriction(db, user_id).await
        } else {
            remove_guild_restriction(db, record.guild_id, user_id).await
        };
        if let Err(source) = removed {
            warn!(?source, user_id, "failed to drop expired restriction");
        }
        return Ok(None);
    }

    Ok(Some(record))
}

/// Page through active command bans visible from a guild: its own records
/// plus every global one.
pub async fn list_command_bans(
    db: &Database,
    guild_id: u64,
    page: u32,
    per_page: u32,
) -> anyhow::Result<Vec<RestrictionRecord>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let per_page_i64 = i64::from(per_page.clamp(1, 50));
    let offset_i64 = i64::from(page.saturating_sub(1)) * per_page_i64;

    let rows: Vec<RestrictionRow> = sqlx::query_as(
        "SELECT guild_id, user_id, kind, reason, expires_at, moderator_id, is_global, created_at
         FROM command_restrictions
         WHERE kind = 'ban' AND (is_global = 1 OR guild_id = $1)
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(guild_id_i64)
    .bind(per_page_i64)
    .bind(offset_i64)
    .fetch_all(db.pool())
    .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(to_record(row)?);
    }

    Ok(out)
}

fn to_record(row: RestrictionRow) -> anyhow::Result<RestrictionRecord> {
    let kind = RestrictionKind::parse(&row.kind)
        .with_context(|| format!("unknown restriction kind `{}`", row.kind))?;

    Ok(RestrictionRecord {
        guild_id: u64::try_from(row.guild_id).context("guild_id row out of u64 range")?,
        user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
        kind,
        reason: row.reason,
        expires_at: row
            .expires_at
            .map(u64::try_from)
            .transpose()
            .context("expires_at row out of u64 range")?,
        moderator_id: u64::try_from(row.moderator_id)
            .context("moderator_id row out of u64 range")?,
        is_global: row.is_global,
        created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
    })
}
