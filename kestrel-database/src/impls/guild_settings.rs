use anyhow::Context as _;

use crate::cache::{
    CONFIG_CACHE_TTL, guild_prefix_key, invalidate_guild_prefix, invalidate_modlog_channel,
    invalidate_verification_role, modlog_channel_key, verification_role_key,
};
use crate::database::Database;

pub async fn get_prefix(db: &Database, guild_id: u64) -> anyhow::Result<Option<String>> {
    let cache_key = guild_prefix_key(db.cache(), guild_id);
    db.cache()
        .get_or_load_json(&cache_key, CONFIG_CACHE_TTL, || async {
            let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

            let prefix: Option<String> =
                sqlx::query_scalar("SELECT prefix FROM guild_settings WHERE guild_id = $1")
                    .bind(guild_id_i64)
                    .fetch_optional(db.pool())
                    .await?
                    .flatten();

            Ok(prefix)
        })
        .await
}

pub async fn set_prefix(db: &Database, guild_id: u64, prefix: &str) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO guild_settings (guild_id, prefix)
         VALUES ($1, $2)
         ON CONFLICT (guild_id) DO UPDATE SET prefix = excluded.prefix",
    )
    .bind(guild_id_i64)
    .bind(prefix)
    .execute(db.pool())
    .await?;

    invalidate_guild_prefix(db.cache(), guild_id).await?;

    Ok(())
}

pub async fn get_modlog_channel_id(db: &Database, guild_id: u64) -> anyhow::Result<Option<u64>> {
    let cache_key = modlog_channel_key(db.cache(), guild_id);
    db.cache()
        .get_or_load_json(&cache_key, CONFIG_CACHE_TTL, || async {
            let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

            let channel_id: Option<i64> = sqlx::query_scalar(
                "SELECT modlog_channel_id FROM guild_settings WHERE guild_id = $1",
            )
            .bind(guild_id_i64)
            .fetch_optional(db.pool())
            .await?
            .flatten();

            channel_id
                .map(u64::try_from)
                .transpose()
                .context("modlog_channel_id out of u64 range")
        })
        .await
}

pub async fn set_modlog_channel_id(
    db: &Database,
    guild_id: u64,
    channel_id: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let channel_id_i64 = i64::try_from(channel_id).context("channel_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO guild_settings (guild_id, modlog_channel_id)
         VALUES ($1, $2)
         ON CONFLICT (guild_id) DO UPDATE SET modlog_channel_id = excluded.modlog_channel_id",
    )
    .bind(guild_id_i64)
    .bind(channel_id_i64)
    .execute(db.pool())
    .await?;

    invalidate_modlog_channel(db.cache(), guild_id).await?;

    Ok(())
}

pub async fn clear_modlog_channel_id(db: &Database, guild_id: u64) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    sqlx::query("UPDATE guild_settings SET modlog_channel_id = NULL WHERE guild_id = $1")
        .bind(guild_id_i64)
        .execute(db.pool())
        .await?;

    invalidate_modlog_channel(db.cache(), guild_id).await?;

    Ok(())
}

pub async fn get_verification_role_id(
    db: &Database,
    guild_id: u64,
) -> anyhow::Result<Option<u64>> {
    let cache_key = verification_role_key(db.cache(), guild_id);
    db.cache()
        .get_or_load_json(&cache_key, CONFIG_CACHE_TTL, || async {
            let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

            let role_id: Option<i64> = sqlx::query_scalar(
                "SELECT verification_role_id FROM guild_settings WHERE guild_id = $1",
            )
            .bind(guild_id_i64)
            .fetch_optional(db.pool())
            .await?
            .flatten();

            role_id
                .map(u64::try_from)
                .transpose()
                .context("verification_role_id out of u64 range")
        })
        .await
}

pub async fn set_verification_role_id(
    db: &Database,
    guild_id: u64,
    role_id: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let role_id_i64 = i64::try_from(role_id).context("role_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO guild_settings (guild_id, verification_role_id)
         VALUES ($1, $2)
         ON CONFLICT (guild_id) DO UPDATE SET verification_role_id = excluded.verification_role_id",
    )
    .bind(guild_id_i64)
    .bind(role_id_i64)
    .execute(db.pool())
    .await?;

    invalidate_verification_role(db.cache(), guild_id).await?;

    Ok(())
}

pub async fn get_appeal_link(db: &Database, guild_id: u64) -> anyhow::Result<Option<String>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let link: Option<String> =
        sqlx::query_scalar("SELECT appeal_link FROM guild_settings WHERE guild_id = $1")
            .bind(guild_id_i64)
            .fetch_optional(db.pool())
            .await?
            .flatten();

    Ok(link)
}

pub async fn set_appeal_link(db: &Database, guild_id: u64, link: &str) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO guild_settings (guild_id, appeal_link)
         VALUES ($1, $2)
         ON CONFLICT (guild_id) DO UPDATE SET appeal_link = excluded.appeal_link",
    )
    .bind(guild_id_i64)
    .bind(link)
    .execute(db.pool())
    .await?;

    Ok(())
}
