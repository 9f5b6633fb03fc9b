mod noop_store;
mod redis_store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use noop_store::NoopCacheStore;
use redis_store::RedisCacheStore;

/// TTL for cached per-guild configuration rows (prefix, modlog channel, ...).
pub const CONFIG_CACHE_TTL: Duration = Duration::from_secs(300);

/// TTL for cached restriction lookups. Short: the gate runs on every command
/// and writes invalidate explicitly, so this only bounds cross-process skew.
pub const RESTRICTION_CACHE_TTL: Duration = Duration::from_secs(60);

pub const DEFAULT_AI_MENTION_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
pub const DEFAULT_AI_MENTION_RATE_LIMIT_MAX_HITS: u64 = 4;

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled(NoopCacheStore),
    Redis(RedisCacheStore),
}

#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
    ai_rate_limit_window: Duration,
    ai_rate_limit_max_hits: u64,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled(NoopCacheStore),
            ai_rate_limit_window: DEFAULT_AI_MENTION_RATE_LIMIT_WINDOW,
            ai_rate_limit_max_hits: DEFAULT_AI_MENTION_RATE_LIMIT_MAX_HITS,
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
            ai_rate_limit_window: DEFAULT_AI_MENTION_RATE_LIMIT_WINDOW,
            ai_rate_limit_max_hits: DEFAULT_AI_MENTION_RATE_LIMIT_MAX_HITS,
        })
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    pub fn configure_ai_rate_limit(&mut self, window: Duration, max_hits: u64) {
        self.ai_rate_limit_window = window.max(Duration::from_secs(1));
        self.ai_rate_limit_max_hits = max_hits.max(1);
    }

    pub fn ai_rate_limit_window(&self) -> Duration {
        self.ai_rate_limit_window
    }

    pub fn ai_rate_limit_max_hits(&self) -> u64 {
        self.ai_rate_limit_max_hits
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(_) => Ok(()),
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            CacheBackend::Disabled(store) => store.get(key).await,
            CacheBackend::Redis(store) => store.get(key).await,
        }?;

        match value {
            Some(bytes) => {
                let parsed = serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let ttl_seconds = ttl.as_secs().max(1);
        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;

        match &self.backend {
            CacheBackend::Disabled(store) => store.set(key, payload, ttl_seconds).await,
            CacheBackend::Redis(store) => store.set(key, payload, ttl_seconds).await,
        }
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(store) => store.del(key).await,
            CacheBackend::Redis(store) => store.del(key).await,
        }
    }

    /// Increment a windowed counter, starting the window on the first hit.
    ///
    /// The disabled backend always reports the first hit, which makes every
    /// rate-limited path permissive in DB-only mode.
    pub async fn increment_with_window(&self, key: &str, window: Duration) -> anyhow::Result<u64> {
        let window_seconds = window.as_secs().max(1);
        match &self.backend {
            CacheBackend::Disabled(store) => store.incr(key, window_seconds).await,
            CacheBackend::Redis(store) => store.incr(key, window_seconds).await,
        }
    }

    pub async fn get_or_load_json<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(
                ?e,
                cache_key = key,
                "cache get failed; falling back to database"
            ),
        }

        let loaded = loader().await?;

        if let Err(e) = self.set_json(key, &loaded, ttl).await {
            warn!(
                ?e,
                cache_key = key,
                "cache set failed; returning database value"
            );
        }

        Ok(loaded)
    }
}

pub fn guild_prefix_key(cache: &CacheService, guild_id: u64) -> String {
    cache.key(format!("prefix:{guild_id}"))
}

pub fn modlog_channel_key(cache: &CacheService, guild_id: u64) -> String {
    cache.key(format!("modlog:{guild_id}"))
}

pub fn verification_role_key(cache: &CacheService, guild_id: u64) -> String {
    cache.key(format!("verifyrole:{guild_id}"))
}

pub fn guild_restriction_key(cache: &CacheService, guild_id: u64, user_id: u64) -> String {
    cache.key(format!("restriction:{guild_id}:{user_id}"))
}

pub fn global_restriction_key(cache: &CacheService, user_id: u64) -> String {
    cache.key(format!("restriction:global:{user_id}"))
}

pub fn ai_mention_rate_limit_key(
    cache: &CacheService,
    guild_id: u64,
    channel_id: u64,
    user_id: u64,
) -> String {
    cache.key(format!("ai-mention:{guild_id}:{channel_id}:{user_id}"))
}

pub async fn invalidate_guild_prefix(cache: &CacheService, guild_id: u64) -> anyhow::Result<()> {
    cache.del(&guild_prefix_key(cache, guild_id)).await
}

pub async fn invalidate_modlog_channel(cache: &CacheService, guild_id: u64) -> anyhow::Result<()> {
    cache.del(&modlog_channel_key(cache, guild_id)).await
}

pub async fn invalidate_verification_role(
    cache: &CacheService,
    guild_id: u64,
) -> anyhow::Result<()> {
    cache.del(&verification_role_key(cache, guild_id)).await
}

pub async fn invalidate_restriction(
    cache: &CacheService,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<()> {
    cache
        .del(&guild_restriction_key(cache, guild_id, user_id))
        .await?;
    cache.del(&global_restriction_key(cache, user_id)).await
}
