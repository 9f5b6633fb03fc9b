mod events;
mod gate;

use std::collections::HashSet;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use kestrel_core::{Data, Error};
use kestrel_database::{
    CacheService, Database, MIGRATOR, cache::DEFAULT_AI_MENTION_RATE_LIMIT_MAX_HITS,
    cache::DEFAULT_AI_MENTION_RATE_LIMIT_WINDOW,
};
use kestrel_llm::OpenRouterService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://kestrel.db".to_owned());
    let owner_ids = parse_owner_ids(env::var("KESTREL_OWNER_IDS").unwrap_or_default());
    if owner_ids.is_empty() {
        warn!("KESTREL_OWNER_IDS is empty; owner-only commands will be unusable.");
    }

    let connect_options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;
    info!("SQLite connection established.");

    let redis_enabled = env_bool("REDIS_ENABLED", false);
    let redis_key_prefix =
        env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "kestrel:prod".to_string());

    let mut cache = if redis_enabled {
        match env::var("REDIS_URL") {
            Ok(redis_url) => match CacheService::redis(&redis_url, redis_key_prefix.clone()) {
                Ok(cache) => {
                    info!(key_prefix = %redis_key_prefix, "Redis cache enabled.");
                    cache
                }
                Err(err) => {
                    warn!(?err, key_prefix = %redis_key_prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
                    CacheService::disabled(redis_key_prefix.clone())
                }
            },
            Err(_) => {
                warn!(key_prefix = %redis_key_prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
                CacheService::disabled(redis_key_prefix.clone())
            }
        }
    } else {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        CacheService::disabled(redis_key_prefix.clone())
    };

    let ai_ratelimit_window_seconds = env_u64(
        "AI_RATELIMIT_WINDOW_SECONDS",
        DEFAULT_AI_MENTION_RATE_LIMIT_WINDOW.as_secs(),
    );
    let ai_ratelimit_max_hits = env_u64(
        "AI_RATELIMIT_MAX_HITS",
        DEFAULT_AI_MENTION_RATE_LIMIT_MAX_HITS,
    );
    cache.configure_ai_rate_limit(
        Duration::from_secs(ai_ratelimit_window_seconds),
        ai_ratelimit_max_hits,
    );

    if cache.is_redis_enabled() {
        if let Err(err) = cache.ping().await {
            warn!(
                ?err,
                "Redis cache ping failed; cache operations will continue with fallback behavior."
            );
        } else {
            info!("Redis cache health check passed.");
        }
    }

    let db = Database::with_cache(db_pool, cache);

    let llm = OpenRouterService::from_env_optional()?;
    if llm.is_some() {
        info!("OpenRouter integration enabled.");
    } else {
        info!("OpenRouter integration disabled (missing OPENROUTER_API_KEY or OPENROUTER_ENABLED=false).");
    }

    let auto_run_migrations = env_bool("AUTO_RUN_MIGRATIONS", true);
    if auto_run_migrations {
        MIGRATOR.run(db.pool()).await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGE_REACTIONS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: kestrel_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            command_check: Some(|ctx| Box::pin(gate::restriction_gate(ctx))),
            prefix_options: poise::PrefixFrameworkOptions {
                dynamic_prefix: Some(|ctx| {
                    Box::pin(async move {
                        let Some(guild_id) = ctx.guild_id else {
                            return Ok(Some(
                                kestrel_utils::DEFAULT_COMMAND_PREFIX.to_string(),
                            ));
                        };

                        let prefix = match kestrel_database::impls::guild_settings::get_prefix(
                            &ctx.data.db,
                            guild_id.get(),
                        )
                        .await
                        {
                            Ok(prefix) => prefix,
                            Err(source) => {
                                error!(?source, "failed to resolve guild prefix");
                                None
                            }
                        };

                        Ok(Some(prefix.unwrap_or_else(|| {
                            kestrel_utils::DEFAULT_COMMAND_PREFIX.to_string()
                        })))
                    })
                }),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let db = db.clone();
            let llm = llm.clone();
            Box::pin(async move {
                info!("Kestrel has awoken!");

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                Ok(Data {
                    db,
                    llm,
                    owner_ids,
                })
            })
        })
        .build();

    info!("Kestrel is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn parse_owner_ids(raw: String) -> HashSet<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .collect()
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(kestrel_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!("Usage: `k!{}`", ctx.command().qualified_name);
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            events::afk::handle_message_afk(ctx, data, new_message).await;
            events::mention_ai::handle_message_mention_ai(ctx, data, new_message).await?;
        }
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            events::appeal_reactions::handle_reaction_appeal(ctx, data, add_reaction).await;
        }
        _ => {}
    }

    Ok(())
}
