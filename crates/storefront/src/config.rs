use anyhow::{Context, Result, anyhow};
use shared::config::RedisConfig;
use std::str::FromStr;

/// How checkout prices the purchased lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricingPolicy {
    /// Trust the line totals the client sent.
    #[default]
    ClientSnapshot,
    /// Re-read every unit price from the catalog.
    CatalogRecompute,
}

impl FromStr for PricingPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(PricingPolicy::ClientSnapshot),
            "catalog" => Ok(PricingPolicy::CatalogRecompute),
            other => Err(anyhow!(
                "CHECKOUT_PRICING must be 'client' or 'catalog', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub redis: RedisConfig,
    pub session_ttl_minutes: i64,
    pub checkout_pricing: PricingPolicy,
    pub otel_endpoint: String,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let run_migrations_str =
            lookup("RUN_MIGRATIONS").context("Missing environment variable: RUN_MIGRATIONS")?;
        let port_str = lookup("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = parse_or(&lookup, "DB_MIN_CONN", 1u32)?;
        let db_max_conn = parse_or(&lookup, "DB_MAX_CONN", 5u32)?;

        let redis = RedisConfig::new(
            lookup("REDIS_HOST").unwrap_or_else(|| "redis".to_string()),
            parse_or(&lookup, "REDIS_PORT", 6379u16)?,
            parse_or(&lookup, "REDIS_DB", 0u8)?,
            lookup("REDIS_PASSWORD").filter(|p| !p.is_empty()),
        );

        let session_ttl_minutes = parse_or(&lookup, "SESSION_TTL_MINUTES", 20160i64)?;
        if session_ttl_minutes <= 0 {
            return Err(anyhow!("SESSION_TTL_MINUTES must be positive"));
        }

        let checkout_pricing = match lookup("CHECKOUT_PRICING") {
            Some(value) => value.parse::<PricingPolicy>()?,
            None => PricingPolicy::default(),
        };

        let otel_endpoint = lookup("OTEL_ENDPOINT")
            .unwrap_or_else(|| "http://otel-collector:4317".to_string());

        Ok(Self {
            database_url,
            run_migrations,
            port,
            db_min_conn,
            db_max_conn,
            redis,
            session_ttl_minutes,
            checkout_pricing,
            otel_endpoint,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{value}'")),
        None => Ok(default),
    }
}
