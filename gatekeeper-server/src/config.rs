use std::env;

/// Deployment environment, selects the ingestion endpoint's behavior
/// (`json` mode pretty-prints instead of processing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlaskEnv {
    Development,
    Production,
    Json,
}

impl FlaskEnv {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("FLASK_ENV must be development|production|json, got {other:?}"),
        }
    }
}

/// Typed application configuration, loaded once at startup from the
/// environment. Required variables fail fast rather than falling back
/// to a silent default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub flask_env: FlaskEnv,
    pub secret_key: String,
    /// The reference source disagrees on 3000 vs 3600 as the nominal
    /// cell voltage; the production variant (3600) is the default here.
    pub battery_max_millivolts: u32,
    /// Close a stale open permanence log before opening a new one on a
    /// repeated `entering` event, instead of stacking a second open
    /// row.
    pub close_stale_open_logs: bool,
    pub db_pool_min: u32,
    pub db_pool_max: u32,
    pub db_pool_acquire_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: require_env("DATABASE_URL")?,
            port: require_env("FLASK_PORT")?
                .parse()
                .map_err(|e| anyhow::anyhow!("FLASK_PORT must be a u16: {e}"))?,
            flask_env: FlaskEnv::parse(&require_env("FLASK_ENV")?)?,
            secret_key: require_env("SECRET_KEY")?,
            battery_max_millivolts: optional_env("BATTERY_MAX_MILLIVOLTS", 3600)?,
            close_stale_open_logs: optional_env("CLOSE_STALE_OPEN_LOGS", true)?,
            db_pool_min: optional_env("DB_POOL_MIN", 4)?,
            db_pool_max: optional_env("DB_POOL_MAX", 20)?,
            db_pool_acquire_timeout_secs: optional_env("DB_POOL_ACQUIRE_TIMEOUT_SECS", 30)?,
        })
    }
}

fn require_env(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("missing required environment variable {key}"))
}

fn optional_env<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} is not a valid value: {e}")),
        Err(_) => Ok(default),
    }
}
