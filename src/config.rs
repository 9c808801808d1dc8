//! Runtime configuration.
//!
//! Values come from command-line flags first, then environment variables, then
//! built-in defaults. Unknown flags are ignored; malformed values are errors.

use crate::leaderboard::service::DEFAULT_LEADERBOARD;

use anyhow::{Context, Result, anyhow, bail};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_IP: [u8; 4] = [127, 0, 0, 1];
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_SCAN_COUNT: usize = 100;

/// Which `StoreClient` backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Redis,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreKind::Redis),
            "memory" => Ok(StoreKind::Memory),
            other => bail!("unknown store '{}' (expected 'redis' or 'memory')", other),
        }
    }
}

/// Expiration applied by the HTTP cache endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    /// `/cache/set` values.
    pub value_ttl: Duration,
    /// `/product/save` objects.
    pub object_ttl: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            value_ttl: Duration::from_secs(10 * 60),
            object_ttl: Duration::from_secs(30 * 60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub redis_url: String,
    pub store: StoreKind,
    /// Upper bound on every store round trip.
    pub call_timeout: Duration,
    /// `COUNT` hint for each `SCAN` round.
    pub scan_count: usize,
    pub leaderboard: String,
    pub log_level: tracing::Level,
    pub ttl: TtlPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((DEFAULT_BIND_IP, DEFAULT_PORT)),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            store: StoreKind::Redis,
            call_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            scan_count: DEFAULT_SCAN_COUNT,
            leaderboard: DEFAULT_LEADERBOARD.to_string(),
            log_level: tracing::Level::INFO,
            ttl: TtlPolicy::default(),
        }
    }
}

impl Settings {
    /// Reads the process arguments and environment.
    pub fn load() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&args, |name| std::env::var(name).ok())
    }

    /// `args[0]` is the program name. `env` looks up an environment variable.
    pub fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(v) = env("RANKCACHE_BIND") {
            settings.bind_addr = parse_bind(&v)?;
        }
        if let Some(v) = env("REDIS_URL") {
            settings.redis_url = v;
        }
        if let Some(v) = env("RANKCACHE_STORE") {
            settings.store = v.parse()?;
        }
        if let Some(v) = env("RANKCACHE_TIMEOUT_MS") {
            settings.call_timeout = parse_timeout(&v)?;
        }
        if let Some(v) = env("RANKCACHE_SCAN_COUNT") {
            settings.scan_count = parse_scan_count(&v)?;
        }
        if let Some(v) = env("RANKCACHE_LEADERBOARD") {
            settings.leaderboard = v;
        }
        if let Some(v) = env("RANKCACHE_LOG") {
            settings.log_level = parse_level(&v)?;
        }

        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            let next = args.get(i + 1);
            let value = || next.ok_or_else(|| anyhow!("{} requires a value", flag));
            match flag {
                "--bind" => settings.bind_addr = parse_bind(value()?)?,
                "--redis" => settings.redis_url = value()?.clone(),
                "--store" => settings.store = value()?.parse()?,
                "--timeout-ms" => settings.call_timeout = parse_timeout(value()?)?,
                "--scan-count" => settings.scan_count = parse_scan_count(value()?)?,
                "--leaderboard" => settings.leaderboard = value()?.clone(),
                "--log-level" => settings.log_level = parse_level(value()?)?,
                _ => {
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        if settings.leaderboard.is_empty() {
            bail!("leaderboard name must not be empty");
        }

        Ok(settings)
    }
}

fn parse_bind(value: &str) -> Result<SocketAddr> {
    value
        .parse()
        .with_context(|| format!("invalid bind address '{}'", value))
}

fn parse_timeout(value: &str) -> Result<Duration> {
    let ms: u64 = value
        .parse()
        .with_context(|| format!("invalid timeout '{}'", value))?;
    if ms == 0 {
        bail!("timeout must be greater than zero");
    }
    Ok(Duration::from_millis(ms))
}

fn parse_scan_count(value: &str) -> Result<usize> {
    let count: usize = value
        .parse()
        .with_context(|| format!("invalid scan count '{}'", value))?;
    if count == 0 {
        bail!("scan count must be greater than zero");
    }
    Ok(count)
}

fn parse_level(value: &str) -> Result<tracing::Level> {
    value
        .parse()
        .map_err(|_| anyhow!("invalid log level '{}'", value))
}
