use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Which key/value backend holds the stock counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" | "moka" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub store: StoreBackend,
    pub redis_url: String,
    pub key_prefix: String,
    /// Seconds substituted when a requested TTL is rejected.
    pub ttl_default: i64,
    /// Exclusive upper bound for accepting a requested TTL.
    pub ttl_max: i64,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
    const DEFAULT_KEY_PREFIX: &str = "stock::";
    const DEFAULT_TTL_SECS: i64 = 3600;
    const MAX_TTL_SECS: i64 = 86400;

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ttl_default = parse_or(&lookup, "REDIS_TTL_DEFAULT", Self::DEFAULT_TTL_SECS);
        if ttl_default <= 0 {
            warn!(
                "REDIS_TTL_DEFAULT must be positive, got {}; using {}",
                ttl_default,
                Self::DEFAULT_TTL_SECS
            );
            ttl_default = Self::DEFAULT_TTL_SECS;
        }

        let mut ttl_max = parse_or(&lookup, "REDIS_TTL_MAX", Self::MAX_TTL_SECS);
        if ttl_max <= 0 {
            warn!(
                "REDIS_TTL_MAX must be positive, got {}; using {}",
                ttl_max,
                Self::MAX_TTL_SECS
            );
            ttl_max = Self::MAX_TTL_SECS;
        }

        Self {
            host: lookup("STOCK_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port: parse_or(&lookup, "STOCK_HTTP_PORT", Self::DEFAULT_HTTP_PORT),
            store: parse_or(&lookup, "STOCK_STORE", StoreBackend::Redis),
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| Self::DEFAULT_REDIS_URL.to_string()),
            key_prefix: lookup("REDIS_PREFIX")
                .unwrap_or_else(|| Self::DEFAULT_KEY_PREFIX.to_string()),
            ttl_default,
            ttl_max,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|e| {
            warn!("Invalid value '{}' for {}: {}; using {}", raw, name, e, default);
            default
        }),
        None => default,
    }
}
