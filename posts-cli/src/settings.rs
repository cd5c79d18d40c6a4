use anyhow::{Context, Result, anyhow};
use posts_manager::RefreshPolicy;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) api_url: String,
    pub(crate) http_timeout_secs: u64,
    pub(crate) refresh_policy: RefreshPolicy,
    pub(crate) log_level: String,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let api_url = std::env::var("POSTS_API_URL")
            .map(|value| value.trim().to_string())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let http_timeout_secs = parse_u64_env("POSTS_HTTP_TIMEOUT_SECS", 15)?;
        let refresh_policy = match std::env::var("POSTS_REFRESH_POLICY") {
            Ok(raw) => raw
                .parse::<RefreshPolicy>()
                .map_err(|e| anyhow!("POSTS_REFRESH_POLICY: {e}"))?,
            Err(_) => RefreshPolicy::default(),
        };
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            api_url,
            http_timeout_secs,
            refresh_policy,
            log_level,
        })
    }
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
