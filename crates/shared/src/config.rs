use anyhow::{bail, Context};
use std::env;
use std::time::Duration;

use crate::models::OverallRisk;

pub const DEFAULT_NEARBLOCKS_API_URL: &str = "https://api.nearblocks.io/v1";
pub const DEFAULT_DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub nearblocks: NearBlocksConfig,
    pub upstream: UpstreamConfig,
    pub deepseek: Option<DeepSeekConfig>,
    pub risk: RiskConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone)]
pub struct NearBlocksConfig {
    pub api_url: String,
    pub api_key: String,
}

/// Timeout and retry policy for explorer calls
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_attempts: 3,
            retry_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskConfig {
    /// Subtract 0.5 per positive factor before classifying
    pub positive_factor_adjustment: bool,
    /// Label used when the adjusted score is zero (SAFE or UNKNOWN)
    pub zero_score_risk: OverallRisk,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            positive_factor_adjustment: true,
            zero_score_risk: OverallRisk::Safe,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let upstream = UpstreamConfig {
            timeout_secs: var_or("UPSTREAM_TIMEOUT_SECS", "10")
                .parse()
                .context("UPSTREAM_TIMEOUT_SECS")?,
            max_attempts: var_or("UPSTREAM_MAX_ATTEMPTS", "3")
                .parse()
                .context("UPSTREAM_MAX_ATTEMPTS")?,
            retry_delay_ms: var_or("UPSTREAM_RETRY_DELAY_MS", "1000")
                .parse()
                .context("UPSTREAM_RETRY_DELAY_MS")?,
        };
        if upstream.timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }
        if upstream.max_attempts == 0 {
            bail!("UPSTREAM_MAX_ATTEMPTS must be at least 1");
        }

        let zero_score_risk: OverallRisk = var_or("RISK_ZERO_SCORE_LABEL", "SAFE").parse()?;
        if !matches!(zero_score_risk, OverallRisk::Safe | OverallRisk::Unknown) {
            bail!("RISK_ZERO_SCORE_LABEL must be SAFE or UNKNOWN");
        }

        let deepseek = match lookup("DEEPSEEK_API_KEY").filter(|k| !k.trim().is_empty()) {
            Some(api_key) => Some(DeepSeekConfig {
                api_key,
                api_url: var_or("DEEPSEEK_API_URL", DEFAULT_DEEPSEEK_API_URL),
                model: var_or("DEEPSEEK_MODEL", DEFAULT_DEEPSEEK_MODEL),
                max_tokens: var_or("DEEPSEEK_MAX_TOKENS", "2048")
                    .parse()
                    .context("DEEPSEEK_MAX_TOKENS")?,
            }),
            None => None,
        };

        Ok(Config {
            server: ServerConfig {
                host: var_or("SERVER_HOST", "0.0.0.0"),
                port: var_or("PORT", "3000").parse().context("PORT")?,
                static_dir: var_or("STATIC_DIR", "public"),
            },
            nearblocks: NearBlocksConfig {
                api_url: var_or("NEARBLOCKS_API_URL", DEFAULT_NEARBLOCKS_API_URL),
                api_key: lookup("NEARBLOCKS_API_KEY").context("NEARBLOCKS_API_KEY is not set")?,
            },
            upstream,
            deepseek,
            risk: RiskConfig {
                positive_factor_adjustment: var_or("RISK_POSITIVE_ADJUSTMENT", "true")
                    .parse()
                    .context("RISK_POSITIVE_ADJUSTMENT")?,
                zero_score_risk,
            },
        })
    }
}
