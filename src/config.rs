use std::net::IpAddr;
use std::time::Duration;

use reqwest::Url;
use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub upstream_timeout: Duration,
    pub log_level: String,
    pub airtable: AirtableConfig,
    pub zapier: ZapierConfig,
}

#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_key: SecretString,
    pub endpoint: Url,
}

/// Webhook targets per event. `None` means the notification is skipped.
#[derive(Debug, Clone)]
pub struct ZapierConfig {
    pub subscribe: Option<Url>,
    pub unsubscribe: Option<Url>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let api_key = SecretString::from(env.required("AIRTABLE_API_KEY")?);
        let endpoint = parse_url("AIRTABLE_ENDPOINT", &env.required("AIRTABLE_ENDPOINT")?)?;

        let shared = env
            .optional("ZAPIER_ENDPOINT")
            .map(|v| parse_url("ZAPIER_ENDPOINT", &v))
            .transpose()?;
        let subscribe = match env.optional("ZAPIER_ENDPOINT_SUBSCRIBE") {
            Some(v) => Some(parse_url("ZAPIER_ENDPOINT_SUBSCRIBE", &v)?),
            None => shared.clone(),
        };
        let unsubscribe = match env.optional("ZAPIER_ENDPOINT_UNSUBSCRIBE") {
            Some(v) => Some(parse_url("ZAPIER_ENDPOINT_UNSUBSCRIBE", &v)?),
            None => shared,
        };

        let host: IpAddr = env
            .or("RELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid RELAY_HOST: {e}"))?;

        let port: u16 = env
            .or("RELAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid RELAY_PORT: {e}"))?;

        let max_body_size: usize = env
            .or("RELAY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid RELAY_MAX_BODY_SIZE: {e}"))?;

        let timeout_secs: u64 = env
            .or("RELAY_UPSTREAM_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid RELAY_UPSTREAM_TIMEOUT_SECS: {e}"))?;
        if timeout_secs == 0 {
            return Err("Invalid RELAY_UPSTREAM_TIMEOUT_SECS: must be greater than zero".into());
        }

        let log_level = env.or("RELAY_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            max_body_size,
            upstream_timeout: Duration::from_secs(timeout_secs),
            log_level,
            airtable: AirtableConfig { api_key, endpoint },
            zapier: ZapierConfig {
                subscribe,
                unsubscribe,
            },
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, String> {
        self.optional(key)
            .ok_or_else(|| format!("Missing required environment variable: {key}"))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("Invalid {key}: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("Invalid {key}: unsupported scheme '{other}'")),
    }
}
