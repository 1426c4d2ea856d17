//! Client session configuration.
//!
//! [`ClientConfig`] is deserialized from TOML and/or read from `FAKTUROWNIA_*`
//! environment variables. It is immutable once built and its `Debug` output
//! never contains the API token.

use std::{fmt, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{
    error::{BridgeError, Result},
    reliability::RetryPolicy,
};

/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "FAKTUROWNIA_API_TOKEN";
/// Environment variable holding the account subdomain.
pub const ENV_DOMAIN: &str = "FAKTUROWNIA_DOMAIN";
/// Environment variable overriding the per-attempt timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "FAKTUROWNIA_TIMEOUT_MS";
/// Environment variable overriding the retry count.
pub const ENV_MAX_RETRIES: &str = "FAKTUROWNIA_MAX_RETRIES";
/// Environment variable overriding the derived base URL.
pub const ENV_BASE_URL: &str = "FAKTUROWNIA_BASE_URL";
/// Environment variable pointing at an optional TOML file.
pub const ENV_CONFIG_PATH: &str = "FAKTUROWNIA_CONFIG";

const MAX_TIMEOUT_MS: u64 = 300_000;
const MAX_RETRIES_LIMIT: u32 = 10;
const MAX_DOMAIN_LEN: usize = 63;

/// Fakturownia client configuration.
///
/// # Examples
///
/// ```toml
/// api_token = "abc123"
/// domain = "mycompany"
/// timeout_ms = 15000
/// max_retries = 2
/// ```
///
/// ```
/// use fakturownia_mcp_bridge::transport::ClientConfig;
///
/// let config = ClientConfig::new("abc123", "mycompany");
/// assert_eq!(config.base_url()?.as_str(), "https://mycompany.fakturownia.pl/");
/// assert!(!format!("{config:?}").contains("abc123"));
/// # Ok::<(), fakturownia_mcp_bridge::BridgeError>(())
/// ```
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// API token sent with every request.
    #[serde(default)]
    pub api_token: String,

    /// Account subdomain, e.g. `mycompany` for `mycompany.fakturownia.pl`.
    #[serde(default)]
    pub domain: String,

    /// Explicit base URL; replaces the one derived from `domain`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum idle connections per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Upper bound of the random jitter added to each backoff, in milliseconds.
    #[serde(default = "default_retry_max_jitter_ms")]
    pub retry_max_jitter_ms: u64,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_token", &"[REDACTED]")
            .field("domain", &self.domain)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .field("retry_max_jitter_ms", &self.retry_max_jitter_ms)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with default tuning.
    #[must_use]
    pub fn new(api_token: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            domain: domain.into(),
            base_url: None,
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_max_idle_per_host: default_pool_max_idle(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_jitter_ms: default_retry_max_jitter_ms(),
        }
    }

    /// Overrides the derived base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] on malformed TOML.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| BridgeError::ConfigError(format!("invalid TOML: {e}")))
    }

    /// Reads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// If `FAKTUROWNIA_CONFIG` names a file it is read first; the remaining
    /// variables override its values. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if a required value is missing, a
    /// numeric value does not parse, or validation fails.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup(ENV_CONFIG_PATH)) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::new(String::new(), String::new()),
        };

        if let Some(token) = non_empty(lookup(ENV_API_TOKEN)) {
            config.api_token = token;
        }
        if let Some(domain) = non_empty(lookup(ENV_DOMAIN)) {
            config.domain = domain;
        }
        if let Some(base_url) = non_empty(lookup(ENV_BASE_URL)) {
            config.base_url = Some(base_url);
        }
        if let Some(raw) = non_empty(lookup(ENV_TIMEOUT_MS)) {
            config.timeout_ms = parse_number(ENV_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = non_empty(lookup(ENV_MAX_RETRIES)) {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values are present and within bounds.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if:
    /// - `api_token` is empty
    /// - `domain` is empty, longer than 63 characters, or contains characters
    ///   other than ASCII alphanumerics and `-` (unless `base_url` is set)
    /// - `base_url` is not an absolute http(s) URL
    /// - `timeout_ms` is outside 1-300000
    /// - `max_retries` exceeds 10
    /// - `connect_timeout_secs` is outside 1-60
    pub fn validate(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(BridgeError::ConfigError(format!("{ENV_API_TOKEN} is required")));
        }
        match &self.base_url {
            Some(raw) => {
                parse_base_url(raw)?;
            }
            None => validate_domain(&self.domain)?,
        }
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(BridgeError::ConfigError(format!(
                "timeout_ms must be between 1 and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(BridgeError::ConfigError(format!(
                "max_retries must be at most {MAX_RETRIES_LIMIT}"
            )));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(BridgeError::ConfigError(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Resolves the base URL all request paths are joined onto.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if neither a valid `base_url` nor a
    /// valid `domain` is configured.
    pub fn base_url(&self) -> Result<Url> {
        match &self.base_url {
            Some(raw) => parse_base_url(raw),
            None => {
                validate_domain(&self.domain)?;
                parse_base_url(&format!("https://{}.fakturownia.pl", self.domain))
            }
        }
    }

    /// Returns the per-attempt timeout as Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns connect timeout as Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Builds the backoff policy for this configuration.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_jitter: Duration::from_millis(self.retry_max_jitter_ms),
        }
    }
}

fn validate_domain(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(BridgeError::ConfigError(format!("{ENV_DOMAIN} is required")));
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(BridgeError::ConfigError(format!(
            "domain must be at most {MAX_DOMAIN_LEN} characters"
        )));
    }
    if !domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(BridgeError::ConfigError(format!(
            "domain contains invalid characters: {domain}"
        )));
    }
    Ok(())
}

/// Parses a base URL, normalizing it to end in `/` so paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw).map_err(|e| BridgeError::ConfigError(format!("invalid base URL: {e}")))?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(BridgeError::ConfigError(format!(
            "base URL must use http or https, got {}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(BridgeError::ConfigError("base URL must have a host".to_owned()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| BridgeError::ConfigError(format!("{key} must be a non-negative integer")))
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_pool_max_idle() -> usize {
    100
}

const fn default_retry_base_delay_ms() -> u64 {
    1_000
}

const fn default_retry_max_jitter_ms() -> u64 {
    500
}
