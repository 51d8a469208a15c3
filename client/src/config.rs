use crate::{ClientError, Result};
use std::{fmt, time::Duration};

use url::Url;

pub static DEFAULT_BASE_URL: &'static str = "https://rest.interfax.net";
pub static DEFAULT_USER_AGENT: &'static str =
    concat!("interfax-client-rust/", env!("CARGO_PKG_VERSION"));

static ENV_BASE_URL: &'static str = "INTERFAX_BASE_URL";
static ENV_USERNAME: &'static str = "INTERFAX_USERNAME";
static ENV_PASSWORD: &'static str = "INTERFAX_PASSWORD";
static ENV_TIMEOUT_SECS: &'static str = "INTERFAX_TIMEOUT_SECS";

/// Account credentials, sent by the default transport as basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub credentials: Option<Credentials>,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            credentials: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a configuration from `INTERFAX_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        match (lookup(ENV_USERNAME), lookup(ENV_PASSWORD)) {
            (Some(username), Some(password)) => {
                config = config.with_credentials(Credentials::new(username, password));
            }
            (None, None) => {}
            _ => {
                return Err(ClientError::Config(format!(
                    "{} and {} must be set together",
                    ENV_USERNAME, ENV_PASSWORD
                )))
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!("{} is not a number: {}", ENV_TIMEOUT_SECS, raw))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ClientError::InvalidUrl(format!(
            "unsupported scheme {} in {}",
            scheme, raw
        ))),
    }
}
