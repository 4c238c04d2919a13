//! Configuration module
//!
//! Process-level settings read from the environment (and `.env`): where the
//! hosting API lives, where local state is kept, and which page share links
//! point at. The user's own credential and target repository are *not* here;
//! they are a persisted [`crate::Configuration`] saved explicitly by the user.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_SHARE_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_SHARE_PATH: &str = "/";

/// Runtime settings for ghshare clients.
#[derive(Clone, Debug)]
pub struct Settings {
    pub api_url: String,
    pub state_dir: PathBuf,
    pub share_origin: String,
    pub share_path: String,
    pub http_timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("GHSHARE_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let state_dir = match non_empty("GHSHARE_STATE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_state_dir()?,
        };

        let share_origin = non_empty("GHSHARE_SHARE_ORIGIN")
            .unwrap_or_else(|| DEFAULT_SHARE_ORIGIN.to_string())
            .trim_end_matches('/')
            .to_string();

        let share_path =
            non_empty("GHSHARE_SHARE_PATH").unwrap_or_else(|| DEFAULT_SHARE_PATH.to_string());

        let http_timeout_secs = match non_empty("GHSHARE_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("GHSHARE_HTTP_TIMEOUT_SECS must be a whole number of seconds")
            })?),
            None => None,
        };

        let settings = Settings {
            api_url,
            state_dir,
            share_origin,
            share_path,
            http_timeout_secs,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        url::Url::parse(&self.api_url)
            .map_err(|e| anyhow::anyhow!("GHSHARE_API_URL is not a valid URL: {}", e))?;

        let origin = url::Url::parse(&self.share_origin)
            .map_err(|e| anyhow::anyhow!("GHSHARE_SHARE_ORIGIN is not a valid URL: {}", e))?;
        if origin.path() != "/" || origin.query().is_some() {
            return Err(anyhow::anyhow!(
                "GHSHARE_SHARE_ORIGIN must be scheme and host only (put the path in GHSHARE_SHARE_PATH)"
            ));
        }

        if !self.share_path.starts_with('/') {
            return Err(anyhow::anyhow!("GHSHARE_SHARE_PATH must start with '/'"));
        }

        if self.http_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!(
                "GHSHARE_HTTP_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }

    /// Request timeout, if one was configured. `None` leaves the transport defaults.
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}

fn default_state_dir() -> Result<PathBuf, anyhow::Error> {
    dirs::data_dir()
        .map(|dir| dir.join(crate::constants::APP_NAME))
        .ok_or_else(|| {
            anyhow::anyhow!("Could not determine a data directory. Set GHSHARE_STATE_DIR")
        })
}
