//! Runtime configuration read from the environment (and `.env`)

use std::time::Duration;

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_SITE_URL: &str = "https://moviexyz.vercel.app";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TMDB v3 API key or v4 read access token
    pub api_key: String,
    pub api_url: String,
    /// Base for poster paths, size segment included
    pub image_url: String,
    /// Origin used in share links
    pub site_url: String,
    pub request_timeout: Duration,
    /// Command used to open links; platform default when unset
    pub browser: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `TMDB_API_KEY`         | required                             |
    /// | `TMDB_API_URL`         | `https://api.themoviedb.org/3`       |
    /// | `TMDB_IMAGE_URL`       | `https://image.tmdb.org/t/p/w500`    |
    /// | `SITE_URL`             | `https://moviexyz.vercel.app`        |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                                 |
    /// | `BROWSER`              | platform opener                      |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = var("TMDB_API_KEY")
            .ok_or_else(|| anyhow!("TMDB_API_KEY is not set (get one at https://www.themoviedb.org/settings/api)"))?;

        let request_timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("REQUEST_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_url: var("TMDB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            image_url: var("TMDB_IMAGE_URL").unwrap_or_else(|| DEFAULT_IMAGE_URL.into()),
            site_url: var("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.into()),
            request_timeout: Duration::from_secs(request_timeout_secs),
            browser: var("BROWSER"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = AppConfig::from_lookup(lookup(&[("TMDB_API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(config.site_url, DEFAULT_SITE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.browser, None);
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("TMDB_API_KEY"));
        assert!(AppConfig::from_lookup(lookup(&[("TMDB_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TMDB_API_KEY", "abc"),
            ("SITE_URL", "http://localhost:3000"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("BROWSER", "firefox"),
        ]))
        .unwrap();
        assert_eq!(config.site_url, "http://localhost:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.browser.as_deref(), Some("firefox"));
    }

    #[test]
    fn bad_timeout_names_the_variable() {
        let err = AppConfig::from_lookup(lookup(&[
            ("TMDB_API_KEY", "abc"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }
}
