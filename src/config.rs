use std::str::FromStr;
use std::time::Duration;

use crate::error::{CatalogError, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.gsmarena.com";
pub const DEFAULT_INDEX_PATH: &str = "makers.php3";
pub const DEFAULT_DEVICES_PER_PAGE: u64 = 50;

/// Settings for one scraping run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Site root, joined with the index path and listing URLs
    pub base_url: String,
    pub index_path: String,
    /// Devices shown on one listing page; divides the brand device count
    pub devices_per_page: u64,
    pub delay_between_pages: Duration,
    pub delay_between_brands: Duration,
    pub request_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_path: DEFAULT_INDEX_PATH.to_string(),
            devices_per_page: DEFAULT_DEVICES_PER_PAGE,
            delay_between_pages: Duration::from_millis(200),
            delay_between_brands: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }
}

impl ScraperConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            base_url: lookup("GSMARENA_BASE_URL").unwrap_or(defaults.base_url),
            index_path: lookup("GSMARENA_INDEX_PATH").unwrap_or(defaults.index_path),
            devices_per_page: parse_var(&lookup, "DEVICES_PER_PAGE")?
                .unwrap_or(defaults.devices_per_page),
            delay_between_pages: parse_var(&lookup, "DELAY_BETWEEN_PAGES_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.delay_between_pages),
            delay_between_brands: parse_var(&lookup, "DELAY_BETWEEN_BRANDS_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.delay_between_brands),
            request_timeout: parse_var(&lookup, "REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            user_agent: lookup("USER_AGENT").filter(|ua| !ua.trim().is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.devices_per_page == 0 {
            return Err(CatalogError::config("DEVICES_PER_PAGE must be greater than zero"));
        }
        if self.base_url.trim().is_empty() {
            return Err(CatalogError::config("GSMARENA_BASE_URL must not be empty"));
        }
        Ok(())
    }

    /// Absolute URL for a path relative to the site root.
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn index_url(&self) -> String {
        self.absolute_url(&self.index_path)
    }

    /// Configuration without politeness delays, for replaying fixtures.
    pub fn without_delays(mut self) -> Self {
        self.delay_between_pages = Duration::ZERO;
        self.delay_between_brands = Duration::ZERO;
        self
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| CatalogError::config(format!("{key} has an invalid value: {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ScraperConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ScraperConfig::default());
        assert_eq!(config.index_url(), "https://www.gsmarena.com/makers.php3");
    }

    #[test]
    fn test_overrides() {
        let config = ScraperConfig::from_lookup(lookup_from(&[
            ("GSMARENA_BASE_URL", "http://localhost:8080/"),
            ("DELAY_BETWEEN_PAGES_MS", "0"),
            ("REQUEST_TIMEOUT_SECS", " 5 "),
            ("USER_AGENT", "catalog-bot/1.0"),
        ]))
        .unwrap();

        assert_eq!(config.index_url(), "http://localhost:8080/makers.php3");
        assert_eq!(config.delay_between_pages, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent.as_deref(), Some("catalog-bot/1.0"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ScraperConfig::from_lookup(lookup_from(&[("DELAY_BETWEEN_BRANDS_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("DELAY_BETWEEN_BRANDS_MS"));

        let err = ScraperConfig::from_lookup(lookup_from(&[("DEVICES_PER_PAGE", "0")])).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }
}
