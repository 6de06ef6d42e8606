use crate::error::Result;
use crate::options::Options;
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Default URL used to access the Asana API
pub const BASE_URL: &str = "https://app.asana.com/api/1.0";

/// Create the default HTTP client for API requests
/// with settings for connection pooling and timeouts
pub fn create_http_client() -> reqwest::Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(Duration::from_secs(300)) // 5 minutes, uploads included
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL every request path is appended to
    pub base_url: Url,
    /// Send `Asana-Fast-Api: true` with every request
    pub fast_api: bool,
    /// Log request and response bodies
    pub debug: bool,
    /// 1 logs write operations, 2 also logs reads
    pub verbosity: u8,
    /// Options applied to every call unless the call overrides them
    pub default_options: Options,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse(BASE_URL).expect("BASE_URL is a valid URL"),
            fast_api: true,
            debug: false,
            verbosity: 0,
            default_options: Options::default(),
        }
    }
}

impl Config {
    /// Create a new configuration pointing at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Config {
            base_url: Url::parse(base_url)?,
            ..Config::default()
        })
    }

    /// Set fast API mode
    pub fn with_fast_api(mut self, fast_api: bool) -> Self {
        self.fast_api = fast_api;
        self
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the log level of resource call sites
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the options applied under every call
    pub fn with_default_options(mut self, options: Options) -> Self {
        self.default_options = options;
        self
    }

    /// Full URL for an API path.
    ///
    /// # Panics
    ///
    /// If `path` does not start with `/`. Paths are built by the resource
    /// call sites, so a bad one is a bug in the caller.
    pub fn url_for(&self, path: &str) -> String {
        assert!(path.starts_with('/'), "Invalid API path: {:?}", path);
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.fast_api);
        assert!(!config.debug);
        assert_eq!(config.url_for("/users/me"), "https://app.asana.com/api/1.0/users/me");
    }

    #[test]
    fn test_custom_base_url() {
        let config = Config::new("http://127.0.0.1:8080").unwrap().with_fast_api(false);
        assert!(!config.fast_api);
        assert_eq!(config.url_for("/projects"), "http://127.0.0.1:8080/projects");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(Config::new("not a url").is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid API path")]
    fn test_relative_path_panics() {
        Config::default().url_for("projects/1/sections");
    }
}
