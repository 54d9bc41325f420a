//! API location.
//!
//! The base URL is the only configuration the dashboard has. It is baked in
//! at compile time from `AID_API_URL` (the WASM build has no environment) and,
//! on native targets, may be overridden at runtime by the same variable.

/// Name of the environment variable holding the API base URL.
pub const API_URL_VAR: &str = "AID_API_URL";

/// Used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build a config for an explicit base URL. A trailing `/` is added if missing.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url: String = base_url.into().trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// Resolve the base URL: runtime env (native only), then compile-time env,
    /// then [`DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        match runtime_override() {
            Some(url) => Self::new(url),
            None => Self::new(option_env!("AID_API_URL").unwrap_or(DEFAULT_API_URL)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `api/omni/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_override() -> Option<String> {
    std::env::var(API_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn runtime_override() -> Option<String> {
    None
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ApiConfig::new("https://example.org/aid");
        assert_eq!(config.base_url(), "https://example.org/aid/");
        let config = ApiConfig::new("https://example.org/aid/");
        assert_eq!(config.base_url(), "https://example.org/aid/");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ApiConfig::new("https://example.org/");
        assert_eq!(config.endpoint("/api/omni/"), "https://example.org/api/omni/");
        assert_eq!(
            config.endpoint(crate::CIRCLES_PATH),
            "https://example.org/api/neutron/ros/"
        );
    }
}
