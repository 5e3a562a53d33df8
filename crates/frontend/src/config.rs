//! Frontend configuration

/// Backend endpoint configuration
pub struct ApiConfig;

impl ApiConfig {
    /// Environment variable overriding the backend base URL
    pub const BASE_URL_ENV: &'static str = "COUNSEL_API_BASE_URL";

    /// Base URL used when no override is configured
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    /// Resolve the backend base URL
    pub fn base_url() -> String {
        std::env::var(Self::BASE_URL_ENV)
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
    }
}
