//! Deployment configuration for the dashboard.
//!
//! Values are baked in at build time through environment variables, with a
//! local storage override for the backend URL so a deployed bundle can be
//! pointed at another backend without rebuilding.

use log::Level;

/// Default backend base URL
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Local storage key that overrides the build-time backend URL
pub const BACKEND_URL_OVERRIDE_KEY: &str = "spendingui_backend_url";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub backend_url: String,
    pub log_level: Level,
    /// Delay between confirming logout and clearing the session.
    pub logout_delay_ms: u32,
    /// How long error and warning notices stay up.
    pub notice_timeout_ms: u32,
}

impl AppConfig {
    /// Load the configuration for the running bundle.
    pub fn load() -> Self {
        Self::resolve(
            stored_backend_url(),
            option_env!("SPENDINGUI_BACKEND_URL"),
            option_env!("SPENDINGUI_LOG_LEVEL"),
        )
    }

    /// Pick each value from the first source that provides a usable one.
    ///
    /// The backend URL is taken from the stored override, then the build-time
    /// value, then [DEFAULT_BACKEND_URL].
    pub fn resolve(
        stored_url: Option<String>,
        build_url: Option<&str>,
        build_log_level: Option<&str>,
    ) -> Self {
        let backend_url = [stored_url.as_deref(), build_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim_end_matches('/')
            .to_string();

        let log_level = build_log_level
            .and_then(|level| level.trim().parse::<Level>().ok())
            .unwrap_or(Level::Info);

        Self {
            backend_url,
            log_level,
            logout_delay_ms: 2000,
            notice_timeout_ms: 5000,
        }
    }
}

fn stored_backend_url() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(BACKEND_URL_OVERRIDE_KEY).ok()?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_any_source() {
        let config = AppConfig::resolve(None, None, None);

        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.log_level, Level::Info);
        assert_eq!(config.logout_delay_ms, 2000);
    }

    #[test]
    fn stored_url_wins_over_build_url() {
        let config = AppConfig::resolve(
            Some("https://staging.example.com/".to_string()),
            Some("https://api.example.com"),
            None,
        );

        assert_eq!(config.backend_url, "https://staging.example.com");
    }

    #[test]
    fn blank_stored_url_is_skipped() {
        let config = AppConfig::resolve(Some("   ".to_string()), None, None);
        let with_build = AppConfig::resolve(Some("".to_string()), Some("https://api.example.com"), None);

        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(with_build.backend_url, "https://api.example.com");
    }

    #[test]
    fn build_url_is_used_and_trimmed() {
        let config = AppConfig::resolve(None, Some("https://api.example.com//"), None);

        assert_eq!(config.backend_url, "https://api.example.com");
    }

    #[test]
    fn parses_log_level_case_insensitively() {
        assert_eq!(AppConfig::resolve(None, None, Some("DEBUG")).log_level, Level::Debug);
        assert_eq!(AppConfig::resolve(None, None, Some("warn")).log_level, Level::Warn);
        assert_eq!(AppConfig::resolve(None, None, Some("loud")).log_level, Level::Info);
    }
}
