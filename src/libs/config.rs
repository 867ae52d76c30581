use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_URL: &str = "http://localhost:1234/data";
pub const DEFAULT_DELAY_MS: u64 = 300;
pub const DEFAULT_MIN_CHARS: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("base url must start with http:// or https://, got {0:?}")]
    InvalidUrl(String),
    #[error("quiet period must be greater than zero")]
    ZeroDelay,
}

/// Everything the watcher and dispatcher need, passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub delay: Duration,
    pub min_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_URL.to_string(),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

impl Settings {
    pub fn new(base_url: &str, delay_ms: u64, min_chars: usize) -> Result<Self, SettingsError> {
        let base_url = base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SettingsError::InvalidUrl(base_url));
        }
        if delay_ms == 0 {
            return Err(SettingsError::ZeroDelay);
        }
        Ok(Settings {
            base_url,
            delay: Duration::from_millis(delay_ms),
            min_chars,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub data_file: PathBuf,
    pub port: u16,
}

#[test]
fn defaults_match_the_web_client() {
    let settings = Settings::default();
    assert_eq!(settings.base_url, "http://localhost:1234/data");
    assert_eq!(settings.delay, Duration::from_millis(300));
    assert_eq!(settings.min_chars, 3);
}

#[test]
fn rejects_relative_url() {
    assert_eq!(
        Settings::new("localhost/data", 300, 3),
        Err(SettingsError::InvalidUrl("localhost/data".to_string()))
    );
}

#[test]
fn rejects_zero_delay() {
    assert_eq!(
        Settings::new("http://localhost:1234/data", 0, 3),
        Err(SettingsError::ZeroDelay)
    );
}

#[test]
fn trims_url() {
    let settings = Settings::new("  https://example.org/data ", 150, 2).unwrap();
    assert_eq!(settings.base_url, "https://example.org/data");
    assert_eq!(settings.delay, Duration::from_millis(150));
    assert_eq!(settings.min_chars, 2);
}
