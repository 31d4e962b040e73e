//! Helper configuration.
//!
//! Read from the environment:
//! - `VBB_BASE_URL` - departures API base URL
//! - `VBB_TIMEOUT_SECS` - HTTP request timeout
//! - `LINE_COLORS_PATH` - line color table; the built-in table if unset
//! - `MOCK_DATA_DIR` - serve mock boards from this directory instead of
//!   the API
//! - `EVENT_BUFFER` - capacity of the request and event channels

use std::path::PathBuf;

use crate::colors::{ColorsError, LineColors};
use crate::vbb::VbbConfig;

/// Default request/event channel capacity.
const DEFAULT_EVENT_BUFFER: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Configuration for the helper binary.
#[derive(Debug, Clone)]
pub struct HelperConfig {
    /// Departures API client settings
    pub vbb: VbbConfig,
    /// Line color table to load instead of the built-in one
    pub line_colors_path: Option<PathBuf>,
    /// Directory of mock boards; when set, the API is not used
    pub mock_data_dir: Option<PathBuf>,
    /// Capacity of the request and event channels
    pub event_buffer: usize,
}

impl HelperConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// a variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("VBB_BASE_URL") {
            config.vbb = config.vbb.with_base_url(url);
        }

        if let Some(value) = lookup("VBB_TIMEOUT_SECS") {
            let secs = parse("VBB_TIMEOUT_SECS", value)?;
            config.vbb = config.vbb.with_timeout(secs);
        }

        config.line_colors_path = lookup("LINE_COLORS_PATH").map(PathBuf::from);
        config.mock_data_dir = lookup("MOCK_DATA_DIR").map(PathBuf::from);

        if let Some(value) = lookup("EVENT_BUFFER") {
            config.event_buffer = parse("EVENT_BUFFER", value)?;
            if config.event_buffer == 0 {
                return Err(ConfigError::Invalid {
                    name: "EVENT_BUFFER",
                    value: "0".to_string(),
                });
            }
        }

        Ok(config)
    }

    /// Load the configured line color table.
    pub fn line_colors(&self) -> Result<LineColors, ColorsError> {
        match &self.line_colors_path {
            Some(path) => LineColors::load(path),
            None => LineColors::builtin(),
        }
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            vbb: VbbConfig::default(),
            line_colors_path: None,
            mock_data_dir: None,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = HelperConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.event_buffer, 64);
        assert!(config.line_colors_path.is_none());
        assert!(config.mock_data_dir.is_none());
        assert_eq!(config.vbb.timeout_secs, 30);
    }

    #[test]
    fn reads_variables() {
        let config = HelperConfig::from_lookup(lookup(&[
            ("VBB_BASE_URL", "http://localhost:3000"),
            ("VBB_TIMEOUT_SECS", "10"),
            ("LINE_COLORS_PATH", "/etc/colors.json"),
            ("MOCK_DATA_DIR", "data/mock"),
            ("EVENT_BUFFER", " 16 "),
        ]))
        .unwrap();

        assert_eq!(config.vbb.base_url, "http://localhost:3000");
        assert_eq!(config.vbb.timeout_secs, 10);
        assert_eq!(
            config.line_colors_path,
            Some(PathBuf::from("/etc/colors.json"))
        );
        assert_eq!(config.mock_data_dir, Some(PathBuf::from("data/mock")));
        assert_eq!(config.event_buffer, 16);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err =
            HelperConfig::from_lookup(lookup(&[("VBB_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for VBB_TIMEOUT_SECS: \"soon\"");

        assert!(HelperConfig::from_lookup(lookup(&[("EVENT_BUFFER", "0")])).is_err());
    }

    #[test]
    fn line_colors_fall_back_to_builtin() {
        let colors = HelperConfig::default().line_colors().unwrap();
        assert!(colors.get("subway", "U2").is_some());
    }

    #[test]
    fn line_colors_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.json");
        std::fs::write(&path, r##"{"subway": {"U2": {"bg": "#000"}}}"##).unwrap();

        let config = HelperConfig {
            line_colors_path: Some(path),
            ..HelperConfig::default()
        };
        let colors = config.line_colors().unwrap();
        assert_eq!(colors.len(), 1);
    }
}
