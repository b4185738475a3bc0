//! Configuration management for the rendercheck harness.
//!
//! Provides TOML-based configuration with environment variable overrides.
//! The defaults reproduce the stock verification run: a local app on port
//! 5000 rendering an image inside a `div.relative.w-full` container.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "rendercheck.toml";

/// Main harness configuration.
///
/// Loaded from `rendercheck.toml` in the working directory. If the file
/// doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Page and element under verification
    pub target: TargetConfig,
    /// Browser launch settings
    pub browser: BrowserConfig,
    /// Selector wait settings
    pub wait: WaitConfig,
    /// Output artifact settings
    pub output: OutputConfig,
}

impl VerifyConfig {
    /// Load configuration from `rendercheck.toml`, falling back to defaults
    /// if the file is not present.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// if the file is not present.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read, or its contents
    /// are not valid TOML.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides, then validate.
    ///
    /// Supports the following environment variables:
    /// - `RENDERCHECK_URL`: Override the target URL
    /// - `RENDERCHECK_SELECTOR`: Override the awaited CSS selector
    /// - `RENDERCHECK_TIMEOUT_SECS`: Override the selector wait timeout
    /// - `RENDERCHECK_OUTPUT`: Override the screenshot output path
    /// - `RENDERCHECK_HEADLESS`: Override headless mode (true/false)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to this configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("RENDERCHECK_URL") {
            tracing::debug!("Override target.url from env: {}", val);
            self.target.url = val;
        }

        if let Ok(val) = std::env::var("RENDERCHECK_SELECTOR") {
            tracing::debug!("Override target.selector from env: {}", val);
            self.target.selector = val;
        }

        if let Ok(val) = std::env::var("RENDERCHECK_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                tracing::debug!("Override wait.timeout_secs from env: {}", secs);
                self.wait.timeout_secs = secs;
            }
        }

        if let Ok(val) = std::env::var("RENDERCHECK_OUTPUT") {
            tracing::debug!("Override output.screenshot_path from env: {}", val);
            self.output.screenshot_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("RENDERCHECK_HEADLESS") {
            if let Ok(headless) = val.parse() {
                tracing::debug!("Override browser.headless from env: {}", headless);
                self.browser.headless = headless;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns error if the target URL does not parse, the selector or
    /// output path is empty, or the wait timeout is zero.
    pub fn validate(&self) -> ConfigResult<()> {
        url::Url::parse(&self.target.url).map_err(|e| ConfigError::InvalidValue {
            field: "target.url".to_string(),
            reason: e.to_string(),
        })?;

        if self.target.selector.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "target.selector".to_string(),
                reason: "selector must not be empty".to_string(),
            });
        }

        if self.wait.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "wait.timeout_secs".to_string(),
                reason: "timeout must be non-zero".to_string(),
            });
        }

        if self.output.screenshot_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.screenshot_path".to_string(),
                reason: "output path must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Page and element under verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// URL of the application under test
    pub url: String,
    /// CSS selector that must become visible before the screenshot
    pub selector: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            selector: "div.relative.w-full > img".to_string(),
        }
    }
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 720,
        }
    }
}

/// Selector wait settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Selector wait timeout in seconds
    pub timeout_secs: u64,
    /// Poll interval in milliseconds between DOM checks
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            poll_interval_ms: 100,
        }
    }
}

/// Output artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path the full-page PNG screenshot is written to
    pub screenshot_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            screenshot_path: PathBuf::from("verification.png"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = VerifyConfig::default();
        assert_eq!(config.target.url, "http://localhost:5000");
        assert_eq!(config.target.selector, "div.relative.w-full > img");
        assert!(config.browser.headless);
        assert_eq!(config.wait.timeout_secs, 60);
        assert_eq!(config.output.screenshot_path, PathBuf::from("verification.png"));
    }

    #[test]
    fn test_config_serialization() {
        let config = VerifyConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[target]"));
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[wait]"));
        assert!(toml_str.contains("[output]"));

        let parsed: VerifyConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.target.url, config.target.url);
        assert_eq!(parsed.target.selector, config.target.selector);
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("rendercheck.toml");

        let mut config = VerifyConfig::default();
        config.target.url = "http://localhost:8080".to_string();
        config.wait.timeout_secs = 5;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = VerifyConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.target.url, "http://localhost:8080");
        assert_eq!(loaded.wait.timeout_secs, 5);
        // Untouched sections keep defaults
        assert!(loaded.browser.headless);
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let loaded =
            VerifyConfig::load_from(&tmp.path().join("absent.toml")).expect("load config");
        assert_eq!(loaded.target.url, "http://localhost:5000");
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[target]
url = "http://localhost:3000"

[wait]
timeout_secs = 10
"#;

        let config: VerifyConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.target.url, "http://localhost:3000");
        assert_eq!(config.wait.timeout_secs, 10);
        // These should be defaults
        assert_eq!(config.target.selector, "div.relative.w-full > img");
        assert_eq!(config.wait.poll_interval_ms, 100);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("RENDERCHECK_URL", "http://localhost:9999");
        std::env::set_var("RENDERCHECK_SELECTOR", "#app img");
        std::env::set_var("RENDERCHECK_TIMEOUT_SECS", "15");
        std::env::set_var("RENDERCHECK_HEADLESS", "false");

        let mut config = VerifyConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.target.url, "http://localhost:9999");
        assert_eq!(config.target.selector, "#app img");
        assert_eq!(config.wait.timeout_secs, 15);
        assert!(!config.browser.headless);

        std::env::remove_var("RENDERCHECK_URL");
        std::env::remove_var("RENDERCHECK_SELECTOR");
        std::env::remove_var("RENDERCHECK_TIMEOUT_SECS");
        std::env::remove_var("RENDERCHECK_HEADLESS");
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = VerifyConfig::default();
        config.target.url = "not-a-url".to_string();
        let err = config.validate().expect_err("invalid URL must fail");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "target.url"));
    }

    #[test]
    fn test_validate_rejects_empty_selector() {
        let mut config = VerifyConfig::default();
        config.target.selector = "  ".to_string();
        let err = config.validate().expect_err("empty selector must fail");
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "target.selector")
        );
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = VerifyConfig::default();
        config.wait.timeout_secs = 0;
        let err = config.validate().expect_err("zero timeout must fail");
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "wait.timeout_secs")
        );
    }
}
