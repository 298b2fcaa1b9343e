use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const CONFIG_FILE: &str = "skycast.json";
const MAX_FORECAST_DAYS: u8 = 14;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// WeatherAPI.com API key (can also be set via SKYCAST_API_KEY)
    pub api_key: String,

    /// Provider endpoint base URL
    pub base_url: String,

    /// Forecast days to request (provider caps at 14)
    pub forecast_days: u8,

    /// Optional provider language code for condition texts
    pub lang: Option<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.weatherapi.com/v1".to_string(),
            forecast_days: 7,
            lang: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Window width
    pub window_width: u32,

    /// Window height
    pub window_height: u32,

    /// Dark mode enabled
    pub dark_mode: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 768,
            dark_mode: false,
        }
    }
}

impl Config {
    /// Default configuration rooted at the given directory.
    pub fn default_at(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
        }
    }

    /// Load configuration from `config_dir`, falling back to defaults when
    /// no config file exists yet.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let mut config: Config = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            config.config_dir = config_dir.to_path_buf();
            config
        } else {
            tracing::info!("No config file at {}, using defaults", path.display());
            Self::default_at(config_dir)
        };

        // Environment overrides the stored key.
        if let Ok(key) = std::env::var("SKYCAST_API_KEY") {
            if !key.is_empty() {
                config.weather.api_key = key;
            }
        }

        Ok(config)
    }

    /// Persist configuration to `config_dir`.
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir).with_context(|| {
            format!("Failed to create config dir {}", self.config_dir.display())
        })?;
        let path = self.config_dir.join(CONFIG_FILE);
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration, collecting errors and warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.weather.api_key.is_empty() {
            result.add_error("weather.api_key", "API key is required");
        }

        if Url::parse(&self.weather.base_url).is_err() {
            result.add_error("weather.base_url", "Not a valid URL");
        }

        if self.weather.forecast_days == 0 || self.weather.forecast_days > MAX_FORECAST_DAYS {
            result.add_error(
                "weather.forecast_days",
                format!("Must be between 1 and {MAX_FORECAST_DAYS}"),
            );
        }

        if self.ui.window_width < 320 || self.ui.window_height < 240 {
            result.add_warning("ui", "Window size is unusually small");
        }

        result
    }
}
