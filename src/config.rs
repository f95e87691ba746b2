use crate::error::{Result, WidgetError};
use crate::models::Coordinates;
use crate::ui::ThemeMode;
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_api_base_url")]
    pub geo_base_url: String,
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org".into()
}

impl Default for OpenWeatherMapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            geo_base_url: default_api_base_url(),
        }
    }
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("geo_base_url", &self.geo_base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Fixed coordinates skip the IP lookup when both are set.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_ip_lookup_url() -> String {
    "http://ip-api.com".into()
}

fn default_enabled() -> bool {
    true
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            ip_lookup_url: default_ip_lookup_url(),
            enabled: true,
        }
    }
}

impl LocationConfig {
    pub fn fixed_coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeMode,
}

impl Config {
    /// Load from the first config file found, falling back to defaults when
    /// none exists. The API key is taken from the environment if the file
    /// leaves it empty.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let mut config = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(WidgetError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                Self::from_file(p)?
            }
            None => match Self::find_config_path() {
                Some(p) => Self::from_file(&p)?,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    Config::default()
                }
            },
        };

        if config.openweathermap.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                config.openweathermap.api_key = key;
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &PathBuf) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| WidgetError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    fn parse(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| WidgetError::Config(format!("Failed to parse config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.openweathermap.api_key.trim().is_empty() {
            return Err(WidgetError::Config(format!(
                "No OpenWeatherMap API key. Set {} or run `skyglance init`.",
                API_KEY_ENV
            )));
        }
        if self.location.latitude.is_some() != self.location.longitude.is_some() {
            return Err(WidgetError::Config(
                "location.latitude and location.longitude must be set together".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("skyglance").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/skyglance/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WidgetError::Config("Cannot determine config directory".into()))?
            .join("skyglance");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up skyglance!");
        println!();

        println!("OpenWeatherMap");
        let api_key: String = Password::new()
            .with_prompt(format!("  API key (leave blank to use ${{{}}})", API_KEY_ENV))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| WidgetError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Location (leave blank to detect from your IP address)");
        let latitude: String = Input::new()
            .with_prompt("  Latitude")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| WidgetError::Config(format!("Input error: {}", e)))?;

        let (latitude, longitude) = if latitude.trim().is_empty() {
            (None, None)
        } else {
            let lat = latitude
                .trim()
                .parse::<f64>()
                .map_err(|e| WidgetError::Config(format!("Invalid latitude: {}", e)))?;
            let lon: f64 = Input::new()
                .with_prompt("  Longitude")
                .interact_text()
                .map_err(|e| WidgetError::Config(format!("Input error: {}", e)))?;
            (Some(lat), Some(lon))
        };

        println!();

        let theme: String = Input::new()
            .with_prompt("Theme (dark, light)")
            .default("dark".into())
            .interact_text()
            .map_err(|e| WidgetError::Config(format!("Input error: {}", e)))?;

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key: if api_key.is_empty() {
                    format!("${{{}}}", API_KEY_ENV)
                } else {
                    api_key
                },
                ..OpenWeatherMapConfig::default()
            },
            location: LocationConfig {
                latitude,
                longitude,
                ..LocationConfig::default()
            },
            ui: UiConfig {
                theme: ThemeMode::from_str(&theme).unwrap_or_default(),
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| WidgetError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# skyglance configuration\n# Generated by `skyglance init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return result;
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Directory for the log file (~/.cache/skyglance).
    pub fn log_dir() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| WidgetError::Config("Cannot determine cache directory".into()))?
            .join("skyglance");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_yaml_uses_defaults() {
        let config = Config::parse("openweathermap:\n  api_key: abc\n").unwrap();
        assert_eq!(config.openweathermap.api_key, "abc");
        assert_eq!(
            config.openweathermap.api_base_url,
            "https://api.openweathermap.org"
        );
        assert!(config.location.enabled);
        assert!(config.location.fixed_coordinates().is_none());
        assert_eq!(config.ui.theme, ThemeMode::Dark);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
openweathermap:
  api_key: abc
  api_base_url: http://localhost:1234
location:
  latitude: 48.85
  longitude: 2.35
ui:
  theme: light
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.openweathermap.api_base_url, "http://localhost:1234");
        assert_eq!(
            config.location.fixed_coordinates(),
            Some(Coordinates::new(48.85, 2.35))
        );
        assert_eq!(config.ui.theme, ThemeMode::Light);
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("SKYGLANCE_TEST_KEY", "from-env");
        let config =
            Config::parse("openweathermap:\n  api_key: ${SKYGLANCE_TEST_KEY}\n").unwrap();
        assert_eq!(config.openweathermap.api_key, "from-env");
    }

    #[test]
    fn unknown_env_vars_are_left_in_place() {
        let out = Config::substitute_env_vars("key: ${SKYGLANCE_DEFINITELY_UNSET}");
        assert_eq!(out, "key: ${SKYGLANCE_DEFINITELY_UNSET}");
    }

    #[test]
    fn validate_rejects_missing_api_key() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn validate_rejects_half_coordinates() {
        let mut config = Config::default();
        config.openweathermap.api_key = "abc".into();
        config.location.latitude = Some(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "openweathermap:\n  api_key: filekey\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.openweathermap.api_key, "filekey");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/skyglance/config.yaml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut config = OpenWeatherMapConfig::default();
        config.api_key = "secret".into();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
