use chrono::NaiveDate;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use shared_types::{ConversionFactors, RotationPolicy};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub documents: Option<DocumentsConfig>,
    pub calendar: Option<CalendarConfig>,
    pub factors: Option<ConversionFactors>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            }),
            documents: Some(DocumentsConfig::default()),
            calendar: Some(CalendarConfig::default()),
            factors: Some(ConversionFactors::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DocumentsConfig {
    /// Directory the inspect endpoint resolves filenames against
    pub upload_dir: PathBuf,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        let upload_dir = dirs::data_dir()
            .map(|dir| dir.join("juicelab").join("uploads"))
            .unwrap_or_else(|| PathBuf::from("uploads"));
        Self { upload_dir }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RotationMode {
    #[default]
    MonthStart,
    Epoch,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalendarConfig {
    #[serde(default)]
    pub rotation: RotationMode,
    #[serde(default = "default_initial_shift")]
    pub initial_shift: u8,
    /// Required when `rotation = "epoch"`; written as a quoted "YYYY-MM-DD"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch_date: Option<NaiveDate>,
}

fn default_initial_shift() -> u8 {
    1
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            rotation: RotationMode::MonthStart,
            initial_shift: default_initial_shift(),
            epoch_date: None,
        }
    }
}

impl CalendarConfig {
    pub fn rotation_policy(&self) -> Result<RotationPolicy, ConfigError> {
        match self.rotation {
            RotationMode::MonthStart => Ok(RotationPolicy::MonthStart {
                initial_shift: self.initial_shift,
            }),
            RotationMode::Epoch => {
                let date = self.epoch_date.ok_or_else(|| {
                    ConfigError::Message(
                        "calendar.epoch_date is required when rotation = \"epoch\"".to_string(),
                    )
                })?;
                Ok(RotationPolicy::Epoch {
                    date,
                    shift: self.initial_shift,
                })
            }
        }
    }
}

const DEFAULT_CONFIG_HEADER: &str = r#"# juicelab API configuration
#
# [calendar]
# rotation = "month-start" restarts the shelf-life rotation at
# initial_shift on the first day of every month.
# rotation = "epoch" runs it continuously from epoch_date, e.g.
#   rotation = "epoch"
#   initial_shift = 1
#   epoch_date = "2025-05-01"
#
# [factors] holds the conversion factors used by the calculators.
# Remove any key to fall back to its built-in default.

"#;

impl ApiConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A commented default file is written first if the file is missing.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, default_config_contents()?).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn host_and_port(&self) -> (String, u16) {
        match &self.server {
            Some(server) => (server.host.clone(), server.port),
            None => ("127.0.0.1".to_string(), 8080),
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.documents.clone().unwrap_or_default().upload_dir
    }

    pub fn rotation_policy(&self) -> Result<RotationPolicy, ConfigError> {
        self.calendar.clone().unwrap_or_default().rotation_policy()
    }

    pub fn factors(&self) -> ConversionFactors {
        self.factors.clone().unwrap_or_default()
    }
}

pub fn default_config_contents() -> Result<String, ConfigError> {
    let body = toml::to_string_pretty(&ApiConfig::default())
        .map_err(|e| ConfigError::Message(format!("Failed to render default config: {e}")))?;
    Ok(format!("{}{}", DEFAULT_CONFIG_HEADER, body))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("juicelab").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_is_written_and_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("api.toml");

        let (config, loaded_from) = ApiConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded_from, path);
        assert!(path.exists());

        assert_eq!(config.host_and_port(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(
            config.rotation_policy().unwrap(),
            RotationPolicy::MonthStart { initial_shift: 1 }
        );
        assert_eq!(config.factors(), ConversionFactors::default());
    }

    #[test]
    fn test_epoch_rotation_and_factor_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 9090

[documents]
upload_dir = "/srv/juicelab/uploads"

[calendar]
rotation = "epoch"
initial_shift = 2
epoch_date = "2025-05-01"

[factors.production]
default_tolerance = 5.0
"#,
        )
        .unwrap();

        let (config, _) = ApiConfig::load(Some(&path)).unwrap();
        assert_eq!(config.host_and_port(), ("0.0.0.0".to_string(), 9090));
        assert_eq!(config.upload_dir(), PathBuf::from("/srv/juicelab/uploads"));
        assert_eq!(
            config.rotation_policy().unwrap(),
            RotationPolicy::Epoch {
                date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                shift: 2,
            }
        );

        let factors = config.factors();
        assert_eq!(factors.production.default_tolerance, 5.0);
        // Untouched sections keep their defaults
        assert_eq!(factors.acidity, ConversionFactors::default().acidity);
    }

    #[test]
    fn test_epoch_rotation_requires_date() {
        let calendar = CalendarConfig {
            rotation: RotationMode::Epoch,
            initial_shift: 1,
            epoch_date: None,
        };
        assert!(calendar.rotation_policy().is_err());
    }
}
