#[cfg(feature = "cli")]
pub mod cli;
pub mod env;

use crate::domain::model::{Coordinates, SatelliteTarget};
use crate::utils::error::{AlertError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.n2yo.com/rest/v1/satellite";
pub const DEFAULT_PREDICTION_SECONDS: u32 = 1;
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_LOG_FILE: &str = "satellite_passes.log";
pub const DEFAULT_TIMEZONE: &str = "UTC";
/// N2YO positions 端點最多接受 300 秒
pub const MAX_PREDICTION_SECONDS: u32 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    pub station: StationConfig,
    pub satellites: SatellitesConfig,
    pub api: ApiConfig,
    pub smtp: Option<SmtpConfig>,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatellitesConfig {
    pub ids: SatelliteIds,
}

/// 衛星清單可以是逗號分隔字串或 TOML 陣列
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SatelliteIds {
    Delimited(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub key: String,
    pub base_url: Option<String>,
    pub prediction_seconds: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub directory: String,
    pub file: Option<String>,
}

impl SatelliteIds {
    pub fn targets(&self) -> Vec<SatelliteTarget> {
        match self {
            SatelliteIds::Delimited(raw) => SatelliteTarget::parse_list(raw),
            SatelliteIds::List(ids) => SatelliteTarget::from_entries(ids.iter().map(String::as_str)),
        }
    }
}

impl SmtpConfig {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_SMTP_PORT)
    }
}

impl AlertConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AlertError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AlertError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SATELLITE_API_KEY})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AlertError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.station.latitude,
            longitude: self.station.longitude,
            altitude: self.station.altitude,
        }
    }

    pub fn targets(&self) -> Vec<SatelliteTarget> {
        self.satellites.ids.targets()
    }

    pub fn timezone(&self) -> Result<chrono_tz::Tz> {
        validation::validate_timezone(
            "station.timezone",
            self.station.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE),
        )
    }

    pub fn api_base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn prediction_seconds(&self) -> u32 {
        self.api.prediction_seconds.unwrap_or(DEFAULT_PREDICTION_SECONDS)
    }

    pub fn log_path(&self) -> PathBuf {
        Path::new(&self.log.directory).join(self.log.file.as_deref().unwrap_or(DEFAULT_LOG_FILE))
    }

    pub fn email_enabled(&self) -> bool {
        self.smtp.is_some()
    }
}

impl Validate for AlertConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("station.latitude", self.station.latitude, -90.0, 90.0)?;
        validation::validate_range("station.longitude", self.station.longitude, -180.0, 180.0)?;
        validation::validate_range("station.altitude", self.station.altitude, -500.0, 10_000.0)?;
        self.timezone()?;

        if self.targets().is_empty() {
            return Err(AlertError::MissingConfigError {
                field: "satellites.ids".to_string(),
            });
        }

        validation::validate_non_empty_string("api.key", &self.api.key)?;
        validation::validate_api_base_url("api.base_url", self.api_base_url())?;
        validation::validate_range(
            "api.prediction_seconds",
            self.prediction_seconds(),
            1,
            MAX_PREDICTION_SECONDS,
        )?;

        if let Some(smtp) = &self.smtp {
            validation::validate_non_empty_string("smtp.host", &smtp.host)?;
            validation::validate_range("smtp.port", smtp.port(), 1, u16::MAX)?;
            validation::validate_non_empty_string("smtp.username", &smtp.username)?;
            validation::validate_non_empty_string("smtp.recipient", &smtp.recipient)?;
        }

        validation::validate_log_directory("log.directory", &self.log.directory)?;
        if let Some(file) = &self.log.file {
            validation::validate_log_file_name("log.file", file)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_TOML: &str = r#"
[station]
latitude = 19.43
longitude = -99.13
altitude = 2240.0
timezone = "America/Mexico_City"

[satellites]
ids = "25544, , 33591 "

[api]
key = "TEST-KEY"

[smtp]
host = "smtp.example.com"
username = "alerts@example.com"
password = "secret"
recipient = "me@example.com"

[log]
directory = "./logs"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = AlertConfig::from_toml_str(BASIC_TOML).unwrap();

        assert_eq!(config.coordinates().altitude, 2240.0);
        let ids: Vec<String> = config.targets().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["25544", "33591"]);
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.prediction_seconds(), 1);
        assert_eq!(config.smtp.as_ref().unwrap().port(), 587);
        assert_eq!(config.log_path(), Path::new("./logs").join("satellite_passes.log"));
        assert_eq!(config.timezone().unwrap(), chrono_tz::America::Mexico_City);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_satellite_ids_as_array() {
        let toml_content = BASIC_TOML.replace(
            r#"ids = "25544, , 33591 ""#,
            r#"ids = ["25544", " ", "43013"]"#,
        );
        let config = AlertConfig::from_toml_str(&toml_content).unwrap();
        let ids: Vec<String> = config.targets().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["25544", "43013"]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SAT_ALERT_TEST_API_KEY", "from-env");

        let toml_content = BASIC_TOML.replace("TEST-KEY", "${SAT_ALERT_TEST_API_KEY}");
        let config = AlertConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.api.key, "from-env");

        std::env::remove_var("SAT_ALERT_TEST_API_KEY");
    }

    #[test]
    fn test_unknown_env_var_left_verbatim() {
        let toml_content = BASIC_TOML.replace("TEST-KEY", "${SAT_ALERT_SURELY_UNSET}");
        let config = AlertConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.api.key, "${SAT_ALERT_SURELY_UNSET}");
    }

    #[test]
    fn test_config_validation() {
        let bad_latitude = BASIC_TOML.replace("latitude = 19.43", "latitude = 123.0");
        let config = AlertConfig::from_toml_str(&bad_latitude).unwrap();
        assert!(config.validate().is_err());

        let no_targets = BASIC_TOML.replace(r#"ids = "25544, , 33591 ""#, r#"ids = " , ""#);
        let config = AlertConfig::from_toml_str(&no_targets).unwrap();
        assert!(matches!(
            config.validate(),
            Err(AlertError::MissingConfigError { .. })
        ));

        let bad_zone = BASIC_TOML.replace("America/Mexico_City", "Nowhere/Special");
        let config = AlertConfig::from_toml_str(&bad_zone).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_smtp_section_is_optional() {
        let start = BASIC_TOML.find("[smtp]").unwrap();
        let end = BASIC_TOML.find("[log]").unwrap();
        let toml_content = format!("{}{}", &BASIC_TOML[..start], &BASIC_TOML[end..]);

        let config = AlertConfig::from_toml_str(&toml_content).unwrap();
        assert!(!config.email_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_TOML.as_bytes()).unwrap();

        let config = AlertConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.station.latitude, 19.43);
    }
}
