use crate::config::{
    AlertConfig, ApiConfig, LogConfig, SatelliteIds, SatellitesConfig, SmtpConfig, StationConfig,
    DEFAULT_LOG_FILE,
};
use crate::utils::error::{AlertError, Result};
use std::env;
use std::str::FromStr;

impl AlertConfig {
    /// 從環境變數建立配置 (LATITUDE, SATELLITE_ID, SMTP_SERVER ...)
    pub fn from_env() -> Result<Self> {
        let ids = env::var("SATELLITE_IDS")
            .or_else(|_| env::var("SATELLITE_ID"))
            .map_err(|_| AlertError::MissingConfigError {
                field: "SATELLITE_IDS".to_string(),
            })?;

        // SMTP_SERVER 沒設定就只寫日誌
        let smtp = match env::var("SMTP_SERVER") {
            Ok(host) => Some(SmtpConfig {
                host,
                port: optional_parsed("SMTP_PORT")?,
                username: required("EMAIL_USER")?,
                password: required("EMAIL_PASSWORD")?,
                recipient: required("RECIPIENT_EMAIL")?,
            }),
            Err(_) => None,
        };

        Ok(Self {
            station: StationConfig {
                latitude: required_parsed("LATITUDE")?,
                longitude: required_parsed("LONGITUDE")?,
                altitude: required_parsed("ALTITUDE")?,
                timezone: env::var("TIMEZONE").ok(),
            },
            satellites: SatellitesConfig {
                ids: SatelliteIds::Delimited(ids),
            },
            api: ApiConfig {
                key: required("SATELLITE_API_KEY")?,
                base_url: env::var("SATELLITE_API_URL").ok(),
                prediction_seconds: optional_parsed("PREDICTION_SECONDS")?,
                timeout_seconds: optional_parsed("REQUEST_TIMEOUT_SECONDS")?,
            },
            smtp,
            log: LogConfig {
                directory: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
                file: Some(env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string())),
            },
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| AlertError::MissingConfigError {
        field: name.to_string(),
    })
}

fn required_parsed<T: FromStr>(name: &str) -> Result<T> {
    let raw = required(name)?;
    parse_value(name, &raw)
}

fn optional_parsed<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AlertError::InvalidConfigValueError {
            field: name.to_string(),
            value: raw.to_string(),
            reason: "Could not parse value".to_string(),
        })
}
