use crate::config::AlertConfig;
use crate::domain::model::Coordinates;
use crate::domain::ports::SatelliteFetcher;
use crate::utils::error::{AlertError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// N2YO REST API 的 positions 端點
pub struct N2yoClient {
    client: Client,
    base_url: String,
    api_key: String,
    prediction_seconds: u32,
}

impl N2yoClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        prediction_seconds: u32,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
            api_key: api_key.into(),
            prediction_seconds,
        })
    }

    pub fn from_config(config: &AlertConfig) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            config.api.key.clone(),
            config.prediction_seconds(),
            config.api.timeout_seconds.map(Duration::from_secs),
        )
    }

    /// 不含 apiKey，可以安全寫入日誌
    pub fn positions_url(&self, satellite_id: &str, coordinates: &Coordinates) -> String {
        format!(
            "{}/positions/{}/{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            satellite_id,
            coordinates.latitude,
            coordinates.longitude,
            coordinates.altitude,
            self.prediction_seconds
        )
    }
}

#[async_trait]
impl SatelliteFetcher for N2yoClient {
    async fn fetch(&self, satellite_id: &str, coordinates: &Coordinates) -> Result<String> {
        let url = self.positions_url(satellite_id, coordinates);
        tracing::debug!("Making tracking API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AlertError::fetch(satellite_id, e.to_string()))?;

        let status = response.status();
        tracing::debug!("Tracking API response status: {}", status);

        if !status.is_success() {
            return Err(AlertError::fetch(
                satellite_id,
                format!("unexpected HTTP status {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| AlertError::fetch(satellite_id, e.to_string()))
    }
}
