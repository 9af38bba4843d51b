use crate::core::{Coordinates, SatelliteFetcher, SatelliteTarget, TrackingResponse};
use crate::domain::services::VisibilityEvaluator;
use crate::utils::error::{AlertError, Result};

/// 單顆衛星的查詢結果
#[derive(Debug)]
pub enum QueryOutcome {
    Visible(String),
    NotVisible,
    Failed(AlertError),
}

impl QueryOutcome {
    pub fn message(&self) -> Option<&str> {
        match self {
            QueryOutcome::Visible(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, QueryOutcome::Failed(_))
    }
}

pub struct SatelliteQuery<F: SatelliteFetcher> {
    fetcher: F,
    coordinates: Coordinates,
    evaluator: VisibilityEvaluator,
}

impl<F: SatelliteFetcher> SatelliteQuery<F> {
    pub fn new(fetcher: F, coordinates: Coordinates, evaluator: VisibilityEvaluator) -> Self {
        Self {
            fetcher,
            coordinates,
            evaluator,
        }
    }

    /// 查詢失敗只影響這顆衛星，錯誤包在 QueryOutcome::Failed 裡回傳
    pub async fn query(&self, target: &SatelliteTarget) -> QueryOutcome {
        match self.try_query(target).await {
            Ok(Some(message)) => QueryOutcome::Visible(message),
            Ok(None) => QueryOutcome::NotVisible,
            Err(e) => {
                tracing::warn!(
                    "❌ Satellite {} skipped: {} (Category: {:?})",
                    target.id,
                    e,
                    e.category()
                );
                QueryOutcome::Failed(e)
            }
        }
    }

    async fn try_query(&self, target: &SatelliteTarget) -> Result<Option<String>> {
        let raw = self.fetcher.fetch(&target.id, &self.coordinates).await?;

        let json: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| AlertError::malformed(&target.id, format!("body is not JSON: {}", e)))?;

        let response = TrackingResponse::from_json(&json);
        if let Some(api_error) = &response.api_error {
            return Err(AlertError::fetch(
                &target.id,
                format!("API reported: {}", api_error),
            ));
        }

        tracing::debug!(
            "Satellite {} ({}): {} position samples",
            target.id,
            response.info.name,
            response.positions.len()
        );

        Ok(self.first_visible(&target.id, &response))
    }

    /// 依回應順序找第一個可見樣本，找到即停止
    pub fn first_visible(&self, requested_id: &str, response: &TrackingResponse) -> Option<String> {
        let satellite_id = response.info.id.as_deref().unwrap_or(requested_id);
        let satellite_name = response.info.name.as_str();

        response.positions.iter().find_map(|sample| {
            let verdict = self.evaluator.evaluate(sample, satellite_id, satellite_name);
            if !verdict.is_visible {
                tracing::debug!(
                    "Satellite {} not visible at {} (elevation {:.2}°, eclipsed {})",
                    satellite_name,
                    sample.timestamp_utc,
                    sample.elevation_degrees,
                    sample.eclipsed
                );
            }
            verdict.message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FakeFetcher, FakeResponse};
    use serde_json::json;

    fn coordinates() -> Coordinates {
        Coordinates {
            latitude: 40.41,
            longitude: -3.70,
            altitude: 667.0,
        }
    }

    fn query_with(fetcher: FakeFetcher) -> SatelliteQuery<FakeFetcher> {
        SatelliteQuery::new(fetcher, coordinates(), VisibilityEvaluator::default())
    }

    #[tokio::test]
    async fn test_empty_positions_is_not_visible() {
        let fetcher = FakeFetcher::new().with(
            "25544",
            FakeResponse::json(json!({"info": {"satname": "ISS", "satid": 25544}, "positions": []})),
        );

        let outcome = query_with(fetcher).query(&SatelliteTarget::new("25544")).await;
        assert!(matches!(outcome, QueryOutcome::NotVisible));
    }

    #[tokio::test]
    async fn test_first_visible_sample_wins() {
        let fetcher = FakeFetcher::new().with(
            "25544",
            FakeResponse::json(json!({
                "info": {"satname": "ISS", "satid": 25544},
                "positions": [
                    {"elevation": -5.0, "azimuth": 10.0, "timestamp": 1000, "eclipsed": false},
                    {"elevation": 20.0, "azimuth": 100.0, "timestamp": 2000, "eclipsed": false},
                    {"elevation": 30.0, "azimuth": 200.0, "timestamp": 3000, "eclipsed": false}
                ]
            })),
        );

        let outcome = query_with(fetcher).query(&SatelliteTarget::new("25544")).await;
        let message = outcome.message().unwrap();
        assert!(message.contains("East"));
        assert!(message.contains("100.00°"));
        assert!(!message.contains("200.00°"));
    }

    #[tokio::test]
    async fn test_missing_info_defaults_to_unknown() {
        let fetcher = FakeFetcher::new().with(
            "43013",
            FakeResponse::json(json!({"positions": [{"elevation": 5.0}]})),
        );

        let outcome = query_with(fetcher).query(&SatelliteTarget::new("43013")).await;
        let message = outcome.message().unwrap();
        assert!(message.contains("Unknown"));
        assert!(message.contains("43013"));
    }

    #[tokio::test]
    async fn test_network_failure_is_contained() {
        let fetcher = FakeFetcher::new().with("25544", FakeResponse::NetworkFailure);

        let outcome = query_with(fetcher).query(&SatelliteTarget::new("25544")).await;
        assert!(matches!(outcome, QueryOutcome::Failed(AlertError::FetchError { .. })));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let fetcher = FakeFetcher::new().with("25544", FakeResponse::Raw("<html>".to_string()));

        let outcome = query_with(fetcher).query(&SatelliteTarget::new("25544")).await;
        assert!(matches!(
            outcome,
            QueryOutcome::Failed(AlertError::MalformedResponseError { .. })
        ));
    }

    #[tokio::test]
    async fn test_api_reported_error_is_fetch_error() {
        let fetcher = FakeFetcher::new().with(
            "25544",
            FakeResponse::json(json!({"error": "Invalid API Key!"})),
        );

        let outcome = query_with(fetcher).query(&SatelliteTarget::new("25544")).await;
        assert!(outcome.is_failed());
    }

    #[tokio::test]
    async fn test_passes_coordinates_to_fetcher() {
        let fetcher = FakeFetcher::new();
        let query = query_with(fetcher.clone());

        query.query(&SatelliteTarget::new("99999")).await;

        let calls = fetcher.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "99999");
        assert_eq!(calls[0].1, coordinates());
    }
}
