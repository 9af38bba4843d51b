use crate::domain::model::{PositionSample, VisibilityVerdict};
use crate::domain::services::direction::CompassDirection;
use crate::domain::services::time::TimeLocalizer;

/// 判斷單一位置樣本是否可見，可見時產生提示訊息
///
/// 仰角 > 0 表示在地平線之上；eclipsed 表示位於地球陰影中，肉眼看不到。
/// 兩個條件缺一不可。
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityEvaluator {
    localizer: TimeLocalizer,
}

impl VisibilityEvaluator {
    pub fn new(localizer: TimeLocalizer) -> Self {
        Self { localizer }
    }

    pub fn is_visible(sample: &PositionSample) -> bool {
        sample.elevation_degrees > 0.0 && !sample.eclipsed
    }

    pub fn evaluate(
        &self,
        sample: &PositionSample,
        satellite_id: &str,
        satellite_name: &str,
    ) -> VisibilityVerdict {
        if !Self::is_visible(sample) {
            return VisibilityVerdict::not_visible();
        }

        VisibilityVerdict {
            is_visible: true,
            message: Some(self.render_message(sample, satellite_id, satellite_name)),
        }
    }

    fn render_message(
        &self,
        sample: &PositionSample,
        satellite_id: &str,
        satellite_name: &str,
    ) -> String {
        let direction = match CompassDirection::from_azimuth(sample.azimuth_degrees) {
            Ok(direction) => direction.to_string(),
            Err(e) => {
                tracing::warn!("⚠️ Satellite {} reported {}", satellite_id, e);
                "invalid azimuth".to_string()
            }
        };

        let local_time = self
            .localizer
            .localize(sample.timestamp_utc)
            .unwrap_or_else(|| format!("unknown time (epoch {})", sample.timestamp_utc));

        format!(
            "Satellite {} (ID: {}) is visible over your area at {} ({}). Look {}, azimuth {:.2}°, elevation {:.2}°.",
            satellite_name,
            satellite_id,
            local_time,
            self.localizer.timezone().name(),
            direction,
            sample.azimuth_degrees,
            sample.elevation_degrees,
        )
    }
}
