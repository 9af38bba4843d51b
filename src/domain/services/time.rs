use chrono::DateTime;
use chrono_tz::Tz;

pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 將 UTC epoch 秒轉為觀測者時區的當地時間 (含夏令時間規則)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLocalizer {
    timezone: Tz,
}

impl TimeLocalizer {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// 超出 chrono 可表示範圍的時間戳回傳 None
    pub fn localize(&self, timestamp_utc: i64) -> Option<String> {
        let utc = DateTime::from_timestamp(timestamp_utc, 0)?;
        Some(
            utc.with_timezone(&self.timezone)
                .format(LOCAL_TIME_FORMAT)
                .to_string(),
        )
    }
}

impl Default for TimeLocalizer {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}
