use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 地面站座標 (程序啟動時給定，之後不變)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatelliteTarget {
    pub id: String,
}

impl SatelliteTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// 解析逗號分隔的衛星 ID 清單：去除空白、丟棄空項目、保留順序與重複
    pub fn parse_list(raw: &str) -> Vec<SatelliteTarget> {
        Self::from_entries(raw.split(','))
    }

    pub fn from_entries<'a, I>(entries: I) -> Vec<SatelliteTarget>
    where
        I: IntoIterator<Item = &'a str>,
    {
        entries
            .into_iter()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| SatelliteTarget::new(id))
            .collect()
    }
}

/// 單一時刻的衛星位置，所有欄位缺少時都回退為 0 / false
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// 上游 `sataltitude` 的單位是公里，不是公尺
    pub altitude_km: f64,
    pub elevation_degrees: f64,
    pub azimuth_degrees: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub timestamp_utc: i64,
    pub eclipsed: bool,
}

impl PositionSample {
    pub fn from_json(value: &Value) -> Self {
        Self {
            altitude_km: number_field(value, "sataltitude"),
            elevation_degrees: number_field(value, "elevation"),
            azimuth_degrees: number_field(value, "azimuth"),
            right_ascension: number_field(value, "ra"),
            declination: number_field(value, "dec"),
            timestamp_utc: value
                .get("timestamp")
                .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
                .unwrap_or(0),
            eclipsed: value.get("eclipsed").and_then(Value::as_bool).unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteInfo {
    pub name: String,
    pub id: Option<String>,
}

impl Default for SatelliteInfo {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            id: None,
        }
    }
}

impl SatelliteInfo {
    pub fn from_json(value: &Value) -> Self {
        let name = value
            .get("satname")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        // satid 在上游是數字，但也容忍字串
        let id = value.get("satid").and_then(|v| match v {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        });

        Self { name, id }
    }
}

/// 追蹤 API 回應解碼後的結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingResponse {
    pub info: SatelliteInfo,
    pub positions: Vec<PositionSample>,
    pub api_error: Option<String>,
}

impl TrackingResponse {
    pub fn from_json(value: &Value) -> Self {
        let info = value
            .get("info")
            .map(SatelliteInfo::from_json)
            .unwrap_or_default();

        let positions = value
            .get("positions")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(PositionSample::from_json).collect())
            .unwrap_or_default();

        let api_error = value
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            info,
            positions,
            api_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityVerdict {
    pub is_visible: bool,
    pub message: Option<String>,
}

impl VisibilityVerdict {
    pub fn not_visible() -> Self {
        Self {
            is_visible: false,
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationBody(String);

impl NotificationBody {
    /// 沒有任何訊息時回傳 None
    pub fn from_messages(messages: &[String]) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self(messages.join("\n")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl std::fmt::Display for NotificationBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: String,
    pub body: String,
}

impl LogRecord {
    pub fn now(body: &NotificationBody) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            body: body.as_str().to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!("{} - {}\n", self.timestamp, self.body)
    }
}

fn number_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}
