use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

/// 方位角不在 [0, 360) 內，屬於資料品質問題而非致命錯誤
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid azimuth {0}")]
pub struct InvalidAzimuth(pub f64);

const SECTORS: [CompassDirection; 8] = [
    CompassDirection::North,
    CompassDirection::Northeast,
    CompassDirection::East,
    CompassDirection::Southeast,
    CompassDirection::South,
    CompassDirection::Southwest,
    CompassDirection::West,
    CompassDirection::Northwest,
];

const SECTOR_WIDTH: f64 = 45.0;

impl CompassDirection {
    /// 0° = 北，順時針，每 45° 一個半開區間
    pub fn from_azimuth(azimuth: f64) -> Result<Self, InvalidAzimuth> {
        if !(0.0..360.0).contains(&azimuth) {
            return Err(InvalidAzimuth(azimuth));
        }
        let index = (azimuth / SECTOR_WIDTH).floor() as usize;
        Ok(SECTORS[index.min(SECTORS.len() - 1)])
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassDirection::North => "North",
            CompassDirection::Northeast => "Northeast",
            CompassDirection::East => "East",
            CompassDirection::Southeast => "Southeast",
            CompassDirection::South => "South",
            CompassDirection::Southwest => "Southwest",
            CompassDirection::West => "West",
            CompassDirection::Northwest => "Northwest",
        }
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
