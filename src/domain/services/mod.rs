pub mod direction;
pub mod time;
pub mod visibility;

pub use direction::{CompassDirection, InvalidAzimuth};
pub use time::TimeLocalizer;
pub use visibility::VisibilityEvaluator;
