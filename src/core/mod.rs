pub mod batch_runner;
pub mod notification;
pub mod satellite_query;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{
    Coordinates, LogRecord, NotificationBody, SatelliteTarget, TrackingResponse,
};
pub use crate::domain::ports::{EmailSender, LogStore, SatelliteFetcher};
pub use crate::utils::error::Result;
