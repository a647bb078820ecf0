pub mod dates;
pub mod engine;
pub mod export;
pub mod generator;
pub mod pipeline;
pub mod source;
pub mod xlsx;

pub use crate::domain::model::{DayRecords, ItineraryRecord, ScrapeResult, SeatRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SourceFetcher, Storage};
pub use crate::utils::error::Result;
