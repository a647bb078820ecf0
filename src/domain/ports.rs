use crate::domain::model::{DayRecords, ItineraryRecord, ScrapeResult, SeatRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn origin(&self) -> &str;
    fn destination(&self) -> &str;
    fn start_date(&self) -> &str;
    fn end_date(&self) -> &str;
    fn output_path(&self) -> &str;
    fn retry_attempts(&self) -> usize;
}

/// Where itinerary and seat data comes from. Seat records are only ever
/// requested for available itineraries.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_itineraries(&self, date: NaiveDate) -> Result<Vec<ItineraryRecord>>;
    async fn fetch_seats(&self, itinerary: &ItineraryRecord) -> Result<Vec<SeatRecord>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<DayRecords>>;
    async fn transform(&self, data: Vec<DayRecords>) -> Result<ScrapeResult>;
    async fn load(&self, result: ScrapeResult) -> Result<String>;
}
