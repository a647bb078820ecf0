use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduled sailing on a given date, identified by vessel and departure slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRecord {
    pub date: NaiveDate,
    pub vessel: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    /// Euros, floored to whole units.
    pub price: u32,
    pub available: bool,
}

/// Seat availability for one fare class of an available sailing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub date: NaiveDate,
    pub vessel: String,
    pub category: String,
    pub price: u32,
    /// Rendered "{available}/{total}".
    pub available_seats: String,
}

/// A fare class with fixed capacity and base price.
#[derive(Debug, Clone, Copy)]
pub struct SeatCategory {
    pub name: &'static str,
    pub total: u32,
    pub base_price: f64,
}

/// Everything collected for a single calendar date, in generation order.
#[derive(Debug, Clone)]
pub struct DayRecords {
    pub date: NaiveDate,
    pub itineraries: Vec<ItineraryRecord>,
    pub seats: Vec<SeatRecord>,
}

/// The two result tables plus their rendered CSV bodies. Built once per
/// scrape invocation and not mutated afterwards.
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub itineraries: Vec<ItineraryRecord>,
    pub seats: Vec<SeatRecord>,
    pub itineraries_csv: String,
    pub seats_csv: String,
}

impl ScrapeResult {
    /// Opaque JSON blob for the caller's session store: both tables as
    /// record arrays.
    pub fn to_session_json(&self) -> crate::utils::error::Result<String> {
        let blob = serde_json::json!({
            "itineraries": self.itineraries,
            "seats": self.seats,
        });
        Ok(serde_json::to_string(&blob)?)
    }
}
