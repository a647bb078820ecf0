use crate::core::dates;
use crate::domain::model::{ItineraryRecord, SeatCategory, SeatRecord};
use crate::domain::ports::SourceFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};

pub const VESSELS: [&str; 4] = ["Champion Jet 1", "Champion Jet 2", "Tera Jet", "Super Jet"];

pub const SEAT_CATEGORIES: [SeatCategory; 4] = [
    SeatCategory {
        name: "Economy",
        total: 100,
        base_price: 45.0,
    },
    SeatCategory {
        name: "Business",
        total: 50,
        base_price: 75.0,
    },
    SeatCategory {
        name: "VIP",
        total: 20,
        base_price: 120.0,
    },
    SeatCategory {
        name: "Premium",
        total: 10,
        base_price: 180.0,
    },
];

/// Deterministic data source used when the live source is unreachable.
/// Derives sailings and seat availability from date arithmetic alone, so
/// equal (date, today) inputs always produce equal records.
pub struct SyntheticSource {
    today: NaiveDate,
}

impl SyntheticSource {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn is_high_season(date: NaiveDate) -> bool {
        (6..=9).contains(&date.month())
    }

    pub fn day_itineraries(&self, date: NaiveDate) -> Vec<ItineraryRecord> {
        if Self::is_weekend(date) {
            tracing::debug!("No service on weekends: {}", dates::format_date(date));
            return Vec::new();
        }

        // Equivalent to min(3, max(1, day % 4)).
        let slots = (date.day() % 4).clamp(1, 3);
        let weekend = Self::is_weekend(date);
        let high_season = Self::is_high_season(date);

        (0..slots)
            .map(|i| {
                let mut price = 45 + i * 15;
                // Unreachable while weekends are filtered above; kept as the
                // source system computes it.
                if weekend {
                    price += 20;
                }
                if high_season {
                    price += 30;
                }

                ItineraryRecord {
                    date,
                    vessel: VESSELS[i as usize % VESSELS.len()].to_string(),
                    departure_time: format!("{:02}:00", 7 + i * 3),
                    arrival_time: format!("{:02}:30", 10 + i * 3),
                    // Constant, not derived from the departure/arrival delta.
                    duration: "3h 30m".to_string(),
                    price,
                    available: date > self.today,
                }
            })
            .collect()
    }

    pub fn seat_availability(&self, date: NaiveDate, vessel: &str) -> Vec<SeatRecord> {
        let days_until = (date - self.today).num_days();
        // The further out the sailing, the more seats remain.
        let fraction = (days_until as f64 / 30.0).clamp(0.10, 0.95);
        let seasonal = if Self::is_high_season(date) { 1.5 } else { 1.0 };
        let weekend = if Self::is_weekend(date) { 1.2 } else { 1.0 };

        SEAT_CATEGORIES
            .iter()
            .map(|category| {
                let available = (category.total as f64 * fraction).floor() as u32;
                SeatRecord {
                    date,
                    vessel: vessel.to_string(),
                    category: category.name.to_string(),
                    price: (category.base_price * seasonal * weekend).floor() as u32,
                    available_seats: format!("{}/{}", available, category.total),
                }
            })
            .collect()
    }
}

#[async_trait]
impl SourceFetcher for SyntheticSource {
    async fn fetch_itineraries(&self, date: NaiveDate) -> Result<Vec<ItineraryRecord>> {
        Ok(self.day_itineraries(date))
    }

    async fn fetch_seats(&self, itinerary: &ItineraryRecord) -> Result<Vec<SeatRecord>> {
        Ok(self.seat_availability(itinerary.date, &itinerary.vessel))
    }
}
