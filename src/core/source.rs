use crate::core::dates;
use crate::domain::model::{ItineraryRecord, SeatRecord};
use crate::domain::ports::SourceFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct WireItinerary {
    vessel: String,
    departure_time: String,
    arrival_time: String,
    duration: String,
    price: u32,
    available: bool,
}

#[derive(Debug, Deserialize)]
struct WireSeat {
    category: String,
    price: u32,
    available_seats: String,
}

/// Live data source: JSON over HTTP with bounded retries and exponential
/// backoff. Errors propagate to the pipeline, which decides whether to fall
/// back to generated data for the affected date.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    origin: String,
    destination: String,
    attempts: usize,
}

impl HttpSource {
    pub fn new(
        base_url: String,
        origin: String,
        destination: String,
        attempts: usize,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            origin,
            destination,
            attempts: attempts.max(1),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut delay = INITIAL_BACKOFF;
        let mut attempt = 1;
        loop {
            let err = match self.client.get(url).query(query).send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(response) => return Ok(response.json::<T>().await?),
                    Err(e) => e,
                },
                Err(e) => e,
            };

            if attempt >= self.attempts {
                return Err(err.into());
            }
            tracing::warn!(
                "GET {} failed (attempt {}/{}), retrying in {:?}: {}",
                url,
                attempt,
                self.attempts,
                delay,
                err
            );
            tokio::time::sleep(delay).await;
            delay *= 2;
            attempt += 1;
        }
    }
}

#[async_trait]
impl SourceFetcher for HttpSource {
    async fn fetch_itineraries(&self, date: NaiveDate) -> Result<Vec<ItineraryRecord>> {
        let url = format!("{}/itineraries", self.base_url);
        let date_text = dates::format_date(date);
        let query = [
            ("from", self.origin.as_str()),
            ("to", self.destination.as_str()),
            ("date", date_text.as_str()),
        ];

        let wire: Vec<WireItinerary> = self.get_json(&url, &query).await?;
        tracing::debug!("Fetched {} itineraries for {}", wire.len(), date_text);

        Ok(wire
            .into_iter()
            .map(|w| ItineraryRecord {
                date,
                vessel: w.vessel,
                departure_time: w.departure_time,
                arrival_time: w.arrival_time,
                duration: w.duration,
                price: w.price,
                available: w.available,
            })
            .collect())
    }

    async fn fetch_seats(&self, itinerary: &ItineraryRecord) -> Result<Vec<SeatRecord>> {
        let url = format!("{}/seats", self.base_url);
        let date_text = dates::format_date(itinerary.date);
        let query = [
            ("vessel", itinerary.vessel.as_str()),
            ("date", date_text.as_str()),
        ];

        let wire: Vec<WireSeat> = self.get_json(&url, &query).await?;
        tracing::debug!(
            "Fetched {} seat categories for {} on {}",
            wire.len(),
            itinerary.vessel,
            date_text
        );

        Ok(wire
            .into_iter()
            .map(|w| SeatRecord {
                date: itinerary.date,
                vessel: itinerary.vessel.clone(),
                category: w.category,
                price: w.price,
                available_seats: w.available_seats,
            })
            .collect())
    }
}
