use crate::core::generator::SyntheticSource;
use crate::core::{dates, export, xlsx};
use crate::domain::model::{DayRecords, ScrapeResult};
use crate::domain::ports::{ConfigProvider, Pipeline, SourceFetcher, Storage};
use crate::utils::error::Result;
use chrono::Local;

pub struct ScrapePipeline<S: Storage, C: ConfigProvider, F: SourceFetcher> {
    storage: S,
    config: C,
    fetcher: F,
    fallback: SyntheticSource,
}

impl<S: Storage, C: ConfigProvider, F: SourceFetcher> ScrapePipeline<S, C, F> {
    pub fn new(storage: S, config: C, fetcher: F, fallback: SyntheticSource) -> Self {
        Self {
            storage,
            config,
            fetcher,
            fallback,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, F: SourceFetcher> Pipeline for ScrapePipeline<S, C, F> {
    async fn extract(&self) -> Result<Vec<DayRecords>> {
        let range = dates::expand(self.config.start_date(), self.config.end_date())?;
        tracing::debug!(
            "Scraping {} -> {} over {} dates",
            self.config.origin(),
            self.config.destination(),
            range.len()
        );

        let mut days = Vec::with_capacity(range.len());
        for date in range {
            let date_text = dates::format_date(date);

            // Fall back to generated data per date, not for the whole run.
            let (itineraries, fetched) = match self.fetcher.fetch_itineraries(date).await {
                Ok(records) => (records, true),
                Err(e) => {
                    tracing::warn!("Fetch failed for {}, generating data: {}", date_text, e);
                    (self.fallback.fetch_itineraries(date).await?, false)
                }
            };
            tracing::debug!("{}: {} itineraries", date_text, itineraries.len());

            let mut seats = Vec::new();
            for itinerary in itineraries.iter().filter(|i| i.available) {
                let records = if fetched {
                    match self.fetcher.fetch_seats(itinerary).await {
                        Ok(records) => records,
                        Err(e) => {
                            tracing::warn!(
                                "Seat fetch failed for {} on {}, generating data: {}",
                                itinerary.vessel,
                                date_text,
                                e
                            );
                            self.fallback.fetch_seats(itinerary).await?
                        }
                    }
                } else {
                    self.fallback.fetch_seats(itinerary).await?
                };
                seats.extend(records);
            }

            days.push(DayRecords {
                date,
                itineraries,
                seats,
            });
        }

        Ok(days)
    }

    async fn transform(&self, data: Vec<DayRecords>) -> Result<ScrapeResult> {
        let mut itineraries = Vec::new();
        let mut seats = Vec::new();
        for day in data {
            itineraries.extend(day.itineraries);
            seats.extend(day.seats);
        }

        tracing::debug!(
            "Aggregated {} itineraries and {} seat records",
            itineraries.len(),
            seats.len()
        );

        let itineraries_csv = export::itineraries_to_csv(&itineraries)?;
        let seats_csv = export::seats_to_csv(&seats)?;

        Ok(ScrapeResult {
            itineraries,
            seats,
            itineraries_csv,
            seats_csv,
        })
    }

    async fn load(&self, result: ScrapeResult) -> Result<String> {
        // Generation time only appears in filenames, never inside the files.
        let prefix = format!("seajets_scrape_{}", Local::now().format("%Y%m%d_%H%M%S"));

        let workbook = xlsx::workbook(&result.itineraries, &result.seats)?;
        tracing::debug!("Assembled workbook ({} bytes)", workbook.len());

        self.storage
            .write_file(
                &format!("{}_itineraries.csv", prefix),
                result.itineraries_csv.as_bytes(),
            )
            .await?;
        self.storage
            .write_file(&format!("{}_seats.csv", prefix), result.seats_csv.as_bytes())
            .await?;
        self.storage
            .write_file(&format!("{}.xlsx", prefix), &workbook)
            .await?;

        Ok(format!("{}/{}.xlsx", self.config.output_path(), prefix))
    }
}
