use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting scrape...");

        println!("Collecting itineraries...");
        let days = self.pipeline.extract().await?;
        println!("Collected data for {} dates", days.len());

        println!("Building result tables...");
        let result = self.pipeline.transform(days).await?;
        println!(
            "Aggregated {} itineraries, {} seat records",
            result.itineraries.len(),
            result.seats.len()
        );

        println!("Exporting...");
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
