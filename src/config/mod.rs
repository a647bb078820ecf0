pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ferry-scrape")]
#[command(about = "Collect ferry itineraries and seat availability for a date range")]
pub struct CliConfig {
    #[arg(long, help = "Start date (DD/MM/YYYY)")]
    pub start_date: String,

    #[arg(long, help = "End date (DD/MM/YYYY)")]
    pub end_date: String,

    #[arg(long, default_value = "https://www.seajets.com/en")]
    pub api_endpoint: String,

    #[arg(long, default_value = "Piraeus")]
    pub origin: String,

    #[arg(long, default_value = "Milos")]
    pub destination: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "3")]
    pub retry_attempts: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn destination(&self) -> &str {
        &self.destination
    }

    fn start_date(&self) -> &str {
        &self.start_date
    }

    fn end_date(&self) -> &str {
        &self.end_date
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn retry_attempts(&self) -> usize {
        self.retry_attempts
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_date(&self.start_date)?;
        validation::validate_date(&self.end_date)?;
        validation::validate_non_empty_string("origin", &self.origin)?;
        validation::validate_non_empty_string("destination", &self.destination)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("retry_attempts", self.retry_attempts, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            start_date: "01/06/2025".to_string(),
            end_date: "03/06/2025".to_string(),
            api_endpoint: "https://www.seajets.com/en".to_string(),
            origin: "Piraeus".to_string(),
            destination: "Milos".to_string(),
            output_path: "./output".to_string(),
            retry_attempts: 3,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_malformed_dates_rejected() {
        let mut config = config();
        config.start_date = "2025-06-01".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_retries_rejected() {
        let mut config = config();
        config.retry_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let mut config = config();
        config.api_endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }
}
