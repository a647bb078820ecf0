use crate::core::dates;
use crate::domain::model::{ItineraryRecord, SeatRecord};
use crate::utils::error::{Result, ScrapeError};

pub const ITINERARY_COLUMNS: [&str; 7] = [
    "Date",
    "Vessel",
    "Departure Time",
    "Arrival Time",
    "Duration",
    "Price",
    "Available",
];

pub const SEAT_COLUMNS: [&str; 5] = ["Date", "Vessel", "Category", "Price", "Available Seats"];

pub(crate) fn itinerary_row(record: &ItineraryRecord) -> [String; 7] {
    [
        dates::format_date(record.date),
        record.vessel.clone(),
        record.departure_time.clone(),
        record.arrival_time.clone(),
        record.duration.clone(),
        record.price.to_string(),
        record.available.to_string(),
    ]
}

pub(crate) fn seat_row(record: &SeatRecord) -> [String; 5] {
    [
        dates::format_date(record.date),
        record.vessel.clone(),
        record.category.clone(),
        record.price.to_string(),
        record.available_seats.clone(),
    ]
}

pub fn itineraries_to_csv(records: &[ItineraryRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(ITINERARY_COLUMNS)?;
    for record in records {
        writer.write_record(itinerary_row(record))?;
    }
    into_string(writer)
}

pub fn seats_to_csv(records: &[SeatRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(SEAT_COLUMNS)?;
    for record in records {
        writer.write_record(seat_row(record))?;
    }
    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ScrapeError::ExportFailure {
            message: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| ScrapeError::ExportFailure {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn itinerary(vessel: &str) -> ItineraryRecord {
        ItineraryRecord {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            vessel: vessel.to_string(),
            departure_time: "07:00".to_string(),
            arrival_time: "10:30".to_string(),
            duration: "3h 30m".to_string(),
            price: 75,
            available: true,
        }
    }

    #[test]
    fn test_itineraries_csv_header_and_rows() {
        let csv = itineraries_to_csv(&[itinerary("Champion Jet 1")]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Vessel,Departure Time,Arrival Time,Duration,Price,Available"
        );
        assert_eq!(
            lines.next().unwrap(),
            "02/06/2025,Champion Jet 1,07:00,10:30,3h 30m,75,true"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_table_is_header_only() {
        let csv = itineraries_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);

        let csv = seats_to_csv(&[]).unwrap();
        assert_eq!(
            csv.trim_end(),
            "Date,Vessel,Category,Price,Available Seats"
        );
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let csv = itineraries_to_csv(&[itinerary("Jet, the \"Fast\" one")]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"Jet, the \"\"Fast\"\" one\""));
    }

    #[test]
    fn test_csv_round_trip() {
        let records = vec![itinerary("Champion Jet 1"), itinerary("Tera, Jet")];
        let csv = itineraries_to_csv(&records).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, ITINERARY_COLUMNS);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        for (row, record) in rows.iter().zip(records.iter()) {
            let expected = itinerary_row(record);
            let actual: Vec<&str> = row.iter().collect();
            assert_eq!(actual, expected.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_seats_csv_row_order_preserved() {
        let records: Vec<SeatRecord> = ["Economy", "Business", "VIP", "Premium"]
            .iter()
            .map(|name| SeatRecord {
                date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                vessel: "Champion Jet 1".to_string(),
                category: name.to_string(),
                price: 67,
                available_seats: "43/100".to_string(),
            })
            .collect();

        let csv = seats_to_csv(&records).unwrap();
        let categories: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(2).unwrap())
            .collect();
        assert_eq!(categories, vec!["Economy", "Business", "VIP", "Premium"]);
    }
}
