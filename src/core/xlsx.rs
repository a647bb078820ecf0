use crate::core::export;
use crate::domain::model::{ItineraryRecord, SeatRecord};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Accent fill behind the header row of both sheets.
pub const HEADER_FILL: &str = "FF1F4E78";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Builds a two-sheet XLSX workbook ("Itineraries", "Seat Availability") in
/// memory. Cell content carries no timestamps and ZIP entries use fixed
/// metadata, so equal inputs produce identical bytes.
pub fn workbook(itineraries: &[ItineraryRecord], seats: &[SeatRecord]) -> Result<Vec<u8>> {
    let itinerary_rows: Vec<Vec<String>> = itineraries
        .iter()
        .map(|r| export::itinerary_row(r).to_vec())
        .collect();
    let seat_rows: Vec<Vec<String>> = seats.iter().map(|r| export::seat_row(r).to_vec()).collect();

    let parts: [(&str, String); 7] = [
        ("[Content_Types].xml", content_types()),
        ("_rels/.rels", package_rels()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", workbook_rels()),
        ("xl/styles.xml", styles_xml()),
        (
            "xl/worksheets/sheet1.xml",
            sheet_xml(&export::ITINERARY_COLUMNS, &itinerary_rows),
        ),
        (
            "xl/worksheets/sheet2.xml",
            sheet_xml(&export::SEAT_COLUMNS, &seat_rows),
        ),
    ];

    let zip_data = {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, content) in parts {
            zip.start_file(name, entry_options())?;
            zip.write_all(content.as_bytes())?;
        }
        let cursor = zip.finish()?;
        cursor.into_inner()
    };

    Ok(zip_data)
}

/// Entries carry the fixed 1980-01-01 timestamp, not the wall clock;
/// otherwise equal inputs would stop producing equal bytes.
fn entry_options() -> FileOptions<'static, ()> {
    FileOptions::default().last_modified_time(zip::DateTime::default())
}

fn content_types() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
         <Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\
         <Override PartName=\"/xl/worksheets/sheet2.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\
         <Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>\
         </Types>",
    );
    xml
}

fn package_rels() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>\
         </Relationships>",
    );
    xml
}

fn workbook_xml() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        "<workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <sheets>\
         <sheet name=\"Itineraries\" sheetId=\"1\" r:id=\"rId1\"/>\
         <sheet name=\"Seat Availability\" sheetId=\"2\" r:id=\"rId2\"/>\
         </sheets>\
         </workbook>",
    );
    xml
}

fn workbook_rels() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet1.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet2.xml\"/>\
         <Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\
         </Relationships>",
    );
    xml
}

/// Style 1 is the header: bold white text on the solid accent fill.
fn styles_xml() -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(&format!(
        "<styleSheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\
         <fonts count=\"2\">\
         <font><sz val=\"11\"/><name val=\"Calibri\"/></font>\
         <font><b/><color rgb=\"FFFFFFFF\"/><sz val=\"11\"/><name val=\"Calibri\"/></font>\
         </fonts>\
         <fills count=\"3\">\
         <fill><patternFill patternType=\"none\"/></fill>\
         <fill><patternFill patternType=\"gray125\"/></fill>\
         <fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>\
         </fills>\
         <borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>\
         <cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>\
         <cellXfs count=\"2\">\
         <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>\
         <xf numFmtId=\"0\" fontId=\"1\" fillId=\"2\" borderId=\"0\" xfId=\"0\" applyFont=\"1\" applyFill=\"1\"/>\
         </cellXfs>\
         </styleSheet>",
        HEADER_FILL
    ));
    xml
}

fn sheet_xml(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        "<worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">",
    );

    xml.push_str("<cols>");
    for (i, max_len) in widths.iter().enumerate() {
        let width = column_width(*max_len);
        xml.push_str(&format!(
            "<col min=\"{0}\" max=\"{0}\" width=\"{1:.2}\" customWidth=\"1\"/>",
            i + 1,
            width
        ));
    }
    xml.push_str("</cols>");

    xml.push_str("<sheetData>");
    xml.push_str("<row r=\"1\">");
    for (i, name) in columns.iter().enumerate() {
        xml.push_str(&format!(
            "<c r=\"{}1\" s=\"1\" t=\"inlineStr\"><is><t>{}</t></is></c>",
            column_letter(i),
            escape_xml(name)
        ));
    }
    xml.push_str("</row>");

    for (row_index, row) in rows.iter().enumerate() {
        let row_number = row_index + 2;
        xml.push_str(&format!("<row r=\"{}\">", row_number));
        for (i, cell) in row.iter().enumerate() {
            xml.push_str(&format!(
                "<c r=\"{}{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                column_letter(i),
                row_number,
                escape_xml(cell)
            ));
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Character-count heuristic: widest rendered value, padded and scaled.
pub fn column_width(max_len: usize) -> f64 {
    (max_len as f64 + 2.0) * 1.2
}

// Both tables stay well under 26 columns.
fn column_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Read;

    fn sample() -> (Vec<ItineraryRecord>, Vec<SeatRecord>) {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let itineraries = vec![ItineraryRecord {
            date,
            vessel: "Champion Jet 1".to_string(),
            departure_time: "07:00".to_string(),
            arrival_time: "10:30".to_string(),
            duration: "3h 30m".to_string(),
            price: 75,
            available: true,
        }];
        let seats = vec![SeatRecord {
            date,
            vessel: "Champion Jet 1".to_string(),
            category: "Economy".to_string(),
            price: 67,
            available_seats: "43/100".to_string(),
        }];
        (itineraries, seats)
    }

    fn read_part(data: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data.to_vec())).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_workbook_has_expected_parts() {
        let (itineraries, seats) = sample();
        let data = workbook(&itineraries, &seats).unwrap();

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/_rels/workbook.xml.rels",
                "xl/styles.xml",
                "xl/workbook.xml",
                "xl/worksheets/sheet1.xml",
                "xl/worksheets/sheet2.xml",
            ]
        );
    }

    #[test]
    fn test_sheet_names() {
        let (itineraries, seats) = sample();
        let data = workbook(&itineraries, &seats).unwrap();
        let wb = read_part(&data, "xl/workbook.xml");
        assert!(wb.contains("name=\"Itineraries\""));
        assert!(wb.contains("name=\"Seat Availability\""));
    }

    #[test]
    fn test_header_style_is_bold_white_on_accent_fill() {
        let (itineraries, seats) = sample();
        let data = workbook(&itineraries, &seats).unwrap();

        let styles = read_part(&data, "xl/styles.xml");
        assert!(styles.contains("<b/>"));
        assert!(styles.contains("rgb=\"FFFFFFFF\""));
        assert!(styles.contains(&format!("rgb=\"{}\"", HEADER_FILL)));

        // Every header cell uses style 1, data cells the default.
        let sheet = read_part(&data, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("<c r=\"A1\" s=\"1\""));
        assert!(sheet.contains("<c r=\"G1\" s=\"1\""));
        assert!(sheet.contains("<c r=\"A2\" t=\"inlineStr\""));
    }

    #[test]
    fn test_column_widths_fit_longest_cell() {
        let (itineraries, seats) = sample();
        let data = workbook(&itineraries, &seats).unwrap();
        let sheet = read_part(&data, "xl/worksheets/sheet1.xml");

        // Column B: "Champion Jet 1" (14 chars) beats the "Vessel" header.
        assert!(sheet.contains("<col min=\"2\" max=\"2\" width=\"19.20\""));
        // Column C: header "Departure Time" (14 chars) is the widest value.
        assert!(sheet.contains("<col min=\"3\" max=\"3\" width=\"19.20\""));

        assert_eq!(column_width(14), 19.2);
        assert!(column_width(0) >= 2.4);
    }

    #[test]
    fn test_empty_tables_still_have_headers_and_cols() {
        let data = workbook(&[], &[]).unwrap();
        let sheet = read_part(&data, "xl/worksheets/sheet2.xml");
        assert!(sheet.contains("<is><t>Available Seats</t></is>"));
        assert!(sheet.contains("customWidth=\"1\""));
        // Header row only.
        assert!(!sheet.contains("<row r=\"2\">"));
    }

    #[test]
    fn test_export_is_reproducible() {
        let (itineraries, seats) = sample();
        let first = workbook(&itineraries, &seats).unwrap();
        let second = workbook(&itineraries, &seats).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_is_reproducible_across_time() {
        // ZIP last-modified fields have 2-second resolution; a wall-clock
        // timestamp would only show up across a longer gap.
        let (itineraries, seats) = sample();
        let first = workbook(&itineraries, &seats).unwrap();
        std::thread::sleep(std::time::Duration::from_secs(3));
        let second = workbook(&itineraries, &seats).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cell_text_is_xml_escaped() {
        let (mut itineraries, seats) = sample();
        itineraries[0].vessel = "Fast & Loose <Jet>".to_string();
        let data = workbook(&itineraries, &seats).unwrap();
        let sheet = read_part(&data, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("Fast &amp; Loose &lt;Jet&gt;"));
    }
}
