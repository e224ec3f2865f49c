//! CSV export of the parsed forecast.
//!
//! One flat file per fetch cycle, written wholesale; there is no other
//! persistence.

use crate::format::format_for_export;
use crate::models::ForecastRecord;
use crate::Result;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Export column headers, in order.
pub const CSV_HEADERS: [&str; 5] = [
    "Date",
    "Hour",
    "Temperature (F)",
    "Surface Wind Speed (mph)",
    "Relative Humidity (%)",
];

/// Write all records to a CSV file, overwriting any previous export.
pub fn write_csv(records: &[ForecastRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_records(&mut writer, records)?;
    debug!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

/// Render the CSV export in memory, for serving over HTTP.
pub fn to_csv_string(records: &[ForecastRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_records(&mut writer, records)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    // The writer only ever receives UTF-8 strings.
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()).into())
}

fn write_records<W: Write>(writer: &mut csv::Writer<W>, records: &[ForecastRecord]) -> Result<()> {
    writer.write_record(CSV_HEADERS)?;
    for row in format_for_export(records) {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<ForecastRecord> {
        vec![
            ForecastRecord {
                display_date: "May 10, 22:00".into(),
                hour: "22".into(),
                temperature_f: Some(59.0),
                wind_mph: Some(7.0),
                humidity_pct: Some(49.0),
            },
            ForecastRecord {
                display_date: "May 11, 00:00".into(),
                hour: "0".into(),
                temperature_f: None,
                wind_mph: Some(5.0),
                humidity_pct: Some(63.0),
            },
        ]
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_record() {
        let csv = to_csv_string(&sample_records()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Date,Hour,Temperature (F),Surface Wind Speed (mph),Relative Humidity (%)"
        );
        assert_eq!(lines[1], "\"May 10, 22:00\",22,59,7,49");
    }

    #[test]
    fn test_csv_round_trip() {
        let records = sample_records();
        let csv = to_csv_string(&records).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();

        assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            assert_eq!(&row[0], record.display_date.as_str());
            assert_eq!(&row[1], record.hour.as_str());
            let temperature = row[2].parse::<f64>().ok();
            assert_eq!(temperature, record.temperature_f);
            assert_eq!(row[3].parse::<f64>().ok(), record.wind_mph);
            assert_eq!(row[4].parse::<f64>().ok(), record.humidity_pct);
        }
    }

    #[test]
    fn test_empty_records_still_write_header() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
