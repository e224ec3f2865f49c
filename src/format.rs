//! Record formatting for display and export.
//!
//! Display rows carry unit-suffixed strings and are truncated to the
//! configured window; export rows keep the raw values so charting and CSV
//! consumers are not stuck stripping suffixes back off.

use crate::models::{ForecastRecord, Trend};
use serde::Serialize;

/// Unit suffixes applied to display values.
pub const TEMPERATURE_SUFFIX: &str = "°F";
pub const WIND_SUFFIX: &str = " mph";
pub const HUMIDITY_SUFFIX: &str = "%";

/// One row of the summary table, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub date: String,
    pub temperature: String,
    pub wind: String,
    pub humidity: String,
}

/// Format the leading `window` records with unit suffixes.
///
/// The window is a display policy, not derived from the data; records past
/// it are simply not shown.
#[must_use]
pub fn format_for_display(records: &[ForecastRecord], window: usize) -> Vec<DisplayRow> {
    records
        .iter()
        .take(window)
        .map(|record| DisplayRow {
            date: record.display_date.clone(),
            temperature: suffixed(record.temperature_f, TEMPERATURE_SUFFIX),
            wind: suffixed(record.wind_mph, WIND_SUFFIX),
            humidity: suffixed(record.humidity_pct, HUMIDITY_SUFFIX),
        })
        .collect()
}

/// Flatten records into exportable rows: date, hour, then the three raw
/// values with missing cells left empty.
#[must_use]
pub fn format_for_export(records: &[ForecastRecord]) -> Vec<[String; 5]> {
    records
        .iter()
        .map(|record| {
            [
                record.display_date.clone(),
                record.hour.clone(),
                number_or_empty(record.temperature_f),
                number_or_empty(record.wind_mph),
                number_or_empty(record.humidity_pct),
            ]
        })
        .collect()
}

/// Direction of change of a current display value against a prior reference.
/// Either side failing to parse as a number yields [`Trend::None`].
#[must_use]
pub fn trend(current: &str, previous: Option<f64>) -> Trend {
    let (Some(current), Some(previous)) = (leading_number(current), previous) else {
        return Trend::None;
    };
    if current > previous {
        Trend::Up
    } else if current < previous {
        Trend::Down
    } else {
        Trend::None
    }
}

/// Parse the numeric prefix of a display value such as `"59°F"` or `"44%"`.
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    text[..end].parse().ok()
}

fn suffixed(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{}{suffix}", number(v)),
        None => "N/A".to_string(),
    }
}

fn number_or_empty(value: Option<f64>) -> String {
    value.map(number).unwrap_or_default()
}

/// Whole numbers print without a trailing `.0`, matching the page's cells.
fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, hour: &str, temp: Option<f64>) -> ForecastRecord {
        ForecastRecord {
            display_date: date.to_string(),
            hour: hour.to_string(),
            temperature_f: temp,
            wind_mph: Some(7.0),
            humidity_pct: Some(49.0),
        }
    }

    #[test]
    fn test_display_rows_carry_unit_suffixes() {
        let records = vec![record("May 10, 22:00", "22", Some(59.0))];
        let rows = format_for_display(&records, 10);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "May 10, 22:00");
        assert_eq!(rows[0].temperature, "59°F");
        assert_eq!(rows[0].wind, "7 mph");
        assert_eq!(rows[0].humidity, "49%");
    }

    #[test]
    fn test_display_window_truncates() {
        let records: Vec<ForecastRecord> = (0..24)
            .map(|h| record("May 10", &h.to_string(), Some(50.0)))
            .collect();
        assert_eq!(format_for_display(&records, 10).len(), 10);
        assert_eq!(format_for_display(&records, 30).len(), 24);
    }

    #[test]
    fn test_missing_value_displays_as_na() {
        let records = vec![record("May 10, 22:00", "22", None)];
        let rows = format_for_display(&records, 10);
        assert_eq!(rows[0].temperature, "N/A");
    }

    #[test]
    fn test_export_keeps_raw_values() {
        let records = vec![record("May 10, 22:00", "22", Some(59.0))];
        let rows = format_for_export(&records);
        assert_eq!(
            rows[0],
            [
                "May 10, 22:00".to_string(),
                "22".to_string(),
                "59".to_string(),
                "7".to_string(),
                "49".to_string()
            ]
        );
    }

    #[test]
    fn test_export_leaves_missing_cells_empty() {
        let records = vec![record("May 10, 22:00", "22", None)];
        let rows = format_for_export(&records);
        assert_eq!(rows[0][2], "");
    }

    #[test]
    fn test_trend_directions() {
        assert_eq!(trend("59°F", Some(50.0)), Trend::Up);
        assert_eq!(trend("59°F", Some(70.0)), Trend::Down);
        assert_eq!(trend("59°F", Some(59.0)), Trend::None);
    }

    #[test]
    fn test_trend_without_reference_or_number() {
        assert_eq!(trend("59°F", None), Trend::None);
        assert_eq!(trend("N/A", Some(50.0)), Trend::None);
        assert_eq!(trend("NW 10 mph", Some(5.0)), Trend::None);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("59°F"), Some(59.0));
        assert_eq!(leading_number("44%"), Some(44.0));
        assert_eq!(leading_number("-3°F"), Some(-3.0));
        assert_eq!(leading_number("30.01 in"), Some(30.01));
        assert_eq!(leading_number("Calm"), None);
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(59.0), "59");
        assert_eq!(number(-3.0), "-3");
        assert_eq!(number(30.01), "30.01");
    }
}
