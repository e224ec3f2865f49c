//! Digital-forecast table parsing.
//!
//! The digital page encodes a two-dimensional (day x hour) grid as a flat
//! set of label-keyed rows, with the date label appearing once per day block
//! instead of once per column. Parsing therefore happens in three passes:
//! accumulate the recognized rows, reassemble (date, hour) pairs from the
//! sparse date labels, then zip the pairs positionally against the value
//! rows. Any length mismatch in the final zip is a layout error.

use crate::client::HttpClient;
use crate::models::{Coordinate, ForecastRecord};
use crate::scrape::{cell_text, parse_selector, PageSchema};
use crate::{Result, WxError};
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Parser for the digital (hour-by-hour) forecast page.
#[derive(Debug)]
pub struct DigitalForecastParser {
    http: Arc<HttpClient>,
    base_url: String,
    schema: PageSchema,
}

/// URL of the digital forecast page for a coordinate.
#[must_use]
pub fn digital_forecast_url(base_url: &str, coordinate: &Coordinate) -> String {
    format!(
        "{}/MapClick.php?lat={}&lon={}&lg=english&FcstType=digital",
        base_url, coordinate.latitude, coordinate.longitude
    )
}

/// Accumulated cell texts of the five recognized rows. The labels repeat on
/// the real page (one row set per 24-hour half), so each accumulator may be
/// fed by several rows.
#[derive(Debug, Default)]
struct RowAccumulators {
    dates: Vec<String>,
    hours: Vec<String>,
    temps: Vec<String>,
    winds: Vec<String>,
    humidities: Vec<String>,
}

impl DigitalForecastParser {
    #[must_use]
    pub fn new(http: Arc<HttpClient>, base_url: String, schema: PageSchema) -> Self {
        Self {
            http,
            base_url,
            schema,
        }
    }

    /// Fetch the digital forecast page for a coordinate and parse it into an
    /// ordered record sequence.
    #[instrument(skip(self))]
    pub async fn parse_digital_forecast(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<ForecastRecord>> {
        let url = digital_forecast_url(&self.base_url, coordinate);
        let body = self.http.get_text(&url).await?;
        let records = parse_digital_html(&body, &self.schema)?;
        debug!("Parsed {} forecast records", records.len());
        Ok(records)
    }
}

/// Parse an already-fetched digital forecast page.
///
/// Selects the table at `schema.table_index` among all tables in document
/// order, walks its rows keyed by the leading label cell, and reassembles
/// the flattened grid into per-hour records.
pub fn parse_digital_html(html: &str, schema: &PageSchema) -> Result<Vec<ForecastRecord>> {
    let document = Html::parse_document(html);

    let table_sel = parse_selector("table")?;
    let table = document
        .select(&table_sel)
        .nth(schema.table_index)
        .ok_or_else(|| {
            WxError::layout(format!(
                "expected at least {} tables on the digital forecast page",
                schema.table_index + 1
            ))
        })?;

    let row_sel = parse_selector("tr")?;
    let cell_sel = parse_selector("td, th")?;

    let mut rows = RowAccumulators::default();
    for row in table.select(&row_sel) {
        let mut cells = row.select(&cell_sel).map(cell_text);
        let Some(label) = cells.next() else {
            continue;
        };
        // Trailing cells after the label, empty ones dropped. A row feeds at
        // most one accumulator; unrecognized labels are ignored.
        let values = cells.filter(|cell| !cell.is_empty());
        if label == schema.date_label {
            rows.dates.extend(values);
        } else if label.starts_with(&schema.hour_prefix) {
            rows.hours.extend(values);
        } else if label == schema.temperature_label {
            rows.temps.extend(values);
        } else if label == schema.wind_label {
            rows.winds.extend(values);
        } else if label == schema.humidity_label {
            rows.humidities.extend(values);
        }
    }

    assemble_records(rows)
}

fn assemble_records(rows: RowAccumulators) -> Result<Vec<ForecastRecord>> {
    let pairs = pair_dates_and_hours(&rows.dates, &rows.hours);
    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    for (name, len) in [
        ("temperature", rows.temps.len()),
        ("wind", rows.winds.len()),
        ("humidity", rows.humidities.len()),
    ] {
        if len != pairs.len() {
            return Err(WxError::layout(format!(
                "{name} row has {len} values but {} (date, hour) pairs were assembled",
                pairs.len()
            )));
        }
    }

    let records = pairs
        .into_iter()
        .zip(rows.temps)
        .zip(rows.winds)
        .zip(rows.humidities)
        .map(|((((date, hour), temp), wind), humidity)| ForecastRecord {
            display_date: format_display_date(&date, &hour),
            hour,
            temperature_f: parse_value(&temp),
            wind_mph: parse_value(&wind),
            humidity_pct: parse_value(&humidity),
        })
        .collect();

    Ok(records)
}

/// Reassemble (date, hour) pairs from a sparse date row.
///
/// Hours partition evenly across dates at `H / D` per block (integer
/// division); the final date absorbs any remainder. The cursor advances by
/// the actual block length, so an undersized final slice cannot skip hours.
fn pair_dates_and_hours(dates: &[String], hours: &[String]) -> Vec<(String, String)> {
    if dates.is_empty() || hours.is_empty() {
        return Vec::new();
    }

    let block = hours.len() / dates.len();
    let mut pairs = Vec::with_capacity(hours.len());
    let mut cursor = 0;

    for (i, date) in dates.iter().enumerate() {
        let slice = if i == dates.len() - 1 {
            &hours[cursor..]
        } else {
            &hours[cursor..(cursor + block).min(hours.len())]
        };
        for hour in slice {
            pairs.push((date.clone(), hour.clone()));
        }
        cursor += slice.len();
    }

    pairs
}

/// Format a sparse date token and hour token into a display string, e.g.
/// `("5/10", "22")` into `"May 10, 22:00"`. A date token that does not match
/// the expected `month/day` pattern passes through raw; degraded, not fatal.
fn format_display_date(date: &str, hour: &str) -> String {
    let hour_part = match hour.parse::<u32>() {
        Ok(h) => format!("{h:02}:00"),
        Err(_) => format!("{hour}:00"),
    };

    let date_part = parse_month_day(date)
        .map(|(month, day)| format!("{} {day}", month_name(month)))
        .unwrap_or_else(|| date.to_string());

    format!("{date_part}, {hour_part}")
}

fn parse_month_day(token: &str) -> Option<(u32, u32)> {
    let (month, day) = token.split_once('/')?;
    let month = month.parse::<u32>().ok()?;
    let day = day.parse::<u32>().ok()?;
    if (1..=12).contains(&month) && (1..=31).contains(&day) {
        Some((month, day))
    } else {
        None
    }
}

fn month_name(month: u32) -> &'static str {
    // parse_month_day guarantees 1..=12.
    chrono::Month::try_from(month as u8)
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

/// The page renders gaps as "--" or blank; those become missing values, not
/// errors.
fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse().ok()
}
