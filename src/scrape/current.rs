//! Current-conditions extraction from the MapClick page.
//!
//! The page is scraped, not contracted, so a missing marker degrades the
//! field to `"N/A"` instead of failing the cycle. Only a transport or status
//! failure is an error.

use crate::client::HttpClient;
use crate::models::{Coordinate, CurrentConditions};
use crate::scrape::{cell_text, parse_selector};
use crate::Result;
use scraper::Html;
use std::sync::Arc;
use tracing::instrument;

/// Class of the large current-temperature element.
const TEMPERATURE_MARKER: &str = ".myforecast-current-lrg";
/// Class of the current-conditions phrase element.
const CONDITIONS_MARKER: &str = ".myforecast-current";
/// Rows of the details region holding label/value pairs.
const DETAIL_ROWS: &str = "#current_conditions_detail tr";

/// Extractor for the current-conditions page.
#[derive(Debug)]
pub struct CurrentConditionsExtractor {
    http: Arc<HttpClient>,
    base_url: String,
}

/// URL of the current-conditions page for a coordinate.
#[must_use]
pub fn current_conditions_url(base_url: &str, coordinate: &Coordinate) -> String {
    format!(
        "{}/MapClick.php?lat={}&lon={}",
        base_url, coordinate.latitude, coordinate.longitude
    )
}

impl CurrentConditionsExtractor {
    #[must_use]
    pub fn new(http: Arc<HttpClient>, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Fetch the page for a coordinate and extract the four scalar fields.
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, coordinate: &Coordinate) -> Result<CurrentConditions> {
        let url = current_conditions_url(&self.base_url, coordinate);
        let body = self.http.get_text(&url).await?;
        extract_current(&body)
    }
}

/// Extract current conditions from the page body.
///
/// Temperature and conditions come from the first element matching their
/// class marker; humidity and wind from two-cell rows of the details region,
/// matched by case-sensitive substring on the label cell.
pub fn extract_current(html: &str) -> Result<CurrentConditions> {
    let document = Html::parse_document(html);
    let mut current = CurrentConditions::default();

    let temperature_sel = parse_selector(TEMPERATURE_MARKER)?;
    if let Some(element) = document.select(&temperature_sel).next() {
        current.temperature = cell_text(element);
    }

    let conditions_sel = parse_selector(CONDITIONS_MARKER)?;
    if let Some(element) = document.select(&conditions_sel).next() {
        current.conditions = cell_text(element);
    }

    let row_sel = parse_selector(DETAIL_ROWS)?;
    let td_sel = parse_selector("td")?;
    for row in document.select(&row_sel) {
        let cells: Vec<String> = row.select(&td_sel).map(cell_text).collect();
        if cells.len() != 2 {
            continue;
        }
        if cells[0].contains("Humidity") {
            current.humidity = cells[1].clone();
        }
        if cells[0].contains("Wind") {
            current.wind_speed = cells[1].clone();
        }
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <html><body>
          <p class="myforecast-current">Partly Cloudy</p>
          <p class="myforecast-current-lrg">59&deg;F</p>
          <table id="current_conditions_detail">
            <tr><td>Humidity</td><td>44%</td></tr>
            <tr><td>Wind Speed</td><td>NW 10 mph</td></tr>
            <tr><td>Barometer</td><td>30.01 in</td></tr>
            <tr><td>Dewpoint</td><td>37&deg;F (3&deg;C)</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_extract_all_fields() {
        let current = extract_current(FULL_PAGE).unwrap();
        assert_eq!(current.temperature, "59°F");
        assert_eq!(current.conditions, "Partly Cloudy");
        assert_eq!(current.humidity, "44%");
        assert_eq!(current.wind_speed, "NW 10 mph");
    }

    #[test]
    fn test_missing_conditions_marker_yields_na() {
        let page = r#"
            <html><body>
              <p class="myforecast-current-lrg">59</p>
            </body></html>
        "#;
        let current = extract_current(page).unwrap();
        assert_eq!(current.temperature, "59");
        assert_eq!(current.conditions, "N/A");
        assert_eq!(current.humidity, "N/A");
        assert_eq!(current.wind_speed, "N/A");
    }

    #[test]
    fn test_empty_page_is_all_na_not_an_error() {
        let current = extract_current("<html><body></body></html>").unwrap();
        assert_eq!(current, CurrentConditions::default());
    }

    #[test]
    fn test_rows_without_two_cells_are_skipped() {
        let page = r#"
            <table id="current_conditions_detail">
              <tr><td>Humidity</td></tr>
              <tr><td>Wind Speed</td><td>E 5 mph</td><td>extra</td></tr>
            </table>
        "#;
        let current = extract_current(page).unwrap();
        assert_eq!(current.humidity, "N/A");
        assert_eq!(current.wind_speed, "N/A");
    }

    #[test]
    fn test_label_match_is_substring() {
        let page = r#"
            <table id="current_conditions_detail">
              <tr><td>Relative Humidity</td><td>63%</td></tr>
            </table>
        "#;
        let current = extract_current(page).unwrap();
        assert_eq!(current.humidity, "63%");
    }

    #[test]
    fn test_current_conditions_url() {
        let coord = Coordinate::new(40.76, -111.89);
        let url = current_conditions_url("https://forecast.weather.gov", &coord);
        assert_eq!(
            url,
            "https://forecast.weather.gov/MapClick.php?lat=40.76&lon=-111.89"
        );
    }
}
