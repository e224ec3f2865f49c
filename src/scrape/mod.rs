//! HTML scraping of forecast.weather.gov pages.
//!
//! The source pages are not a data API: the digital forecast table is found
//! by position among all tables, and its rows carry meaning only through
//! their leading label cell. Everything page-specific is captured in
//! [`PageSchema`] so the parsers can be retargeted (or pointed at a test
//! fixture) without touching callers.

pub mod current;
pub mod digital;

use crate::{Result, WxError};
use scraper::{ElementRef, Selector};

/// Page-specific knobs for the digital forecast parser: which table to pick
/// and which row labels to recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSchema {
    /// 0-based index of the digital forecast table in document order.
    pub table_index: usize,
    pub date_label: String,
    pub hour_prefix: String,
    pub temperature_label: String,
    pub wind_label: String,
    pub humidity_label: String,
}

impl Default for PageSchema {
    fn default() -> Self {
        Self {
            table_index: 5,
            date_label: "Date".to_string(),
            hour_prefix: "Hour (".to_string(),
            temperature_label: "Temperature (°F)".to_string(),
            wind_label: "Surface Wind (mph)".to_string(),
            humidity_label: "Relative Humidity (%)".to_string(),
        }
    }
}

/// Parse a CSS selector, mapping failure to a layout error.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| WxError::layout(format!("invalid CSS selector '{selector}': {e}")))
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn cell_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join("").trim().to_owned()
}
