//! wxboard - weather dashboard backend
//!
//! Given a free-text location, this library geocodes it, scrapes the
//! current-conditions and digital-forecast pages from forecast.weather.gov,
//! reshapes the flattened forecast table into ordered per-hour records, and
//! formats the result for display, charting, and CSV export. The browser
//! frontend consumes the JSON API in [`api`] and stays out of the core.

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod format;
pub mod geocode;
pub mod models;
pub mod scrape;
pub mod web;

// Re-export core types for public API
pub use config::WxboardConfig;
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use error::WxError;
pub use format::DisplayRow;
pub use geocode::Geocoder;
pub use models::{Coordinate, CurrentConditions, ForecastRecord, Place, Trend, ViewState};
pub use scrape::PageSchema;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WxError>;
