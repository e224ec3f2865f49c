//! One dashboard fetch cycle.
//!
//! Each user-triggered cycle runs strictly sequentially: geocode, reverse
//! place lookup, current conditions, digital forecast, CSV export. Cycles
//! share nothing mutable; every snapshot is built fresh and may be discarded
//! after display.

use crate::client::HttpClient;
use crate::config::WxboardConfig;
use crate::export;
use crate::format::{self, DisplayRow};
use crate::geocode::Geocoder;
use crate::models::{Coordinate, CurrentConditions, ForecastRecord, Place, Trend};
use crate::scrape::current::CurrentConditionsExtractor;
use crate::scrape::digital::DigitalForecastParser;
use crate::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Trend indicators for the current-conditions cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    pub temperature: Trend,
    pub humidity: Trend,
    pub wind_speed: Trend,
}

impl TrendSummary {
    /// Compare current conditions against a prior day's last observed
    /// values, when a caller has them. Without a reference every indicator
    /// is [`Trend::None`].
    #[must_use]
    pub fn derive(current: &CurrentConditions, reference: Option<&ReferenceValues>) -> Self {
        let reference = reference.copied().unwrap_or_default();
        Self {
            temperature: format::trend(&current.temperature, reference.temperature),
            humidity: format::trend(&current.humidity, reference.humidity),
            wind_speed: format::trend(&current.wind_speed, reference.wind_speed),
        }
    }
}

/// Prior-day values a caller may supply for trend derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceValues {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// Everything one fetch cycle produces, consumed read-only by the
/// presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// The location string as entered.
    pub location: String,
    /// Reverse-geocoded place for the header, possibly empty.
    pub place: Place,
    pub coordinate: Coordinate,
    pub current: CurrentConditions,
    pub trends: TrendSummary,
    /// Unit-suffixed summary rows, truncated to the display window.
    pub display: Vec<DisplayRow>,
    /// The full parsed record sequence for charts and export.
    pub records: Vec<ForecastRecord>,
}

/// Service running dashboard fetch cycles against the configured sources.
#[derive(Debug)]
pub struct DashboardService {
    geocoder: Geocoder,
    current: CurrentConditionsExtractor,
    digital: DigitalForecastParser,
    window: usize,
    csv_path: PathBuf,
}

impl DashboardService {
    /// Build a service from configuration. All fetchers share one HTTP
    /// client so the rate limit spans the whole cycle.
    pub fn new(config: &WxboardConfig) -> Result<Self> {
        let http = Arc::new(HttpClient::new(
            &config.source.user_agent,
            Duration::from_secs(config.source.timeout_seconds.into()),
            Duration::from_millis(config.geocoder.min_interval_ms),
        )?);

        Ok(Self {
            geocoder: Geocoder::new(Arc::clone(&http), config.geocoder.base_url.clone()),
            current: CurrentConditionsExtractor::new(
                Arc::clone(&http),
                config.source.base_url.clone(),
            ),
            digital: DigitalForecastParser::new(
                http,
                config.source.base_url.clone(),
                config.source.page_schema(),
            ),
            window: config.display.window,
            csv_path: PathBuf::from(&config.display.csv_path),
        })
    }

    /// Run one fetch cycle for a free-text location.
    #[instrument(skip(self))]
    pub async fn fetch(&self, location: &str) -> Result<DashboardSnapshot> {
        info!("Starting fetch cycle for '{location}'");

        let coordinate = self.geocoder.resolve(location).await?;

        // The place lookup only feeds the header; its failure never kills
        // the cycle.
        let place = match self.geocoder.reverse(&coordinate).await {
            Ok(place) => place,
            Err(e) => {
                debug!("Reverse geocoding failed: {e}, leaving place empty");
                Place::default()
            }
        };

        let current = self.current.fetch_current(&coordinate).await?;
        let records = self.digital.parse_digital_forecast(&coordinate).await?;

        export::write_csv(&records, &self.csv_path)?;

        // No historical store exists, so there is no prior-day reference and
        // the indicators stay neutral.
        let trends = TrendSummary::derive(&current, None);
        let display_rows = format::format_for_display(&records, self.window);

        info!(
            "Fetch cycle complete: {} records, {} display rows",
            records.len(),
            display_rows.len()
        );

        Ok(DashboardSnapshot {
            location: location.to_string(),
            place,
            coordinate,
            current,
            trends,
            display: display_rows,
            records,
        })
    }
}
