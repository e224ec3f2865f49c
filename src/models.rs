//! Shared domain models: coordinates, forecast records, current conditions,
//! and the dashboard view state.

use serde::{Deserialize, Serialize};

/// A resolved latitude/longitude pair.
///
/// Produced once per location query and consumed read-only by all downstream
/// fetchers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Human-readable place derived from reverse geocoding. Used only for the
/// dashboard header; missing fields stay empty instead of failing the cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub state: String,
}

impl Place {
    /// `"City, State"`, degrading to whichever part is present.
    #[must_use]
    pub fn display(&self) -> String {
        match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.state),
            (false, true) => self.city.clone(),
            (true, false) => self.state.clone(),
            (true, true) => String::new(),
        }
    }
}

/// One parsed observation from the digital forecast table.
///
/// Records are emitted in chronological row order as scraped and are never
/// mutated after creation. Value cells the page leaves blank or renders as
/// placeholders become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Formatted date/hour label, e.g. `"May 10, 22:00"`.
    pub display_date: String,
    /// The raw hour token from the page, e.g. `"22"`.
    pub hour: String,
    pub temperature_f: Option<f64>,
    pub wind_mph: Option<f64>,
    pub humidity_pct: Option<f64>,
}

/// Current conditions scraped from the MapClick page.
///
/// Extraction is best-effort: a missing marker yields `"N/A"` for that field
/// rather than an error, since the page structure is not contractually
/// stable. Values are carried as display text, not parsed numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub conditions: String,
}

impl Default for CurrentConditions {
    fn default() -> Self {
        Self {
            temperature: Self::MISSING.to_string(),
            humidity: Self::MISSING.to_string(),
            wind_speed: Self::MISSING.to_string(),
            conditions: Self::MISSING.to_string(),
        }
    }
}

impl CurrentConditions {
    /// Placeholder for fields whose page marker was absent.
    pub const MISSING: &'static str = "N/A";
}

/// Direction of change of a current value against a prior reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    None,
}

/// Which dashboard view is showing.
///
/// Replaces a set of mutually exclusive boolean flags with one enumerated
/// value: the dashboard opens a chart view, and every chart view goes back to
/// the dashboard. Held by the presentation layer; the core only defines and
/// serializes the type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Dashboard,
    Temperature,
    Humidity,
    Wind,
    Combined,
}

impl ViewState {
    /// Open a chart view. Only valid from the dashboard; a chart view stays
    /// where it is until [`ViewState::back`] is called.
    #[must_use]
    pub fn open(self, view: ViewState) -> ViewState {
        match self {
            ViewState::Dashboard => view,
            other => other,
        }
    }

    /// Return to the dashboard from any view.
    #[must_use]
    pub fn back(self) -> ViewState {
        ViewState::Dashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display() {
        let coord = Coordinate::new(40.7608, -111.891);
        assert_eq!(coord.to_string(), "40.7608, -111.8910");
    }

    #[test]
    fn test_place_display_degrades() {
        let full = Place {
            city: "Salt Lake City".into(),
            state: "Utah".into(),
        };
        assert_eq!(full.display(), "Salt Lake City, Utah");

        let city_only = Place {
            city: "Salt Lake City".into(),
            state: String::new(),
        };
        assert_eq!(city_only.display(), "Salt Lake City");

        assert_eq!(Place::default().display(), "");
    }

    #[test]
    fn test_current_conditions_default_is_missing() {
        let current = CurrentConditions::default();
        assert_eq!(current.temperature, "N/A");
        assert_eq!(current.conditions, "N/A");
    }

    #[test]
    fn test_view_state_transitions() {
        let state = ViewState::default();
        assert_eq!(state, ViewState::Dashboard);

        let state = state.open(ViewState::Temperature);
        assert_eq!(state, ViewState::Temperature);

        // A chart view only transitions back to the dashboard.
        let state = state.open(ViewState::Wind);
        assert_eq!(state, ViewState::Temperature);

        let state = state.back();
        assert_eq!(state, ViewState::Dashboard);

        let state = state.open(ViewState::Combined);
        assert_eq!(state, ViewState::Combined);
    }
}
