use serde::{Deserialize, Serialize};

/// Geocoordinate snapshot captured at clock-in/out.
/// Stored as a JSON blob in time_entries.location_in / location_out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn to_json(&self) -> String {
        // Two plain floats cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}
