use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The place the user asked about. Passed through to the remote APIs untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub region: String,
}

impl Place {
    pub fn new(city: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            region: region.into(),
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

impl Default for Place {
    fn default() -> Self {
        Self::new("Delhi", "India")
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.region)
    }
}

/// Geographic coordinates as reported by the weather endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Environment readings captured for one fetch cycle.
///
/// Replaced wholesale on every fetch; never merged with an older snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub weather_description: String,
    /// OpenWeatherMap ordinal index, 1 (good) to 5 (very poor)
    pub air_quality_index: u8,
    /// μg/m³
    pub pm2_5: f64,
    /// μg/m³
    pub co: f64,
    pub coordinates: Coordinates,
    pub fetched_at: DateTime<Utc>,
}

impl EnvironmentSnapshot {
    /// Human-readable name for the air quality index
    pub fn air_quality_label(&self) -> &'static str {
        match self.air_quality_index {
            0 | 1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            _ => "Very Poor",
        }
    }
}

// Wire types for /data/2.5/weather

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherResponse {
    pub coord: Coordinates,
    pub main: WeatherMain,
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherMain {
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeatherEntry {
    pub description: String,
}

/// Weather half of a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub coordinates: Coordinates,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub description: String,
}

// Wire types for /data/2.5/air_pollution

#[derive(Debug, Deserialize)]
pub(crate) struct AirPollutionResponse {
    #[serde(default)]
    pub list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirPollutionEntry {
    pub main: AirPollutionMain,
    pub components: AirPollutionComponents,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirPollutionMain {
    pub aqi: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirPollutionComponents {
    #[serde(default)]
    pub co: f64,
    #[serde(default)]
    pub pm2_5: f64,
}

/// Air-quality half of a snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirQuality {
    pub index: u8,
    pub pm2_5: f64,
    pub co: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(aqi: u8) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            temperature_c: 30.0,
            humidity_pct: 40.0,
            pressure_hpa: 1008.0,
            weather_description: "haze".into(),
            air_quality_index: aqi,
            pm2_5: 120.0,
            co: 0.8,
            coordinates: Coordinates { lat: 28.6, lon: 77.2 },
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_air_quality_labels() {
        assert_eq!(snapshot(1).air_quality_label(), "Good");
        assert_eq!(snapshot(3).air_quality_label(), "Moderate");
        assert_eq!(snapshot(5).air_quality_label(), "Very Poor");
    }

    #[test]
    fn test_place_display_and_builders() {
        let place = Place::default().with_city("Lagos").with_region("Nigeria");
        assert_eq!(place.to_string(), "Lagos, Nigeria");
        assert_eq!(Place::default().city, "Delhi");
    }

    #[test]
    fn test_weather_response_parses_integer_fields() {
        let body = serde_json::json!({
            "coord": {"lat": 28.6, "lon": 77.2},
            "main": {"temp": 30, "humidity": 40, "pressure": 1008},
            "weather": [{"description": "haze", "main": "Haze"}],
            "name": "Delhi"
        });
        let parsed: WeatherResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.main.temp, 30.0);
        assert_eq!(parsed.weather[0].description, "haze");
    }
}
