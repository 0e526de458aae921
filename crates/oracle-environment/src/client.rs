//! OpenWeatherMap client: weather by city name, then air pollution by coordinates.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use tracing::instrument;

use crate::error::EnvironmentError;
use crate::types::*;

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";
const USER_AGENT: &str = "OutbreakOracle/0.1.0";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, EnvironmentError> {
        Self::with_base_url(api_key, OPENWEATHER_API_BASE, timeout)
    }

    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, EnvironmentError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current conditions for a city name, in metric units.
    #[instrument(skip(self), level = "info")]
    pub async fn current_weather(&self, city: &str) -> Result<CurrentWeather, EnvironmentError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let body: WeatherResponse = self.handle_response(response).await?;

        let description = body
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| EnvironmentError::EmptyResult("weather description".to_string()))?;

        Ok(CurrentWeather {
            coordinates: body.coord,
            temperature_c: body.main.temp,
            humidity_pct: body.main.humidity,
            pressure_hpa: body.main.pressure,
            description,
        })
    }

    /// Air quality at the given coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn air_quality(&self, coords: Coordinates) -> Result<AirQuality, EnvironmentError> {
        let url = format!("{}/data/2.5/air_pollution", self.base_url);
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let body: AirPollutionResponse = self.handle_response(response).await?;

        let entry = body
            .list
            .into_iter()
            .next()
            .ok_or_else(|| EnvironmentError::EmptyResult("air quality".to_string()))?;

        Ok(AirQuality {
            index: entry.main.aqi,
            pm2_5: entry.components.pm2_5,
            co: entry.components.co,
        })
    }

    /// Run both calls in order and build a snapshot.
    ///
    /// Only the city is sent to the weather endpoint. Any failure in either
    /// call fails the whole fetch.
    pub async fn fetch_snapshot(&self, place: &Place) -> Result<EnvironmentSnapshot, EnvironmentError> {
        let weather = self.current_weather(&place.city).await?;
        tracing::debug!(
            "Weather for {}: {}°C, {}",
            place,
            weather.temperature_c,
            weather.description
        );

        let air = self.air_quality(weather.coordinates).await?;
        tracing::info!("Environment snapshot for {}: AQI {}", place, air.index);

        Ok(EnvironmentSnapshot {
            temperature_c: weather.temperature_c,
            humidity_pct: weather.humidity_pct,
            pressure_hpa: weather.pressure_hpa,
            weather_description: weather.description,
            air_quality_index: air.index,
            pm2_5: air.pm2_5,
            co: air.co,
            coordinates: weather.coordinates,
            fetched_at: Utc::now(),
        })
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, EnvironmentError> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(|e| EnvironmentError::Malformed(e.to_string()))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(EnvironmentError::InvalidApiKey)
        } else if status == StatusCode::NOT_FOUND {
            let text = response.text().await.unwrap_or_default();
            Err(EnvironmentError::LocationNotFound(text))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(EnvironmentError::Network(oracle_core::NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::with_base_url("test_key", &server.uri(), Duration::from_secs(5)).unwrap()
    }

    async fn mount_weather(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Delhi"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "coord": {"lat": 28.6667, "lon": 77.2167},
                "main": {"temp": 30.0, "humidity": 40, "pressure": 1008},
                "weather": [{"description": "haze"}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_snapshot_chains_coordinates() {
        let server = MockServer::start().await;
        mount_weather(&server).await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution"))
            .and(query_param("lat", "28.6667"))
            .and(query_param("lon", "77.2167"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [{"main": {"aqi": 4}, "components": {"co": 0.8, "pm2_5": 120.0}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = client(&server)
            .fetch_snapshot(&Place::new("Delhi", "India"))
            .await
            .unwrap();

        assert_eq!(snapshot.temperature_c, 30.0);
        assert_eq!(snapshot.humidity_pct, 40.0);
        assert_eq!(snapshot.weather_description, "haze");
        assert_eq!(snapshot.air_quality_index, 4);
        assert_eq!(snapshot.pm2_5, 120.0);
        assert_eq!(snapshot.co, 0.8);
    }

    #[tokio::test]
    async fn test_unknown_city_skips_air_quality() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).fetch_snapshot(&Place::new("Atlantis", "Sea")).await;
        assert!(matches!(result, Err(EnvironmentError::LocationNotFound(msg)) if msg.contains("city not found")));
    }

    #[tokio::test]
    async fn test_invalid_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client(&server).current_weather("Delhi").await;
        assert!(matches!(result, Err(EnvironmentError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_empty_air_quality_list() {
        let server = MockServer::start().await;
        mount_weather(&server).await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"list": []})))
            .mount(&server)
            .await;

        let result = client(&server).fetch_snapshot(&Place::default()).await;
        assert!(matches!(result, Err(EnvironmentError::EmptyResult(_))));
    }

    #[tokio::test]
    async fn test_malformed_weather_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client(&server).current_weather("Delhi").await;
        assert!(matches!(result, Err(EnvironmentError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_network() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let result = client(&server).current_weather("Delhi").await;
        assert!(matches!(
            result,
            Err(EnvironmentError::Network(oracle_core::NetworkError::ServerError { status: 502, .. }))
        ));
    }
}
