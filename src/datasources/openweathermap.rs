use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, WidgetError};
use crate::models::{resolve_icon, Coordinates, WeatherSnapshot};
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    wind: OwmWind,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmGeocodeResult {
    name: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch current conditions for a free-text city name.
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WidgetError::InvalidData("empty city name".into()));
        }

        let url = format!("{}/data/2.5/weather", self.config.api_base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WidgetError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WidgetError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        tracing::debug!(city, body = %body, "current weather payload");

        let parsed: OwmCurrentResponse = serde_json::from_str(&body)?;
        Ok(Self::convert_current(parsed))
    }

    /// Reverse-geocode coordinates to a place name. `None` when the
    /// provider knows no place there.
    pub async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>> {
        let url = format!("{}/geo/1.0/reverse", self.config.geo_base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.config.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                WidgetError::DataSourceUnavailable(format!("OpenWeatherMap geocoding: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(WidgetError::DataSourceUnavailable(format!(
                "OpenWeatherMap geocoding returned {}",
                response.status()
            )));
        }

        let results: Vec<OwmGeocodeResult> = response.json().await?;
        Ok(results.into_iter().next().map(|r| r.name))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/data/2.5/weather", self.config.api_base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", "0"),
                ("lon", "0"),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WidgetError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }

    fn convert_current(response: OwmCurrentResponse) -> WeatherSnapshot {
        let codes: Vec<&str> = response.weather.iter().map(|w| w.icon.as_str()).collect();

        WeatherSnapshot::new(
            response.main.humidity,
            response.main.temp,
            response.wind.speed,
            response.name,
            resolve_icon(&codes),
        )
    }
}
