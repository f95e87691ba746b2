use crate::config::Config;
use crate::datasources::{Geolocator, OpenWeatherMapClient};
use crate::error::Result;
use crate::models::{Coordinates, WeatherSnapshot};

/// Two-step lookup: coordinates to place name, then place name to weather.
#[derive(Clone)]
pub struct WeatherPipeline {
    geolocator: Geolocator,
    openweathermap: OpenWeatherMapClient,
}

impl WeatherPipeline {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            geolocator: Geolocator::new(config.location.clone())?,
            openweathermap: OpenWeatherMapClient::new(config.openweathermap.clone())?,
        })
    }

    /// Step 1: resolve a place name for coordinates.
    pub async fn resolve_city(&self, coords: Coordinates) -> Result<Option<String>> {
        let city = self.openweathermap.reverse_geocode(coords).await?;
        match &city {
            Some(name) => tracing::info!(city = %name, "You are in: {}", name),
            None => tracing::warn!(%coords, "City not found"),
        }
        Ok(city)
    }

    /// Step 2: fetch current weather for a place name.
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let snapshot = self.openweathermap.fetch_current(city).await?;
        tracing::debug!(?snapshot, "weather fetched");
        Ok(snapshot)
    }

    /// Geolocate once, then resolve the place name.
    pub async fn locate_city(&self) -> Result<Option<String>> {
        let coords = self.geolocator.locate().await?;
        self.resolve_city(coords).await
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        match self.openweathermap.test_connection().await {
            Ok(ok) => status.openweathermap = ok,
            Err(e) => tracing::warn!("OpenWeatherMap check failed: {}", e),
        }

        match self.geolocator.locate().await {
            Ok(coords) => status.location = Some(coords),
            Err(e) => tracing::warn!("Geolocation check failed: {}", e),
        }

        status
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub openweathermap: bool,
    pub location: Option<Coordinates>,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.openweathermap && self.location.is_some()
    }
}
