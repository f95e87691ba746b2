//! Current-position lookup.
//!
//! Fixed coordinates from the config win; otherwise the position is
//! estimated from the public IP address via ip-api.com.

use crate::config::LocationConfig;
use crate::error::{Result, WidgetError};
use crate::models::Coordinates;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

#[derive(Clone)]
pub struct Geolocator {
    client: reqwest::Client,
    config: LocationConfig,
}

impl Geolocator {
    pub fn new(config: LocationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    /// Request the current position once.
    pub async fn locate(&self) -> Result<Coordinates> {
        if let Some(coords) = self.config.fixed_coordinates() {
            tracing::debug!(%coords, "using configured coordinates");
            return Ok(coords);
        }

        if !self.config.enabled {
            return Err(WidgetError::Geolocation(
                "location lookup disabled and no coordinates configured".into(),
            ));
        }

        self.lookup_ip().await
    }

    async fn lookup_ip(&self) -> Result<Coordinates> {
        let url = format!("{}/json/", self.config.ip_lookup_url);

        let response = self
            .client
            .get(&url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .map_err(|e| WidgetError::Geolocation(format!("IP lookup unavailable: {}", e)))?;

        if !response.status().is_success() {
            return Err(WidgetError::Geolocation(format!(
                "IP lookup returned {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response.json().await?;

        if body.status != "success" {
            return Err(WidgetError::Geolocation(
                body.message.unwrap_or_else(|| "IP lookup failed".into()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => {
                let coords = Coordinates::new(lat, lon);
                tracing::info!(%coords, "geolocation resolved from IP");
                Ok(coords)
            }
            _ => Err(WidgetError::Geolocation(
                "IP lookup response missing coordinates".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> LocationConfig {
        LocationConfig {
            latitude: None,
            longitude: None,
            ip_lookup_url: server.uri(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn fixed_coordinates_skip_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.latitude = Some(51.5);
        config.longitude = Some(-0.12);

        let coords = Geolocator::new(config).unwrap().locate().await.unwrap();
        assert_eq!(coords, Coordinates::new(51.5, -0.12));
    }

    #[tokio::test]
    async fn ip_lookup_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success", "lat": 48.85, "lon": 2.35
            })))
            .mount(&server)
            .await;

        let coords = Geolocator::new(config_for(&server))
            .unwrap()
            .locate()
            .await
            .unwrap();
        assert_eq!(coords, Coordinates::new(48.85, 2.35));
    }

    #[tokio::test]
    async fn ip_lookup_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail", "message": "private range"
            })))
            .mount(&server)
            .await;

        let err = Geolocator::new(config_for(&server))
            .unwrap()
            .locate()
            .await
            .unwrap_err();
        assert!(matches!(err, WidgetError::Geolocation(_)));
        assert!(err.to_string().contains("private range"));
    }

    #[tokio::test]
    async fn disabled_without_coordinates_fails() {
        let server = MockServer::start().await;
        let mut config = config_for(&server);
        config.enabled = false;

        let err = Geolocator::new(config).unwrap().locate().await.unwrap_err();
        assert!(matches!(err, WidgetError::Geolocation(_)));
    }
}
