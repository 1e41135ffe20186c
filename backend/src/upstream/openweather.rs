//! OpenWeatherMap client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{Coordinates, UpstreamError, UpstreamResult, WeatherProvider};
use crate::config::UpstreamConfig;

/// [`WeatherProvider`] backed by the OpenWeatherMap 2.5 REST API.
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("weather-dash/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> UpstreamResult<&str> {
        self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)
    }

    /// GET `{base_url}/{endpoint}` with `params` plus credentials.
    ///
    /// `city` marks a city lookup: a 404 then means the provider does not
    /// know the city rather than a broken endpoint.
    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        city: Option<&str>,
    ) -> UpstreamResult<Value> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "Weather provider request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", api_key), ("units", self.units.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|e| UpstreamError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        match (status, city) {
            (StatusCode::NOT_FOUND, Some(city)) => Err(UpstreamError::CityNotFound(city.to_string())),
            _ => Err(UpstreamError::Status {
                status: status.as_u16(),
                message: provider_message(&body).unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                }),
            }),
        }
    }
}

/// The provider reports failures as `{"cod": .., "message": ".."}`.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> UpstreamResult<Value> {
        self.get_json("weather", &[("q", city.to_string())], Some(city))
            .await
    }

    async fn air_quality(&self, coords: Coordinates) -> UpstreamResult<Value> {
        self.get_json(
            "air_pollution",
            &[("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())],
            None,
        )
        .await
    }

    async fn forecast(&self, city: &str) -> UpstreamResult<Value> {
        self.get_json("forecast", &[("q", city.to_string())], Some(city))
            .await
    }
}
