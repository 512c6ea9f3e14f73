use std::{env, fmt};

use async_trait::async_trait;
use model::provider::{CurrentWeather, GeocodeResult};
use serde::de::DeserializeOwned;
use weather_info::provider::{ProviderError, WeatherProvider};

use crate::ApiError;

pub const OPEN_WEATHER_API_URL: &str = "http://api.openweathermap.org";

const GEOCODE_ZIP_ENDPOINT: &str = "geo/1.0/zip";
const CURRENT_WEATHER_ENDPOINT: &str = "data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherCredentials {
    pub api_key: String,
    pub base_url: String,
}

impl fmt::Debug for OpenWeatherCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherCredentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenWeatherCredentials {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPEN_WEATHER_API_URL.to_owned(),
        }
    }

    /// Reads `OPEN_WEATHER_MAP_API_KEY` and the optional
    /// `OPEN_WEATHER_MAP_URL`.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("OPEN_WEATHER_MAP_API_KEY").ok()?;
        let base_url = env::var("OPEN_WEATHER_MAP_URL")
            .unwrap_or_else(|_| OPEN_WEATHER_API_URL.to_owned());
        Some(Self { api_key, base_url })
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    credentials: OpenWeatherCredentials,
    http: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(credentials: OpenWeatherCredentials) -> Self {
        Self {
            credentials,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch json from an endpoint, authenticated with the api key.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        log::debug!("Requesting Endpoint '{endpoint}'.");

        let url = format!(
            "{}/{}",
            self.credentials.base_url.trim_end_matches('/'),
            endpoint
        );
        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.credentials.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            log::warn!("Endpoint '{endpoint}' responded with {status}.");
            Err(ApiError::InvalidResponse {
                status_code: status,
                endpoint: endpoint.to_owned(),
                response: response.text().await.ok(),
            })
        }
    }

    pub async fn geocode(
        &self,
        zip: &str,
        country: &str,
    ) -> Result<GeocodeResult, ApiError> {
        let zip = format!("{},{}", zip, country);
        self.get(GEOCODE_ZIP_ENDPOINT, &[("zip", zip)]).await
    }

    pub async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, ApiError> {
        self.get(
            CURRENT_WEATHER_ENDPOINT,
            &[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("units", "metric".to_owned()),
            ],
        )
        .await
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode_zip(
        &self,
        zip: &str,
        country: &str,
    ) -> Result<GeocodeResult, ProviderError> {
        Ok(self.geocode(zip, country).await?)
    }

    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, ProviderError> {
        Ok(self.current(latitude, longitude).await?)
    }
}
