use std::{error, fmt};

use async_trait::async_trait;
use model::provider::{CurrentWeather, GeocodeResult};

/// Country qualifier appended to every postal code lookup.
pub const PINCODE_COUNTRY: &str = "IN";

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Transport failure or non-success status.
    Unavailable(String),
    /// The response body could not be decoded.
    Malformed(String),
}

impl error::Error for ProviderError {}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unavailable(why) => write!(f, "{}", why),
            Self::Malformed(why) => write!(f, "{}", why),
        }
    }
}

/// Outbound operations of a third-party geocoding and weather service.
#[async_trait]
pub trait WeatherProvider: Clone + Send + Sync + 'static {
    /// Looks up the coordinates of a postal code within a country.
    async fn geocode_zip(
        &self,
        zip: &str,
        country: &str,
    ) -> Result<GeocodeResult, ProviderError>;

    /// Fetches the current conditions at a coordinate in metric units.
    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, ProviderError>;
}
