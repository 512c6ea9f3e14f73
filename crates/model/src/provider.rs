//! Payloads returned by the upstream weather provider.
//!
//! Blocks the provider may leave out are optional here. Deciding which of them
//! are required happens when a payload is turned into a stored record.

use serde::{Deserialize, Serialize};

/// Result of geocoding a postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub zip: Option<String>,
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub country: Option<String>,
}

/// Current conditions at a coordinate, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
    pub wind: Option<WindBlock>,
    pub visibility: Option<i32>,
    pub clouds: Option<CloudsBlock>,
    pub rain: Option<RainBlock>,
    pub sys: Option<SysBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionBlock {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindBlock {
    pub speed: f64,
    pub deg: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudsBlock {
    pub all: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainBlock {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

/// Sunrise and sunset as unix epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SysBlock {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}
