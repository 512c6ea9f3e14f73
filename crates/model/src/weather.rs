use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{location::Location, ExampleData};

/// Weather observed for a location on a calendar date. At most one record
/// exists per `(location_id, for_date)`; once stored it is never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherRecord {
    pub location_id: Id<Location>,
    #[serde(with = "utility::serde::date")]
    #[schemars(with = "NaiveDate")]
    pub for_date: NaiveDate,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// hPa
    pub pressure: i32,
    /// percent
    pub humidity: i32,
    /// m/s
    pub wind_speed: f64,
    pub wind_deg: Option<i32>,
    /// Rain volume of the last hour in mm.
    pub rain_1h: Option<f64>,
    /// Cloudiness in percent.
    pub clouds_all: i32,
    pub weather_main: String,
    pub weather_desc: String,
    pub icon: String,
    /// Meters.
    pub visibility: Option<i32>,
    pub sunrise: String,
    pub sunset: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasId for WeatherRecord {
    type IdType = i32;
}

impl WeatherRecord {
    /// Projects the stored columns into the nested shape served to clients.
    pub fn report(&self) -> WeatherReport {
        WeatherReport {
            main: MainReading {
                temp: self.temperature,
                feels_like: self.feels_like,
                temp_min: self.temp_min,
                temp_max: self.temp_max,
                pressure: self.pressure,
                humidity: self.humidity,
            },
            weather: vec![Condition {
                description: self.weather_desc.clone(),
                icon: self.icon.clone(),
                main: self.weather_main.clone(),
            }],
            wind: Wind {
                speed: self.wind_speed,
                deg: self.wind_deg,
            },
            visibility: self.visibility,
            sunrise: self.sunrise.clone(),
            sunset: self.sunset.clone(),
            clouds: self.clouds_all,
            rain_1h: self.rain_1h,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MainReading {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub description: String,
    pub icon: String,
    pub main: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Wind {
    pub speed: f64,
    pub deg: Option<i32>,
}

/// Formatted weather data.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub main: MainReading,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    pub visibility: Option<i32>,
    pub sunrise: String,
    pub sunset: String,
    pub clouds: i32,
    pub rain_1h: Option<f64>,
}

impl ExampleData for WeatherReport {
    fn example_data() -> Self {
        Self {
            main: MainReading {
                temp: 284.2,
                feels_like: 282.93,
                temp_min: 283.06,
                temp_max: 286.82,
                pressure: 1021,
                humidity: 60,
            },
            weather: vec![Condition {
                description: "moderate rain".to_owned(),
                icon: "10d".to_owned(),
                main: "Rain".to_owned(),
            }],
            wind: Wind {
                speed: 4.09,
                deg: Some(121),
            },
            visibility: Some(10000),
            sunrise: "Sep 18, 2024, 10:43:04 AM".to_owned(),
            sunset: "Sep 18, 2024, 11:06:15 PM".to_owned(),
            clouds: 83,
            rain_1h: None,
        }
    }
}
