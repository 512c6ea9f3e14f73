use chrono::{DateTime, NaiveDate, Utc};
use model::weather::WeatherRecord;
use sqlx::prelude::FromRow;
use utility::id::Id;
use weather_info::database::Result;

use super::DatabaseRow;

/// Weather of a location on one date.
/// Table: `weather_data`
#[derive(Debug, Clone, FromRow)]
pub struct WeatherRow {
    pub id: i32,
    pub location_id: i32,
    pub for_date: NaiveDate,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
    pub wind_speed: f64,
    pub wind_deg: Option<i32>,
    pub rain_1h: Option<f64>,
    pub clouds_all: i32,
    pub weather_main: String,
    pub weather_desc: String,
    pub icon: String,
    pub visibility: Option<i32>,
    pub sunrise: String,
    pub sunset: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DatabaseRow for WeatherRow {
    type Model = WeatherRecord;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Result<Self::Model> {
        Ok(WeatherRecord {
            location_id: Id::new(self.location_id),
            for_date: self.for_date,
            temperature: self.temperature,
            feels_like: self.feels_like,
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            pressure: self.pressure,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            wind_deg: self.wind_deg,
            rain_1h: self.rain_1h,
            clouds_all: self.clouds_all,
            weather_main: self.weather_main,
            weather_desc: self.weather_desc,
            icon: self.icon,
            visibility: self.visibility,
            sunrise: self.sunrise,
            sunset: self.sunset,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
