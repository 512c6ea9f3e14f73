use chrono::NaiveDate;
use model::{location::Location, weather::WeatherRecord, WithId};
use sqlx::{Executor, Postgres};
use utility::id::Id;
use weather_info::database::Result;

use crate::data_model::{weather::WeatherRow, with_id};

use super::convert_error;

pub async fn get_by_location_and_date<'c, E>(
    executor: E,
    location_id: &Id<Location>,
    for_date: NaiveDate,
) -> Result<Option<WithId<WeatherRecord>>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: Option<WeatherRow> = sqlx::query_as(
        "
        SELECT
            id, location_id, for_date, temperature, feels_like, temp_min,
            temp_max, pressure, humidity, wind_speed, wind_deg, rain_1h,
            clouds_all, weather_main, weather_desc, icon, visibility,
            sunrise, sunset, created_at, updated_at
        FROM weather_data
        WHERE location_id = $1 AND for_date = $2;
        ",
    )
    .bind(location_id.raw())
    .bind(for_date)
    .fetch_optional(executor)
    .await
    .map_err(convert_error)?;

    row.map(with_id).transpose()
}

pub async fn insert<'c, E>(
    executor: E,
    record: &WeatherRecord,
) -> Result<WithId<WeatherRecord>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: WeatherRow = sqlx::query_as(
        "
        INSERT INTO weather_data(
            location_id,
            for_date,
            temperature,
            feels_like,
            temp_min,
            temp_max,
            pressure,
            humidity,
            wind_speed,
            wind_deg,
            rain_1h,
            clouds_all,
            weather_main,
            weather_desc,
            icon,
            visibility,
            sunrise,
            sunset,
            created_at,
            updated_at
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
        )
        RETURNING
            id, location_id, for_date, temperature, feels_like, temp_min,
            temp_max, pressure, humidity, wind_speed, wind_deg, rain_1h,
            clouds_all, weather_main, weather_desc, icon, visibility,
            sunrise, sunset, created_at, updated_at;
        ",
    )
    .bind(record.location_id.raw())
    .bind(record.for_date)
    .bind(record.temperature)
    .bind(record.feels_like)
    .bind(record.temp_min)
    .bind(record.temp_max)
    .bind(record.pressure)
    .bind(record.humidity)
    .bind(record.wind_speed)
    .bind(record.wind_deg)
    .bind(record.rain_1h)
    .bind(record.clouds_all)
    .bind(&record.weather_main)
    .bind(&record.weather_desc)
    .bind(&record.icon)
    .bind(record.visibility)
    .bind(&record.sunrise)
    .bind(&record.sunset)
    .bind(record.created_at)
    .bind(record.updated_at)
    .fetch_one(executor)
    .await
    .map_err(convert_error)?;

    log::debug!(
        "Stored weather {} for location {} on {}.",
        row.id,
        row.location_id,
        row.for_date
    );
    with_id(row)
}
