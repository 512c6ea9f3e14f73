use model::{location::Location, pincode::Pincode, WithId};
use sqlx::{Executor, Postgres};
use weather_info::database::Result;

use crate::data_model::{location::LocationRow, with_id};

use super::convert_error;

pub async fn get_by_pincode<'c, E>(
    executor: E,
    pincode: &Pincode,
) -> Result<Option<WithId<Location>>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: Option<LocationRow> = sqlx::query_as(
        "
        SELECT id, pincode, latitude, longitude, created_at
        FROM locations
        WHERE pincode = $1;
        ",
    )
    .bind(pincode.as_str())
    .fetch_optional(executor)
    .await
    .map_err(convert_error)?;

    row.map(with_id).transpose()
}

pub async fn insert<'c, E>(
    executor: E,
    location: &Location,
) -> Result<WithId<Location>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: LocationRow = sqlx::query_as(
        "
        INSERT INTO locations(pincode, latitude, longitude, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, pincode, latitude, longitude, created_at;
        ",
    )
    .bind(location.pincode.as_str())
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(location.created_at)
    .fetch_one(executor)
    .await
    .map_err(convert_error)?;

    log::debug!("Stored location {} for pincode {}.", row.id, row.pincode);
    with_id(row)
}
