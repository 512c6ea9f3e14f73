use chrono::{DateTime, Utc};
use model::{location::Location, pincode::Pincode};
use sqlx::prelude::FromRow;
use utility::id::Id;
use weather_info::database::{DatabaseError, Result};

use super::DatabaseRow;

/// A geocoded pincode.
/// Table: `locations`
#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub id: i32,
    pub pincode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl DatabaseRow for LocationRow {
    type Model = Location;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Result<Self::Model> {
        Ok(Location {
            pincode: Pincode::parse(self.pincode)
                .map_err(|why| DatabaseError::Other(Box::new(why)))?,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
        })
    }
}
