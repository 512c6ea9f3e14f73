use std::{error, fmt, result};

use async_trait::async_trait;
use chrono::NaiveDate;
use model::{
    location::Location, pincode::Pincode, weather::WeatherRecord, WithId,
};
use utility::id::Id;

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    /// A unique constraint rejected the write.
    Conflict(String),
    Other(Box<dyn error::Error + Send + Sync>),
}

impl error::Error for DatabaseError {}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "record not found"),
            Self::Conflict(why) => write!(f, "conflict: {}", why),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait LocationRepo {
    async fn location_by_pincode(
        &mut self,
        pincode: &Pincode,
    ) -> Result<Option<WithId<Location>>>;

    /// Inserts a new location.
    ///
    /// Fails with `DatabaseError::Conflict` if a location with the same pincode
    /// already exists.
    async fn insert_location(
        &mut self,
        location: &Location,
    ) -> Result<WithId<Location>>;
}

#[async_trait]
pub trait WeatherRepo {
    async fn weather_by_location_and_date(
        &mut self,
        location_id: &Id<Location>,
        for_date: NaiveDate,
    ) -> Result<Option<WithId<WeatherRecord>>>;

    /// Inserts a new weather record.
    ///
    /// Fails with `DatabaseError::Conflict` if a record for the same location
    /// and date already exists.
    async fn insert_weather(
        &mut self,
        record: &WeatherRecord,
    ) -> Result<WithId<WeatherRecord>>;
}

pub trait DatabaseOperations: LocationRepo + WeatherRepo {}

impl<T> DatabaseOperations for T where T: LocationRepo + WeatherRepo {}

/// trait to implement a weather database.
/// multiple concurrent accesses should be possible by e.g. cloning the
/// database object.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized + 'static {
    type Session: DatabaseOperations + Send;

    /// Opens a handle scoped to a single request. Resources held by the
    /// session are released when it is dropped.
    async fn session(&self) -> Result<Self::Session>;
}
