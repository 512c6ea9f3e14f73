//! A `Database` kept in process memory.
//!
//! Enforces the same unique keys as the SQL schema, so duplicate inserts are
//! reported as conflicts here as well. Useful for tests and for running the
//! service without postgres.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use model::{
    location::Location, pincode::Pincode, weather::WeatherRecord, WithId,
};
use tokio::sync::Mutex;
use utility::id::Id;

use crate::database::{
    Database, DatabaseError, LocationRepo, Result, WeatherRepo,
};

#[derive(Debug, Default)]
struct MemoryStore {
    locations: Vec<WithId<Location>>,
    weather: Vec<WithId<WeatherRecord>>,
    next_location_id: i32,
    next_weather_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    store: Arc<Mutex<MemoryStore>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored locations in insertion order.
    pub async fn locations(&self) -> Vec<WithId<Location>> {
        self.store.lock().await.locations.clone()
    }

    /// All stored weather records in insertion order.
    pub async fn weather_records(&self) -> Vec<WithId<WeatherRecord>> {
        self.store.lock().await.weather.clone()
    }
}

pub struct MemorySession {
    store: Arc<Mutex<MemoryStore>>,
}

#[async_trait]
impl Database for MemoryDatabase {
    type Session = MemorySession;

    async fn session(&self) -> Result<Self::Session> {
        Ok(MemorySession {
            store: self.store.clone(),
        })
    }
}

#[async_trait]
impl LocationRepo for MemorySession {
    async fn location_by_pincode(
        &mut self,
        pincode: &Pincode,
    ) -> Result<Option<WithId<Location>>> {
        let store = self.store.lock().await;
        Ok(store
            .locations
            .iter()
            .find(|location| &location.content.pincode == pincode)
            .cloned())
    }

    async fn insert_location(
        &mut self,
        location: &Location,
    ) -> Result<WithId<Location>> {
        let mut store = self.store.lock().await;
        if store
            .locations
            .iter()
            .any(|existing| existing.content.pincode == location.pincode)
        {
            return Err(DatabaseError::Conflict(format!(
                "location with pincode {} already exists",
                location.pincode
            )));
        }
        store.next_location_id += 1;
        let row =
            WithId::new(Id::new(store.next_location_id), location.clone());
        store.locations.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl WeatherRepo for MemorySession {
    async fn weather_by_location_and_date(
        &mut self,
        location_id: &Id<Location>,
        for_date: NaiveDate,
    ) -> Result<Option<WithId<WeatherRecord>>> {
        let store = self.store.lock().await;
        Ok(store
            .weather
            .iter()
            .find(|record| {
                &record.content.location_id == location_id
                    && record.content.for_date == for_date
            })
            .cloned())
    }

    async fn insert_weather(
        &mut self,
        record: &WeatherRecord,
    ) -> Result<WithId<WeatherRecord>> {
        let mut store = self.store.lock().await;
        if !store
            .locations
            .iter()
            .any(|location| location.id == record.location_id)
        {
            return Err(DatabaseError::NotFound);
        }
        if store.weather.iter().any(|existing| {
            existing.content.location_id == record.location_id
                && existing.content.for_date == record.for_date
        }) {
            return Err(DatabaseError::Conflict(format!(
                "weather for location {} on {} already exists",
                record.location_id, record.for_date
            )));
        }
        store.next_weather_id += 1;
        let row = WithId::new(Id::new(store.next_weather_id), record.clone());
        store.weather.push(row.clone());
        Ok(row)
    }
}
