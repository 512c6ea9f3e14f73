use std::{env, error::Error, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use model::{
    location::Location, pincode::Pincode, weather::WeatherRecord, WithId,
};
use queries::convert_error;
use sqlx::{pool::PoolConnection, postgres::PgPoolOptions, Postgres};
use utility::id::Id;
use weather_info::database::{Database, LocationRepo, Result, WeatherRepo};

pub mod data_model;
pub mod queries;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 30;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct DatabaseConnectionInfo {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConnectionInfo {
    /// Reads `DB_URL`, or assembles a url from `DATABASE_USER`,
    /// `DATABASE_PASSWORD`, `DATABASE_HOST`, `DATABASE_PORT` and
    /// `DATABASE_NAME`.
    pub fn from_env() -> Option<Self> {
        let url = match env::var("DB_URL") {
            Ok(url) => url,
            Err(_) => {
                let username = env::var("DATABASE_USER").ok()?;
                let password = env::var("DATABASE_PASSWORD").ok()?;
                let hostname = env::var("DATABASE_HOST").ok()?;
                let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
                let database = env::var("DATABASE_NAME").ok()?;
                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    username, password, hostname, port, database
                )
            }
        };
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        Some(Self {
            url,
            max_connections,
        })
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

/// A pooled connection held for the duration of one request. It returns to
/// the pool when dropped.
pub struct PgDatabaseSession {
    conn: PoolConnection<Postgres>,
}

impl PgDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> std::result::Result<Self, Box<dyn Error>> {
        let pool = PgPoolOptions::new()
            .max_connections(database_connection_info.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .test_before_acquire(true)
            .connect(&database_connection_info.url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!(
            "Connected to postgres with up to {} connections.",
            database_connection_info.max_connections
        );

        Ok(Self { connection: pool })
    }
}

#[async_trait]
impl Database for PgDatabase {
    type Session = PgDatabaseSession;

    async fn session(&self) -> Result<Self::Session> {
        let conn = self.connection.acquire().await.map_err(convert_error)?;
        Ok(PgDatabaseSession { conn })
    }
}

#[async_trait]
impl LocationRepo for PgDatabaseSession {
    async fn location_by_pincode(
        &mut self,
        pincode: &Pincode,
    ) -> Result<Option<WithId<Location>>> {
        queries::location::get_by_pincode(&mut *self.conn, pincode).await
    }

    async fn insert_location(
        &mut self,
        location: &Location,
    ) -> Result<WithId<Location>> {
        queries::location::insert(&mut *self.conn, location).await
    }
}

#[async_trait]
impl WeatherRepo for PgDatabaseSession {
    async fn weather_by_location_and_date(
        &mut self,
        location_id: &Id<Location>,
        for_date: NaiveDate,
    ) -> Result<Option<WithId<WeatherRecord>>> {
        queries::weather::get_by_location_and_date(
            &mut *self.conn,
            location_id,
            for_date,
        )
        .await
    }

    async fn insert_weather(
        &mut self,
        record: &WeatherRecord,
    ) -> Result<WithId<WeatherRecord>> {
        queries::weather::insert(&mut *self.conn, record).await
    }
}
