use chrono::{NaiveDate, Utc};
use model::{
    location::Location,
    pincode::Pincode,
    provider::CurrentWeather,
    weather::{WeatherRecord, WeatherReport},
    WithId,
};
use utility::{
    id::Id,
    time::{format_epoch_at_offset, IST_OFFSET_SECS},
};

use crate::{
    database::{Database, LocationRepo, WeatherRepo},
    provider::{WeatherProvider, PINCODE_COUNTRY},
    RequestError, RequestResult,
};

/// Weather data resolved for a pincode on a date.
#[derive(Debug, Clone)]
pub struct PincodeWeather {
    pub location: WithId<Location>,
    pub for_date: NaiveDate,
    pub weather: WeatherReport,
}

/// Resolves pincodes and dates into weather data. Results are cached in the
/// database, the provider is only asked on a cache miss.
#[derive(Debug, Clone)]
pub struct Client<D, P>
where
    D: Database,
    P: WeatherProvider,
{
    pub database: D,
    pub provider: P,
}

impl<D, P> Client<D, P>
where
    D: Database,
    P: WeatherProvider,
{
    pub fn new(database: D, provider: P) -> Self {
        Self { database, provider }
    }

    /// Resolves the location of `pincode`, then the weather there on
    /// `for_date`. Both steps share one database session, which is released
    /// when this returns.
    pub async fn weather_report(
        &self,
        pincode: &Pincode,
        for_date: NaiveDate,
    ) -> RequestResult<PincodeWeather> {
        let mut session = self.database.session().await?;

        let location = self.resolve_location(&mut session, pincode).await?;
        let weather = self
            .resolve_weather(
                &mut session,
                location.content.latitude,
                location.content.longitude,
                &location.id,
                for_date,
            )
            .await?;

        Ok(PincodeWeather {
            location,
            for_date,
            weather,
        })
    }

    /// Returns the stored location of `pincode`, geocoding and storing it first
    /// if it is unknown.
    pub async fn resolve_location<S>(
        &self,
        session: &mut S,
        pincode: &Pincode,
    ) -> RequestResult<WithId<Location>>
    where
        S: LocationRepo + Send,
    {
        if let Some(location) = session.location_by_pincode(pincode).await? {
            log::debug!("location cache hit for pincode {}", pincode);
            return Ok(location);
        }

        log::info!("geocoding unknown pincode {}", pincode);
        let geocoded = self
            .provider
            .geocode_zip(pincode.as_str(), PINCODE_COUNTRY)
            .await?;

        let (latitude, longitude) = match (geocoded.lat, geocoded.lon) {
            (Some(latitude), Some(longitude)) => (latitude, longitude),
            _ => {
                return Err(RequestError::NotFoundUpstream(format!(
                    "Latitude or Longitude not found for pincode {}",
                    pincode
                )))
            }
        };

        let location = session
            .insert_location(&Location::new(
                pincode.clone(),
                latitude,
                longitude,
            ))
            .await?;
        log::info!(
            "stored location {} for pincode {} ({}, {})",
            location.id,
            pincode,
            latitude,
            longitude
        );
        Ok(location)
    }

    /// Returns the stored weather of a location on `for_date`, fetching and
    /// storing the current conditions first if there is no record yet.
    pub async fn resolve_weather<S>(
        &self,
        session: &mut S,
        latitude: f64,
        longitude: f64,
        location_id: &Id<Location>,
        for_date: NaiveDate,
    ) -> RequestResult<WeatherReport>
    where
        S: WeatherRepo + Send,
    {
        if let Some(record) = session
            .weather_by_location_and_date(location_id, for_date)
            .await?
        {
            log::debug!(
                "weather cache hit for location {} on {}",
                location_id,
                for_date
            );
            return Ok(record.content.report());
        }

        log::info!(
            "fetching weather for location {} on {} at ({}, {})",
            location_id,
            for_date,
            latitude,
            longitude
        );
        let current = self.provider.current_weather(latitude, longitude).await?;
        let record = weather_record(location_id, for_date, current)?;

        let stored = session.insert_weather(&record).await?;
        log::info!(
            "stored weather record {} for location {} on {}",
            stored.id,
            location_id,
            for_date
        );
        Ok(stored.content.report())
    }
}

fn missing(field: &str) -> RequestError {
    RequestError::MalformedUpstreamResponse(format!(
        "missing field `{}`",
        field
    ))
}

/// Sunrise and sunset are always rendered in Indian Standard Time, no matter
/// where the coordinates are. Locations outside of UTC+05:30 get wrong local
/// times.
fn local_time(epoch_secs: Option<i64>, field: &str) -> RequestResult<String> {
    let epoch_secs = epoch_secs.ok_or_else(|| missing(field))?;
    format_epoch_at_offset(epoch_secs, IST_OFFSET_SECS).ok_or_else(|| {
        RequestError::MalformedUpstreamResponse(format!(
            "`{}` out of range: {}",
            field, epoch_secs
        ))
    })
}

fn weather_record(
    location_id: &Id<Location>,
    for_date: NaiveDate,
    current: CurrentWeather,
) -> RequestResult<WeatherRecord> {
    let main = current.main.ok_or_else(|| missing("main"))?;
    let wind = current.wind.ok_or_else(|| missing("wind"))?;
    let condition = current
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| missing("weather[0]"))?;
    let clouds_all = current
        .clouds
        .and_then(|clouds| clouds.all)
        .ok_or_else(|| missing("clouds.all"))?;
    let sys = current.sys.ok_or_else(|| missing("sys"))?;
    let sunrise = local_time(sys.sunrise, "sys.sunrise")?;
    let sunset = local_time(sys.sunset, "sys.sunset")?;

    let now = Utc::now();
    Ok(WeatherRecord {
        location_id: *location_id,
        for_date,
        temperature: main.temp,
        feels_like: main.feels_like,
        temp_min: main.temp_min,
        temp_max: main.temp_max,
        pressure: main.pressure,
        humidity: main.humidity,
        wind_speed: wind.speed,
        wind_deg: wind.deg,
        rain_1h: current.rain.and_then(|rain| rain.one_hour),
        clouds_all,
        weather_main: condition.main,
        weather_desc: condition.description,
        icon: condition.icon,
        visibility: current.visibility,
        sunrise,
        sunset,
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use model::provider::{
        CloudsBlock, ConditionBlock, GeocodeResult, MainBlock, RainBlock,
        SysBlock, WindBlock,
    };

    use super::*;
    use crate::{
        database::{Database, LocationRepo},
        memory::MemoryDatabase,
        provider::ProviderError,
    };

    #[derive(Clone)]
    struct StubProvider {
        geocode: Result<GeocodeResult, ProviderError>,
        weather: Result<CurrentWeather, ProviderError>,
        geocode_calls: Arc<AtomicUsize>,
        weather_calls: Arc<AtomicUsize>,
        last_country: Arc<std::sync::Mutex<Option<String>>>,
    }

    impl StubProvider {
        fn new(
            geocode: Result<GeocodeResult, ProviderError>,
            weather: Result<CurrentWeather, ProviderError>,
        ) -> Self {
            Self {
                geocode,
                weather,
                geocode_calls: Arc::new(AtomicUsize::new(0)),
                weather_calls: Arc::new(AtomicUsize::new(0)),
                last_country: Arc::new(std::sync::Mutex::new(None)),
            }
        }

        fn geocode_calls(&self) -> usize {
            self.geocode_calls.load(Ordering::SeqCst)
        }

        fn weather_calls(&self) -> usize {
            self.weather_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn geocode_zip(
            &self,
            _zip: &str,
            country: &str,
        ) -> Result<GeocodeResult, ProviderError> {
            self.geocode_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_country.lock().unwrap() = Some(country.to_owned());
            self.geocode.clone()
        }

        async fn current_weather(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<CurrentWeather, ProviderError> {
            self.weather_calls.fetch_add(1, Ordering::SeqCst);
            self.weather.clone()
        }
    }

    fn geocoded(lat: Option<f64>, lon: Option<f64>) -> GeocodeResult {
        GeocodeResult {
            zip: Some("411014".to_owned()),
            name: Some("Pune".to_owned()),
            lat,
            lon,
            country: Some("IN".to_owned()),
        }
    }

    fn current() -> CurrentWeather {
        CurrentWeather {
            main: Some(MainBlock {
                temp: 25.0,
                feels_like: 24.0,
                temp_min: 22.0,
                temp_max: 27.0,
                pressure: 1013,
                humidity: 78,
            }),
            weather: vec![ConditionBlock {
                main: "Clear".to_owned(),
                description: "clear sky".to_owned(),
                icon: "01d".to_owned(),
            }],
            wind: Some(WindBlock {
                speed: 3.6,
                deg: Some(180),
            }),
            visibility: Some(10000),
            clouds: Some(CloudsBlock { all: Some(0) }),
            rain: None,
            sys: Some(SysBlock {
                sunrise: Some(1_726_616_584),
                sunset: Some(1_726_663_384),
            }),
        }
    }

    fn pincode() -> Pincode {
        Pincode::parse("411014").unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
    }

    #[tokio::test]
    async fn unknown_pincode_is_geocoded_once_and_stored() {
        let database = MemoryDatabase::new();
        let provider = StubProvider::new(
            Ok(geocoded(Some(45.133), Some(7.367))),
            Ok(current()),
        );
        let client = Client::new(database.clone(), provider.clone());
        let mut session = database.session().await.unwrap();

        let location =
            client.resolve_location(&mut session, &pincode()).await.unwrap();

        assert_eq!(location.content.latitude, 45.133);
        assert_eq!(location.content.longitude, 7.367);
        assert_eq!(provider.geocode_calls(), 1);
        assert_eq!(
            provider.last_country.lock().unwrap().as_deref(),
            Some("IN")
        );
        let stored = database.locations().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, location.id);
    }

    #[tokio::test]
    async fn known_pincode_skips_the_provider() {
        let database = MemoryDatabase::new();
        let mut session = database.session().await.unwrap();
        let existing = session
            .insert_location(&Location::new(pincode(), 18.52, 73.86))
            .await
            .unwrap();
        let provider = StubProvider::new(
            Err(ProviderError::Unavailable("must not be called".to_owned())),
            Ok(current()),
        );
        let client = Client::new(database.clone(), provider.clone());

        let location =
            client.resolve_location(&mut session, &pincode()).await.unwrap();

        assert_eq!(location.id, existing.id);
        assert_eq!(location.content.latitude, 18.52);
        assert_eq!(provider.geocode_calls(), 0);
    }

    #[tokio::test]
    async fn geocode_without_coordinates_is_not_found() {
        let database = MemoryDatabase::new();
        let provider = StubProvider::new(
            Ok(geocoded(Some(45.133), None)),
            Ok(current()),
        );
        let client = Client::new(database.clone(), provider);
        let mut session = database.session().await.unwrap();

        let result = client.resolve_location(&mut session, &pincode()).await;

        assert!(matches!(result, Err(RequestError::NotFoundUpstream(_))));
        assert!(database.locations().await.is_empty());
    }

    #[tokio::test]
    async fn failing_geocode_is_unavailable() {
        let database = MemoryDatabase::new();
        let provider = StubProvider::new(
            Err(ProviderError::Unavailable("status 500".to_owned())),
            Ok(current()),
        );
        let client = Client::new(database.clone(), provider);
        let mut session = database.session().await.unwrap();

        let result = client.resolve_location(&mut session, &pincode()).await;

        assert!(matches!(result, Err(RequestError::UpstreamUnavailable(_))));
        assert!(database.locations().await.is_empty());
    }

    #[tokio::test]
    async fn missing_weather_is_fetched_converted_and_stored() {
        let database = MemoryDatabase::new();
        let mut payload = current();
        payload.rain = Some(RainBlock {
            one_hour: Some(0.5),
        });
        let provider = StubProvider::new(
            Ok(geocoded(Some(45.133), Some(7.367))),
            Ok(payload),
        );
        let client = Client::new(database.clone(), provider.clone());
        let mut session = database.session().await.unwrap();
        let location =
            client.resolve_location(&mut session, &pincode()).await.unwrap();

        let report = client
            .resolve_weather(
                &mut session,
                45.133,
                7.367,
                &location.id,
                date(18),
            )
            .await
            .unwrap();

        assert_eq!(provider.weather_calls(), 1);
        assert_eq!(report.main.temp, 25.0);
        assert_eq!(report.weather[0].description, "clear sky");
        assert_eq!(report.sunrise, "Sep 18, 2024, 05:13:04 AM");
        assert_eq!(report.sunset, "Sep 18, 2024, 06:13:04 PM");
        assert_eq!(report.rain_1h, Some(0.5));

        let stored = database.weather_records().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].content.location_id, location.id);
        assert_eq!(stored[0].content.for_date, date(18));
        assert_eq!(stored[0].content.created_at, stored[0].content.updated_at);
    }

    #[tokio::test]
    async fn stored_weather_skips_the_provider() {
        let database = MemoryDatabase::new();
        let provider = StubProvider::new(
            Ok(geocoded(Some(28.7), Some(77.1))),
            Ok(current()),
        );
        let client = Client::new(database.clone(), provider.clone());
        let mut session = database.session().await.unwrap();
        let location =
            client.resolve_location(&mut session, &pincode()).await.unwrap();
        let first = client
            .resolve_weather(&mut session, 28.7, 77.1, &location.id, date(18))
            .await
            .unwrap();

        let second = client
            .resolve_weather(&mut session, 28.7, 77.1, &location.id, date(18))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.weather_calls(), 1);
        assert_eq!(database.weather_records().await.len(), 1);
    }

    #[tokio::test]
    async fn failing_weather_fetch_persists_nothing() {
        let database = MemoryDatabase::new();
        let provider = StubProvider::new(
            Ok(geocoded(Some(28.7), Some(77.1))),
            Err(ProviderError::Unavailable("status 500".to_owned())),
        );
        let client = Client::new(database.clone(), provider.clone());
        let mut session = database.session().await.unwrap();
        let location =
            client.resolve_location(&mut session, &pincode()).await.unwrap();

        let result = client
            .resolve_weather(&mut session, 28.7, 77.1, &location.id, date(18))
            .await;

        assert!(matches!(result, Err(RequestError::UpstreamUnavailable(_))));
        assert_eq!(provider.weather_calls(), 1);
        assert!(database.weather_records().await.is_empty());
    }

    #[tokio::test]
    async fn payload_without_required_blocks_is_malformed() {
        let database = MemoryDatabase::new();
        let mut payload = current();
        payload.weather.clear();
        let provider = StubProvider::new(
            Ok(geocoded(Some(28.7), Some(77.1))),
            Ok(payload),
        );
        let client = Client::new(database.clone(), provider);
        let mut session = database.session().await.unwrap();
        let location =
            client.resolve_location(&mut session, &pincode()).await.unwrap();

        let result = client
            .resolve_weather(&mut session, 28.7, 77.1, &location.id, date(18))
            .await;

        match result {
            Err(RequestError::MalformedUpstreamResponse(why)) => {
                assert!(why.contains("weather[0]"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(database.weather_records().await.is_empty());
    }

    #[tokio::test]
    async fn same_pincode_on_another_day_only_fetches_weather() {
        let database = MemoryDatabase::new();
        let provider = StubProvider::new(
            Ok(geocoded(Some(45.133), Some(7.367))),
            Ok(current()),
        );
        let client = Client::new(database.clone(), provider.clone());

        let first = client.weather_report(&pincode(), date(18)).await.unwrap();
        let second = client.weather_report(&pincode(), date(19)).await.unwrap();

        assert_eq!(first.location.id, second.location.id);
        assert_eq!(second.for_date, date(19));
        assert_eq!(provider.geocode_calls(), 1);
        assert_eq!(provider.weather_calls(), 2);
        assert_eq!(database.locations().await.len(), 1);
        assert_eq!(database.weather_records().await.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_insert_surfaces_as_constraint_violation() {
        let database = MemoryDatabase::new();
        let mut session = database.session().await.unwrap();
        session
            .insert_location(&Location::new(pincode(), 18.52, 73.86))
            .await
            .unwrap();

        let result: RequestResult<_> = session
            .insert_location(&Location::new(pincode(), 18.52, 73.86))
            .await
            .map_err(RequestError::from);

        assert!(matches!(
            result,
            Err(RequestError::StorageConstraintViolation(_))
        ));
    }
}
