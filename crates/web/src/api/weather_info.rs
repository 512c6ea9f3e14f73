use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    http::Method,
    routing::{get, on, post},
    Json, Router,
};
use chrono::NaiveDate;
use model::{
    pincode::Pincode,
    weather::{Condition, MainReading, WeatherReport, Wind},
    ExampleData,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::serde::date::parse_iso;
use weather_info::{
    client::PincodeWeather, database::Database, provider::WeatherProvider,
};

use crate::{
    common::{
        route_not_found, schema, FieldError, RouteErrorResponse, RouteResult,
        METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes<D, P>(state: WebState<D, P>) -> Router
where
    D: Database,
    P: WeatherProvider,
{
    Router::new()
        .route("/fetch_weather_report", post(fetch_weather_report::<D, P>))
        .route(
            "/fetch_weather_report/schema",
            get(schema::<WeatherReportResponse>),
        )
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// A pincode may be sent as a json string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PincodeInput {
    Text(String),
    Number(serde_json::Number),
}

impl PincodeInput {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Request body as received, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchWeatherReportInput {
    pub pincode: Option<PincodeInput>,
    pub for_date: Option<String>,
}

/// A validated request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchWeatherReport {
    pub pincode: Pincode,
    pub for_date: NaiveDate,
}

impl FetchWeatherReportInput {
    /// Checks every field and reports all rejected ones at once.
    pub fn validate(self) -> Result<FetchWeatherReport, Vec<FieldError>> {
        let mut errors = Vec::new();

        let pincode = match self.pincode {
            None => {
                errors.push(FieldError::new("pincode", "Field required."));
                None
            }
            Some(input) => match Pincode::parse(input.into_text()) {
                Ok(pincode) => Some(pincode),
                Err(why) => {
                    errors.push(FieldError::new("pincode", why.to_string()));
                    None
                }
            },
        };

        let for_date = match self.for_date {
            None => {
                errors.push(FieldError::new("for_date", "Field required."));
                None
            }
            Some(text) => {
                let date = parse_iso(&text);
                if date.is_none() {
                    errors.push(FieldError::new(
                        "for_date",
                        "Date must be a valid date formatted as YYYY-MM-DD.",
                    ));
                }
                date
            }
        };

        match (pincode, for_date) {
            (Some(pincode), Some(for_date)) => {
                Ok(FetchWeatherReport { pincode, for_date })
            }
            _ => Err(errors),
        }
    }
}

/// Weather at a pincode on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReportResponse {
    pub pincode: String,
    #[serde(with = "utility::serde::date")]
    #[schemars(with = "NaiveDate")]
    pub date: NaiveDate,
    pub lat: f64,
    pub lon: f64,
    pub weather: Vec<Condition>,
    pub main: MainReading,
    pub wind: Wind,
    /// Meters.
    pub visibility: Option<i32>,
    /// Cloudiness in percent.
    pub clouds: Option<i32>,
    pub sunrise: String,
    pub sunset: String,
}

impl WeatherReportResponse {
    fn new(
        pincode: String,
        date: NaiveDate,
        lat: f64,
        lon: f64,
        report: WeatherReport,
    ) -> Self {
        Self {
            pincode,
            date,
            lat,
            lon,
            weather: report.weather,
            main: report.main,
            wind: report.wind,
            visibility: report.visibility,
            clouds: Some(report.clouds),
            sunrise: report.sunrise,
            sunset: report.sunset,
        }
    }
}

impl From<PincodeWeather> for WeatherReportResponse {
    fn from(value: PincodeWeather) -> Self {
        let location = value.location.content;
        Self::new(
            location.pincode.into(),
            value.for_date,
            location.latitude,
            location.longitude,
            value.weather,
        )
    }
}

impl ExampleData for WeatherReportResponse {
    fn example_data() -> Self {
        Self::new(
            "411014".to_owned(),
            NaiveDate::from_ymd_opt(2024, 9, 18).unwrap_or_default(),
            45.133,
            7.367,
            WeatherReport::example_data(),
        )
    }
}

async fn fetch_weather_report<D, P>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { weather_client }): State<WebState<D, P>>,
    payload: Result<Json<FetchWeatherReportInput>, JsonRejection>,
) -> RouteResult<Json<WeatherReportResponse>>
where
    D: Database,
    P: WeatherProvider,
{
    let fail = |response: RouteErrorResponse| {
        response
            .with_method(&Method::POST)
            .with_uri(original_uri.path())
    };

    let Json(input) = payload.map_err(|rejection| {
        log::debug!("Rejected request body: {}", rejection.body_text());
        fail(body_rejected(rejection))
    })?;

    let request = input.validate().map_err(|field_errors| {
        log::debug!("Request failed validation: {:?}", field_errors);
        fail(RouteErrorResponse::invalid_fields(field_errors))
    })?;

    weather_client
        .weather_report(&request.pincode, request.for_date)
        .await
        .map(|weather| Json(WeatherReportResponse::from(weather)))
        .map_err(|why| fail(RouteErrorResponse::from(why)))
}

/// A body that is not a json object of the expected shape fails validation
/// like any other field, whatever axum's own status for it would be.
fn body_rejected(rejection: JsonRejection) -> RouteErrorResponse {
    let why = rejection.body_text();
    let field_error = FieldError::new("body", why.clone());
    RouteErrorResponse::invalid_fields(vec![field_error]).with_message(why)
}
