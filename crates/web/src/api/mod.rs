use axum::{
    response::IntoResponse,
    routing::{get, on},
    Json, Router,
};
use serde_json::json;
use ::weather_info::{database::Database, provider::WeatherProvider};

pub mod weather_info;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

pub fn routes<D, P>(state: WebState<D, P>) -> Router
where
    D: Database,
    P: WeatherProvider,
{
    Router::new()
        .route("/ping", get(ping))
        .nest_service("/weather_info", self::weather_info::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}
