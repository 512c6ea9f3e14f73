pub use crate::common::RouteResult;

use std::env;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use weather_info::{
    client::Client, database::Database, provider::WeatherProvider,
};

pub mod api;
pub mod common;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_address: String,
}

impl WebConfig {
    /// Reads `WEB_BIND_ADDRESS`, falling back to `DEFAULT_BIND_ADDRESS`.
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("WEB_BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned()),
        }
    }
}

#[derive(Clone)]
pub struct WebState<D, P>
where
    D: Database,
    P: WeatherProvider,
{
    pub weather_client: Client<D, P>,
}

impl<D, P> WebState<D, P>
where
    D: Database,
    P: WeatherProvider,
{
    pub fn new(weather_client: Client<D, P>) -> Self {
        Self { weather_client }
    }
}

pub fn router<D, P>(state: WebState<D, P>) -> Router
where
    D: Database,
    P: WeatherProvider,
{
    api::routes(state).layer(TraceLayer::new_for_http())
}

pub async fn start_web_server<D, P>(
    state: WebState<D, P>,
    listener: TcpListener,
) -> std::io::Result<()>
where
    D: Database,
    P: WeatherProvider,
{
    axum::serve(listener, router(state).into_make_service()).await?;

    Ok(())
}
