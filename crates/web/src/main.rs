use database::{DatabaseConnectionInfo, PgDatabase};
use open_weather::client::{OpenWeatherClient, OpenWeatherCredentials};
use tokio::net::TcpListener;
use weather_info::client::Client;
use web::{start_web_server, WebConfig, WebState};

#[tokio::main]
async fn main() {
    // a .env file is optional
    dotenvy::dotenv().ok();
    env_logger::init();

    // database
    let database_connection_info = DatabaseConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let database = PgDatabase::connect(database_connection_info)
        .await
        .expect("could not connect to database.");

    // weather provider
    let credentials = OpenWeatherCredentials::from_env()
        .expect("expected OPEN_WEATHER_MAP_API_KEY in env.");
    let provider = OpenWeatherClient::new(credentials);

    // web server
    let config = WebConfig::from_env();
    let listener = TcpListener::bind(&config.bind_address)
        .await
        .expect("could not bind web server address.");
    log::info!("Listening on {}.", config.bind_address);

    let state = WebState::new(Client::new(database, provider));
    if let Err(why) = start_web_server(state, listener).await {
        log::error!("Web server stopped: {}", why);
    }
}
