mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod utils;

use crate::{config::ServerConfig, utils::shutdown::shutdown_signal};
use database::{config::DatabaseConfig, db::create_connection};
use log::info;
use migration::{Migrator, MigratorTrait};
use std::error::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_config = DatabaseConfig::from_env()?;
    let server_config = ServerConfig::from_env();

    let db = create_connection(&database_config).await?;
    Migrator::up(&db, None).await?;
    info!("Database is up to date");

    let app = routes::router(db).layer(ServiceBuilder::new().layer(CompressionLayer::new()));

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    info!("Running axum on http://{}", server_config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
