use crate::config::DatabaseConfig;
use log::LevelFilter;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Creates a database connection
pub async fn create_connection(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options.sqlx_logging_level(LevelFilter::Debug);

    if let Some(max_connections) = config.max_connections {
        options.max_connections(max_connections);
    }

    Database::connect(options).await
}
