pub use sea_orm::DatabaseConnection;

pub async fn init_database(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let db = sea_orm::Database::connect(database_url).await?;
    tracing::info!("Database connected successfully");
    Ok(db)
}
