use crate::storage::entity::{dataset, rainfall_record};
use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Schema,
    Statement,
};
use std::time::Duration;

fn connect_options(db_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Info);

    // 内存库只存在于单个连接里，连接池不能回收它
    if db_url.contains(":memory:") {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(10)
            .min_connections(2)
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(600));
    }
    opt
}

/// Opens the store and creates the tables when missing.
pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(connect_options(db_url)).await?;
    let builder = db.get_database_backend();

    if builder == DatabaseBackend::Sqlite && !db_url.contains(":memory:") {
        db.execute(Statement::from_string(
            builder,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;
    }

    let schema = Schema::new(builder);

    let stmt = builder.build(
        schema
            .create_table_from_entity(rainfall_record::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(dataset::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    // 非唯一索引：重复导入会产生重复记录
    db.execute(Statement::from_string(
        builder,
        "CREATE INDEX IF NOT EXISTS idx_rainfall_records_lookup ON rainfall_records(category, year, month);"
            .to_string(),
    ))
    .await?;

    info!("Database connection established and tables initialized.");

    Ok(db)
}

pub async fn close_connection(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => info!("Database connection closed"),
        Err(e) => log::warn!("closing database connection failed: {}", e),
    }
}
