pub mod ai;
pub mod answer;
pub mod api;
pub mod config;
pub mod ingest;
pub mod query;
pub mod storage;

/// `warn` everywhere, `info` for this crate; `RUST_LOG` takes precedence.
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("rainchat", log::LevelFilter::Info)
        .filter_module("ingest_rainfall", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .parse_default_env()
        .init();
}
