//! One-shot import of the district and sub-basin rainfall datasets.

use log::{error, info};
use rainchat::config::{self, IngestConfig};
use rainchat::ingest::Ingestor;
use rainchat::storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    rainchat::init_logging();

    let cfg = IngestConfig::from_env()?;
    let client = reqwest::Client::builder().build()?;

    let db = storage::establish_connection(&config::database_url()).await?;
    info!("Connected to database");

    let outcome = Ingestor::new(client, &db, cfg.page_limit)
        .run_all(&cfg.sources())
        .await;

    // 无论成功与否都要关闭连接
    storage::close_connection(db).await;

    match outcome {
        Ok(done) => {
            let total: usize = done.iter().map(|s| s.records).sum();
            info!("Ingestion finished: {} sources, {} records", done.len(), total);
        }
        Err(e) => error!("Error during data ingestion: {}", e),
    }
    Ok(())
}
