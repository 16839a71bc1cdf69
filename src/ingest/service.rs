use crate::ingest::payload::{map_payload, records_of};
use crate::ingest::{DatasetKind, DatasetSource, IngestError};
use crate::storage::repository::{DatasetRepository, RainfallRepository};
use log::info;
use sea_orm::DatabaseConnection;
use serde_json::Value;

/// Stop paging after this many requests even if the API keeps answering.
const MAX_PAGES: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct IngestSummary {
    pub kind: DatasetKind,
    pub records: usize,
    pub dataset_row_id: i32,
}

/// Writes one payload: all records first, then the dataset entry. The two
/// writes are independent, so a failure in the second leaves the records in
/// place.
pub async fn ingest_payload(
    db: &DatabaseConnection,
    payload: &Value,
    kind: DatasetKind,
    api_url: &str,
) -> Result<IngestSummary, IngestError> {
    let mapped = map_payload(payload, kind, api_url)?;
    let records = RainfallRepository::insert_many(db, mapped.records).await?;
    info!("{}: inserted {} rainfall records", kind, records);
    let dataset = DatasetRepository::create(db, mapped.dataset).await?;
    Ok(IngestSummary {
        kind,
        records,
        dataset_row_id: dataset.id,
    })
}

pub struct Ingestor<'a> {
    client: reqwest::Client,
    db: &'a DatabaseConnection,
    page_limit: Option<usize>,
}

impl<'a> Ingestor<'a> {
    pub fn new(
        client: reqwest::Client,
        db: &'a DatabaseConnection,
        page_limit: Option<usize>,
    ) -> Self {
        Self {
            client,
            db,
            page_limit,
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, IngestError> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.json::<Value>().await?)
    }

    /// One request, or `offset`/`limit` pages merged into the first page's
    /// `records` when a page size is configured.
    pub async fn fetch_payload(&self, url: &str) -> Result<Value, IngestError> {
        let Some(limit) = self.page_limit else {
            return self.get_json(url).await;
        };

        let sep = if url.contains('?') { '&' } else { '?' };
        let mut first: Option<Value> = None;
        let mut all: Vec<Value> = Vec::new();
        let mut offset = 0usize;

        for _ in 0..MAX_PAGES {
            let page_url = format!("{url}{sep}offset={offset}&limit={limit}");
            let page = self.get_json(&page_url).await?;
            let batch = records_of(&page)?.to_vec();
            let total = page
                .get("total")
                .and_then(|t| t.as_u64().or_else(|| t.as_str().and_then(|s| s.parse().ok())));
            let batch_len = batch.len();
            all.extend(batch);
            info!("fetched page offset={} count={} total={:?}", offset, batch_len, total);
            if first.is_none() {
                first = Some(page);
            }

            offset += batch_len;
            let reached_total = total.map(|t| offset as u64 >= t).unwrap_or(false);
            if batch_len < limit || reached_total {
                break;
            }
        }

        match first {
            Some(Value::Object(mut map)) => {
                map.insert("records".to_string(), Value::Array(all));
                Ok(Value::Object(map))
            }
            _ => Err(IngestError::Payload("payload is not a JSON object".to_string())),
        }
    }

    pub async fn ingest(&self, source: &DatasetSource) -> Result<IngestSummary, IngestError> {
        let payload = self.fetch_payload(&source.url).await?;
        let summary = ingest_payload(self.db, &payload, source.kind, &source.url).await?;
        info!(
            "{} data inserted successfully (dataset row {})",
            source.kind, summary.dataset_row_id
        );
        Ok(summary)
    }

    /// Sources in order; the first failure stops the run. Earlier sources
    /// stay written.
    pub async fn run_all(
        &self,
        sources: &[DatasetSource],
    ) -> Result<Vec<IngestSummary>, IngestError> {
        let mut done = Vec::with_capacity(sources.len());
        for source in sources {
            done.push(self.ingest(source).await?);
        }
        Ok(done)
    }
}
