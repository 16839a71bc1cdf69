use crate::ingest::{DatasetKind, DatasetSource};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing env {0}")]
    Missing(&'static str),
    #[error("invalid env {var}={value}")]
    Invalid { var: &'static str, value: String },
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://rainfall.db?mode=rwc";
pub const DATA_GOV_BASE_URL: &str = "https://api.data.gov.in/resource";

/// data.gov.in resource ids of the two rainfall datasets.
pub const DISTRICT_RESOURCE_ID: &str = "6c05cd1b-ed59-40c2-bc31-e314f39c6971";
pub const SUBBASIN_RESOURCE_ID: &str = "da428447-700a-41e9-a56a-d7855ffb672f";

pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Chat server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
    pub model: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw,
            })?,
            Err(_) => 5000,
        };
        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|x| x.trim().to_string())
                    .filter(|x| !x.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| default_model().to_string());

        Ok(Self {
            host,
            port,
            cors_origins,
            model,
        })
    }
}

fn default_model() -> &'static str {
    match std::env::var("LLM_PROVIDER")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "openrouter" => "google/gemini-2.5-flash",
        _ => "gemini-2.5-flash",
    }
}

/// Ingestion job settings.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub base_url: String,
    pub district_api_key: String,
    pub subbasin_api_key: String,
    pub page_limit: Option<usize>,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let district_api_key = std::env::var("DATA_GOV_API_KEY_DISTRICT")
            .map_err(|_| ConfigError::Missing("DATA_GOV_API_KEY_DISTRICT"))?;
        let subbasin_api_key = std::env::var("DATA_GOV_API_KEY_SUBBASIN")
            .map_err(|_| ConfigError::Missing("DATA_GOV_API_KEY_SUBBASIN"))?;
        let base_url =
            std::env::var("DATA_GOV_BASE_URL").unwrap_or_else(|_| DATA_GOV_BASE_URL.to_string());
        let page_limit = match std::env::var("INGEST_PAGE_LIMIT") {
            Ok(raw) if !raw.trim().is_empty() => {
                let n = raw
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(ConfigError::Invalid {
                        var: "INGEST_PAGE_LIMIT",
                        value: raw.clone(),
                    })?;
                Some(n)
            }
            _ => None,
        };

        Ok(Self {
            base_url,
            district_api_key,
            subbasin_api_key,
            page_limit,
        })
    }

    /// The fixed list of sources, ingested in this order.
    pub fn sources(&self) -> Vec<DatasetSource> {
        let base = self.base_url.trim_end_matches('/');
        vec![
            DatasetSource {
                url: format!(
                    "{}/{}?api-key={}&format=json",
                    base, DISTRICT_RESOURCE_ID, self.district_api_key
                ),
                kind: DatasetKind::District,
            },
            DatasetSource {
                url: format!(
                    "{}/{}?api-key={}&format=json",
                    base, SUBBASIN_RESOURCE_ID, self.subbasin_api_key
                ),
                kind: DatasetKind::Subbasin,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_are_district_then_subbasin() {
        let cfg = IngestConfig {
            base_url: "https://example.test/resource/".to_string(),
            district_api_key: "dk".to_string(),
            subbasin_api_key: "sk".to_string(),
            page_limit: None,
        };
        let sources = cfg.sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].kind, DatasetKind::District);
        assert_eq!(
            sources[0].url,
            format!("https://example.test/resource/{DISTRICT_RESOURCE_ID}?api-key=dk&format=json")
        );
        assert_eq!(sources[1].kind, DatasetKind::Subbasin);
        assert!(sources[1].url.contains("api-key=sk"));
    }
}
