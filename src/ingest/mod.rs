pub mod payload;
pub mod service;

pub use service::{ingest_payload, IngestSummary, Ingestor};

use crate::storage::entity::dataset::DatasetType;
use crate::storage::entity::rainfall_record::Category;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetKind {
    District,
    Subbasin,
}

impl DatasetKind {
    pub fn category(&self) -> Category {
        match self {
            DatasetKind::District => Category::District,
            DatasetKind::Subbasin => Category::SubBasin,
        }
    }

    pub fn dataset_type(&self) -> DatasetType {
        match self {
            DatasetKind::District => DatasetType::DistrictWise,
            DatasetKind::Subbasin => DatasetType::SubBasinWise,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::District => f.write_str("district"),
            DatasetKind::Subbasin => f.write_str("subbasin"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSource {
    pub url: String,
    pub kind: DatasetKind,
}

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid payload: {0}")]
    Payload(String),
    #[error("record {index}: {reason}")]
    Mapping { index: usize, reason: String },
    #[error("store error: {0}")]
    Store(#[from] sea_orm::DbErr),
}
