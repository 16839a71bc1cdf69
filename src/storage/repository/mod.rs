pub mod dataset_repo;
pub mod rainfall_repo;

pub use dataset_repo::{DatasetRepository, NewDataset};
pub use rainfall_repo::{NewRainfallRecord, RainfallRepository, MAX_QUERY_RESULTS};
