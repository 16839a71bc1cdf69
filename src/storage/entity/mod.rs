pub mod dataset;
pub mod rainfall_record;

pub use dataset::Entity as Dataset;
pub use rainfall_record::Entity as RainfallRecord;
