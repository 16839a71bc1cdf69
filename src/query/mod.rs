pub mod filter;
pub mod parser;
pub mod prompt;
pub mod service;
pub mod structured;

pub use filter::{FilterField, RainfallFilter};
pub use service::{QueryTranslator, TranslateError};
pub use structured::{FieldFilter, FilterValue, StructuredQuery};
