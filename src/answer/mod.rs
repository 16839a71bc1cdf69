pub mod prompt;
pub mod service;

pub use service::{ResponseSynthesizer, APOLOGY};
