pub mod connection;
pub mod entity;
pub mod repository;

pub use connection::{close_connection, establish_connection};
