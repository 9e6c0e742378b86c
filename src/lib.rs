pub mod accounting;
pub mod backend;
pub mod config;
pub mod database;
pub mod error;
pub mod telemetry;
