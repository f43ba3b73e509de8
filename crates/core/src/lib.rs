pub mod config;
pub mod database;
pub mod telemetry;

pub use config::{AppConfig, AuthConfig, CatalogConfig, DatabaseConfig, LogConfig};
pub use database::{Database, DatabaseError, Session};
pub use telemetry::TelemetryError;
