//! Infrastructure layer: record storage, configuration, reports, and the
//! forecasting services built on stored history.

pub mod config;
pub mod history;
pub mod prediction;
pub mod reports;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use prediction::{
    predict_mass_production, MassProductionForecast, MassProductionInput, MassProductionPredictor, StoredHistory,
};
pub use store::{InMemoryRecordStore, RecordStore};
