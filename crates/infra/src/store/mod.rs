//! Record storage abstractions.

pub mod queries;
pub mod record_store;

pub use record_store::{InMemoryRecordStore, RecordStore};
