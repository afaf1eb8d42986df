//! `plantops-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and the calendar-month value objects the
//! forecasting and reporting code is built on.

pub mod entity;
pub mod error;
pub mod id;
pub mod month;
pub mod series;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AccountId, RecordId};
pub use month::MonthKey;
pub use series::MonthlySeries;
pub use value_object::ValueObject;
