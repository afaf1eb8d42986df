//! `plantops-forecast`
//!
//! **Responsibility:** demand/lead-time forecasting for production planning.
//!
//! Pure, synchronous computations only:
//! - [`aggregate`] turns raw dated observations into a [`MonthlySeries`](plantops_core::MonthlySeries);
//! - [`ForecastEngine`] projects a monthly series forward with a selectable method;
//! - [`safety_stock`] sizes buffer stock from demand dispersion and forecast lead time.
//!
//! Nothing here performs IO or keeps state between calls.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod method;
pub mod models;
pub mod params;
pub mod safety_stock;

pub use engine::{forecast, round_prediction, ForecastEngine, ForecastOutcome, ForecastRequest, Prediction};
pub use error::FitError;
pub use method::ForecastMethod;
pub use safety_stock::{project_safety_stock, sample_std_dev};
