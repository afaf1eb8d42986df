use thiserror::Error;

/// Numeric failure while fitting a forecasting model.
///
/// The engine never returns this to callers directly; it is carried inside
/// [`crate::ForecastOutcome::FallbackConstant`] so callers can see why the
/// constant fallback was used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("history contains non-finite values")]
    NonFiniteInput,

    #[error("not enough observations to fit (need {needed}, got {got})")]
    InsufficientData { needed: usize, got: usize },

    #[error("invalid model parameter: {0}")]
    InvalidParameter(String),

    #[error("model produced non-finite estimates: {0}")]
    Diverged(String),
}
