//! Tunable forecasting constants.

/// Smoothing coefficient for simple exponential smoothing. Fixed, not fitted.
pub const SMOOTHING_ALPHA: f64 = 0.2;

/// Service-level z-score for safety stock (~95% one-sided).
pub const SERVICE_LEVEL_Z: f64 = 1.65;

/// Autoregressive model order `(p, d, q)`.
pub const ARIMA_ORDER: (usize, usize, usize) = (1, 1, 0);

/// Trailing window of the recursive moving-average forecast.
pub const MOVING_AVERAGE_WINDOW: usize = 3;

/// Below this many history points every method degrades to a constant mean forecast.
pub const MIN_FIT_POINTS: usize = 3;

/// Lead times below this are treated as this (a zero lead time would zero out safety stock).
pub const MIN_LEAD_TIME: f64 = 1.0;

/// Longest forecast horizon accepted, in months.
pub const MAX_HORIZON_MONTHS: usize = 120;
