use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use plantops_core::{MonthKey, MonthlySeries};

use crate::error::FitError;
use crate::method::ForecastMethod;
use crate::models;
use crate::params::{MAX_HORIZON_MONTHS, MIN_FIT_POINTS, MOVING_AVERAGE_WINDOW, SMOOTHING_ALPHA};

/// Integer-rounded predictions keyed by future month.
pub type Prediction = BTreeMap<MonthKey, i64>;

/// One forecasting request. Stateless; nothing is retained between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub history: MonthlySeries,
    pub method: ForecastMethod,
    pub horizon: usize,
}

impl ForecastRequest {
    pub fn new(history: MonthlySeries, method: ForecastMethod, horizon: usize) -> Self {
        Self {
            history,
            method,
            horizon,
        }
    }

    /// Run with the default engine parameters.
    pub fn run(&self) -> ForecastOutcome {
        ForecastEngine::default().forecast(&self.history, self.method, self.horizon)
    }
}

/// Which path produced a forecast.
///
/// Every variant carries a result of the requested shape; callers that only
/// want numbers use [`ForecastOutcome::into_predictions`].
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    /// History was empty; nothing to predict from.
    Empty,
    /// Fewer than three history points: constant forecast at the rounded mean.
    ShortHistory { mean: i64, values: Prediction },
    /// The selected method ran to completion.
    Fitted(Prediction),
    /// The selected model failed numerically; constant forecast at the rounded mean.
    FallbackConstant {
        mean: i64,
        reason: FitError,
        values: Prediction,
    },
}

impl ForecastOutcome {
    pub fn predictions(&self) -> &Prediction {
        static EMPTY: Prediction = BTreeMap::new();
        match self {
            ForecastOutcome::Empty => &EMPTY,
            ForecastOutcome::ShortHistory { values, .. }
            | ForecastOutcome::Fitted(values)
            | ForecastOutcome::FallbackConstant { values, .. } => values,
        }
    }

    pub fn into_predictions(self) -> Prediction {
        match self {
            ForecastOutcome::Empty => Prediction::new(),
            ForecastOutcome::ShortHistory { values, .. }
            | ForecastOutcome::Fitted(values)
            | ForecastOutcome::FallbackConstant { values, .. } => values,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, ForecastOutcome::Fitted(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ForecastOutcome::FallbackConstant { .. })
    }

    /// Short label for logs and API metadata.
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastOutcome::Empty => "empty",
            ForecastOutcome::ShortHistory { .. } => "short_history",
            ForecastOutcome::Fitted(_) => "fitted",
            ForecastOutcome::FallbackConstant { .. } => "fallback_constant",
        }
    }
}

/// Forecast engine: method dispatch plus the short-history and failure fallbacks.
///
/// Defaults come from [`crate::params`]; the builders exist so tests and
/// callers can tune the coefficients independently.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ForecastEngine {
    smoothing_alpha: f64,
    moving_average_window: usize,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            smoothing_alpha: SMOOTHING_ALPHA,
            moving_average_window: MOVING_AVERAGE_WINDOW,
        }
    }
}

impl ForecastEngine {
    pub fn with_smoothing_alpha(mut self, alpha: f64) -> Self {
        self.smoothing_alpha = alpha;
        self
    }

    pub fn with_moving_average_window(mut self, window: usize) -> Self {
        self.moving_average_window = window;
        self
    }

    pub fn smoothing_alpha(&self) -> f64 {
        self.smoothing_alpha
    }

    pub fn moving_average_window(&self) -> usize {
        self.moving_average_window
    }

    /// Forecast `horizon` months past the end of `history`.
    ///
    /// Horizons beyond [`MAX_HORIZON_MONTHS`] are cut to that length.
    pub fn forecast(&self, history: &MonthlySeries, method: ForecastMethod, horizon: usize) -> ForecastOutcome {
        let Some(mean) = history.mean() else {
            return ForecastOutcome::Empty;
        };

        let horizon = if horizon > MAX_HORIZON_MONTHS {
            warn!(horizon, max = MAX_HORIZON_MONTHS, "forecast horizon capped");
            MAX_HORIZON_MONTHS
        } else {
            horizon
        };

        let months = history.future_months(horizon);
        let values = history.values();

        if values.len() < MIN_FIT_POINTS {
            debug!(
                method = %method,
                points = values.len(),
                "history too short to fit; using constant mean forecast"
            );
            let mean = round_prediction(mean);
            return ForecastOutcome::ShortHistory {
                mean,
                values: months.into_iter().map(|m| (m, mean)).collect(),
            };
        }

        let fitted = match method {
            ForecastMethod::Autoregressive => models::arima_110(&values, horizon),
            ForecastMethod::ExpSmoothing => {
                models::simple_exp_smoothing(&values, self.smoothing_alpha, horizon)
            }
            ForecastMethod::MovingAverage => Ok(models::moving_average(
                &values,
                self.moving_average_window,
                horizon,
            )),
            ForecastMethod::Naive => Ok(models::naive(&values, horizon)),
        };

        match fitted {
            Ok(raw) => {
                debug!(method = %method, horizon, "forecast fitted");
                ForecastOutcome::Fitted(
                    months
                        .into_iter()
                        .zip(raw)
                        .map(|(m, v)| (m, round_prediction(v)))
                        .collect(),
                )
            }
            Err(reason) => {
                warn!(
                    method = %method,
                    horizon,
                    error = %reason,
                    "forecast model failed; falling back to constant mean"
                );
                let mean = round_prediction(mean);
                ForecastOutcome::FallbackConstant {
                    mean,
                    reason,
                    values: months.into_iter().map(|m| (m, mean)).collect(),
                }
            }
        }
    }
}

/// Forecast with the default engine parameters.
pub fn forecast(history: &MonthlySeries, method: ForecastMethod, horizon: usize) -> ForecastOutcome {
    ForecastEngine::default().forecast(history, method, horizon)
}

/// Round to the nearest integer; NaN becomes 0, infinities saturate.
pub fn round_prediction(value: f64) -> i64 {
    if value.is_nan() {
        0
    } else {
        value.round() as i64
    }
}
