//! Point-forecast models over a plain value slice (calendar handling lives in the engine).

use crate::error::FitError;

/// ARIMA(1,1,0) without constant.
///
/// Differences the series once and estimates the single AR coefficient on the
/// differences by conditional least squares,
/// `phi = sum(d[t] * d[t-1]) / sum(d[t-1]^2)` over `t = 1..n`, then bounds it
/// to the stationary range `[-1, 1]`. Forecast differences follow
/// `phi^h * d[last]` and are integrated back onto the last level, so a steady
/// trend (`phi = 1`) is extended unchanged.
///
/// A history with no movement at all has no autoregressive signal; it is fitted
/// with `phi = 0`, i.e. a flat forecast at the last level.
pub fn arima_110(values: &[f64], horizon: usize) -> Result<Vec<f64>, FitError> {
    ensure_finite(values)?;
    if values.len() < 3 {
        return Err(FitError::InsufficientData {
            needed: 3,
            got: values.len(),
        });
    }

    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let lagged = &diffs[..diffs.len() - 1];
    let denom: f64 = lagged.iter().map(|d| d * d).sum();
    let numer: f64 = diffs.windows(2).map(|w| w[1] * w[0]).sum();

    let phi = if denom == 0.0 { 0.0 } else { numer / denom };
    if !phi.is_finite() {
        return Err(FitError::Diverged(format!(
            "autoregressive coefficient is not finite (numer={numer}, denom={denom})"
        )));
    }
    let phi = phi.clamp(-1.0, 1.0);

    let mut level = values[values.len() - 1];
    let mut step = diffs[diffs.len() - 1];
    let mut out = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        step *= phi;
        level += step;
        out.push(level);
    }

    if out.iter().any(|v| !v.is_finite()) {
        return Err(FitError::Diverged("forecast overflowed".to_string()));
    }
    Ok(out)
}

/// Simple exponential smoothing with a fixed coefficient.
///
/// The initial level is the first observation; the forecast is flat at the
/// final smoothed level.
pub fn simple_exp_smoothing(values: &[f64], alpha: f64, horizon: usize) -> Result<Vec<f64>, FitError> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(FitError::InvalidParameter(format!(
            "smoothing coefficient must be in (0, 1], got {alpha}"
        )));
    }
    ensure_finite(values)?;
    let (first, rest) = values.split_first().ok_or(FitError::InsufficientData { needed: 1, got: 0 })?;

    let level = rest
        .iter()
        .fold(*first, |level, y| alpha * y + (1.0 - alpha) * level);

    if !level.is_finite() {
        return Err(FitError::Diverged("smoothed level overflowed".to_string()));
    }
    Ok(vec![level; horizon])
}

/// Recursive trailing-window mean.
///
/// Each step appends the mean of the last `window` points of the *working*
/// series, so later forecasts average over earlier forecasts.
pub fn moving_average(values: &[f64], window: usize, horizon: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut working = values.to_vec();
    working.reserve(horizon);

    for _ in 0..horizon {
        let start = working.len().saturating_sub(window);
        let tail = &working[start..];
        let next = if tail.is_empty() {
            0.0
        } else {
            tail.iter().sum::<f64>() / tail.len() as f64
        };
        working.push(next);
    }

    working.split_off(values.len())
}

/// Repeat the last value.
pub fn naive(values: &[f64], horizon: usize) -> Vec<f64> {
    match values.last() {
        Some(last) => vec![*last; horizon],
        None => Vec::new(),
    }
}

fn ensure_finite(values: &[f64]) -> Result<(), FitError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(FitError::NonFiniteInput)
    }
}
