use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Forecasting method selector.
///
/// Serializes as the canonical snake_case name; deserializes leniently through
/// [`ForecastMethod::from_name`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ForecastMethod {
    /// ARIMA(1,1,0).
    Autoregressive,
    /// Simple exponential smoothing with a fixed coefficient.
    ExpSmoothing,
    /// Recursive trailing-window mean.
    MovingAverage,
    /// Carry the last observed value forward.
    Naive,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::Autoregressive => "autoregressive",
            ForecastMethod::ExpSmoothing => "exp_smoothing",
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::Naive => "naive",
        }
    }

    /// Resolve a client-supplied method name.
    ///
    /// Accepts the canonical names plus the labels used by the planning UI
    /// (`ARIMA`, `지수평활법`, `이동평균법`). Anything else resolves to
    /// [`ForecastMethod::Naive`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        match name.to_ascii_lowercase().as_str() {
            "arima" | "autoregressive" | "ar" => ForecastMethod::Autoregressive,
            "exp_smoothing" | "exponential_smoothing" | "ses" | "지수평활법" => {
                ForecastMethod::ExpSmoothing
            }
            "moving_average" | "sma" | "이동평균법" => ForecastMethod::MovingAverage,
            _ => ForecastMethod::Naive,
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ForecastMethod {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl FromStr for ForecastMethod {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        assert_eq!(ForecastMethod::from_name("ARIMA"), ForecastMethod::Autoregressive);
        assert_eq!(ForecastMethod::from_name("지수평활법"), ForecastMethod::ExpSmoothing);
        assert_eq!(ForecastMethod::from_name(" moving_average "), ForecastMethod::MovingAverage);
        assert_eq!(ForecastMethod::from_name("이동평균법"), ForecastMethod::MovingAverage);
    }

    #[test]
    fn unknown_names_are_naive() {
        assert_eq!(ForecastMethod::from_name("prophet"), ForecastMethod::Naive);
        assert_eq!(ForecastMethod::from_name(""), ForecastMethod::Naive);
        assert_eq!("whatever".parse::<ForecastMethod>().unwrap(), ForecastMethod::Naive);
    }

    #[test]
    fn deserializes_any_name() {
        let m: ForecastMethod = serde_json::from_str("\"ARIMA\"").unwrap();
        assert_eq!(m, ForecastMethod::Autoregressive);
        let m: ForecastMethod = serde_json::from_str("\"지수평활법\"").unwrap();
        assert_eq!(m, ForecastMethod::ExpSmoothing);
        let m: ForecastMethod = serde_json::from_str("\"prophet\"").unwrap();
        assert_eq!(m, ForecastMethod::Naive);
        assert_eq!(serde_json::to_string(&ForecastMethod::MovingAverage).unwrap(), "\"moving_average\"");
    }

    #[test]
    fn canonical_names_roundtrip() {
        for m in [
            ForecastMethod::Autoregressive,
            ForecastMethod::ExpSmoothing,
            ForecastMethod::MovingAverage,
            ForecastMethod::Naive,
        ] {
            assert_eq!(ForecastMethod::from_name(m.as_str()), m);
        }
    }
}
