//! Mass-production planning forecast: order volume, lead time, and safety stock.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use plantops_core::{DomainError, DomainResult, MonthKey, MonthlySeries};
use plantops_forecast::params::MAX_HORIZON_MONTHS;
use plantops_forecast::{project_safety_stock, round_prediction, ForecastEngine, ForecastMethod, Prediction};

use crate::config::DEFAULT_HISTORY_MONTHS;

/// Number of synthetic months used when stored history is too thin.
pub const SEED_MONTHS: usize = 2;

/// Point-in-time planning figures supplied with a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassProductionInput {
    pub daily_out: i64,
    pub capa: i64,
    pub delivery_date: String,
    pub stock_finished: i64,
    pub stock_wip: i64,
    pub stock_part1: i64,
    pub order_vol: i64,
    pub lead_time_part1: i64,
    /// Method name; unrecognised names forecast naively.
    pub method: String,
    pub forecast_months: i64,
}

impl MassProductionInput {
    pub fn method(&self) -> ForecastMethod {
        ForecastMethod::from_name(&self.method)
    }

    pub fn horizon(&self) -> DomainResult<usize> {
        if self.forecast_months < 1 {
            return Err(DomainError::validation(format!(
                "forecast_months must be at least 1, got {}",
                self.forecast_months
            )));
        }
        match usize::try_from(self.forecast_months) {
            Ok(months) if months <= MAX_HORIZON_MONTHS => Ok(months),
            _ => Err(DomainError::validation(format!(
                "forecast_months must be at most {MAX_HORIZON_MONTHS}, got {}",
                self.forecast_months
            ))),
        }
    }
}

/// Monthly histories the prediction reads from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredHistory {
    /// Produced quantity per month.
    pub order_volume: MonthlySeries,
    /// Closing finished-goods stock per month.
    pub stock_levels: MonthlySeries,
}

/// History and forecast of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricProjection {
    pub history: BTreeMap<MonthKey, i64>,
    pub prediction: Prediction,
    /// How the forecast was produced; absent for derived metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassProductionForecast {
    pub method: ForecastMethod,
    /// True when stored history was too thin and synthetic months were used.
    pub seeded: bool,
    pub order_volume: MetricProjection,
    pub lead_time: MetricProjection,
    pub safety_stock: MetricProjection,
}

fn rounded(series: &MonthlySeries) -> BTreeMap<MonthKey, i64> {
    series.iter().map(|(m, v)| (m, round_prediction(v))).collect()
}

/// Runs the mass-production forecast against stored history.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MassProductionPredictor {
    engine: ForecastEngine,
    history_months: usize,
}

impl Default for MassProductionPredictor {
    fn default() -> Self {
        Self {
            engine: ForecastEngine::default(),
            history_months: DEFAULT_HISTORY_MONTHS,
        }
    }
}

impl MassProductionPredictor {
    pub fn with_history_months(mut self, months: usize) -> Self {
        self.history_months = months.max(1);
        self
    }

    pub fn history_months(&self) -> usize {
        self.history_months
    }

    /// Forecast `input.forecast_months` months of order volume, lead time, and safety stock.
    ///
    /// The most recent `history_months` months of produced volume form the
    /// order-volume history; stock levels are looked up for the same months
    /// (0 where none is known). With fewer months than that on record, the two
    /// calendar months before `today` are used instead, carrying the request's
    /// `order_vol` and `stock_finished`. Lead time is the request's
    /// `lead_time_part1` for every history month.
    pub fn predict(
        &self,
        stored: &StoredHistory,
        input: &MassProductionInput,
        today: NaiveDate,
    ) -> DomainResult<MassProductionForecast> {
        let horizon = input.horizon()?;
        let method = input.method();

        let real = stored.order_volume.tail(self.history_months);
        let seeded = real.len() < self.history_months;

        let (order_volume, stock_levels) = if seeded {
            let current = MonthKey::of(&today);
            let months: Vec<MonthKey> = current.plus_months(-(SEED_MONTHS as i64)).range(SEED_MONTHS).collect();
            info!(
                stored_months = real.len(),
                required_months = self.history_months,
                "order history too short; seeding synthetic months"
            );
            (
                MonthlySeries::constant(months.iter().copied(), input.order_vol as f64),
                MonthlySeries::constant(months, input.stock_finished as f64),
            )
        } else {
            let stock: MonthlySeries = real
                .months()
                .map(|m| (m, stored.stock_levels.get(&m).unwrap_or(0.0)))
                .collect();
            (real, stock)
        };

        let lead_time = MonthlySeries::constant(order_volume.months(), input.lead_time_part1 as f64);

        let order_outcome = self.engine.forecast(&order_volume, method, horizon);
        let lead_outcome = self.engine.forecast(&lead_time, method, horizon);
        let safety = project_safety_stock(&order_volume, order_outcome.predictions(), lead_outcome.predictions());

        info!(
            method = %method,
            horizon,
            seeded,
            order_outcome = order_outcome.kind(),
            lead_time_outcome = lead_outcome.kind(),
            "mass production forecast"
        );

        Ok(MassProductionForecast {
            method,
            seeded,
            order_volume: MetricProjection {
                history: rounded(&order_volume),
                outcome: Some(order_outcome.kind()),
                prediction: order_outcome.into_predictions(),
            },
            lead_time: MetricProjection {
                history: rounded(&lead_time),
                outcome: Some(lead_outcome.kind()),
                prediction: lead_outcome.into_predictions(),
            },
            safety_stock: MetricProjection {
                history: rounded(&stock_levels),
                prediction: safety,
                outcome: None,
            },
        })
    }
}

/// [`MassProductionPredictor::predict`] with default settings.
pub fn predict_mass_production(
    stored: &StoredHistory,
    input: &MassProductionInput,
    today: NaiveDate,
) -> DomainResult<MassProductionForecast> {
    MassProductionPredictor::default().predict(stored, input, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(y: i32, mo: u32) -> MonthKey {
        MonthKey::new(y, mo).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn input(method: &str, months: i64) -> MassProductionInput {
        MassProductionInput {
            daily_out: 100,
            capa: 120,
            delivery_date: "2026-12-01".to_string(),
            stock_finished: 40,
            stock_wip: 10,
            stock_part1: 5,
            order_vol: 300,
            lead_time_part1: 2,
            method: method.to_string(),
            forecast_months: months,
        }
    }

    fn year_of_history(values: [f64; 12]) -> StoredHistory {
        let order_volume: MonthlySeries = m(2025, 1).range(12).zip(values).collect();
        let stock_levels: MonthlySeries = m(2025, 1).range(6).map(|k| (k, 7.0)).collect();
        StoredHistory {
            order_volume,
            stock_levels,
        }
    }

    #[test]
    fn thin_history_is_seeded_with_the_two_previous_months() {
        let out = predict_mass_production(&StoredHistory::default(), &input("ARIMA", 3), today()).unwrap();
        assert!(out.seeded);
        assert_eq!(out.order_volume.history.keys().copied().collect::<Vec<_>>(), vec![m(2026, 8), m(2026, 9)]);
        assert_eq!(out.order_volume.history.values().copied().collect::<Vec<_>>(), vec![300, 300]);
        assert_eq!(out.safety_stock.history.values().copied().collect::<Vec<_>>(), vec![40, 40]);
        assert_eq!(out.lead_time.history.values().copied().collect::<Vec<_>>(), vec![2, 2]);

        // Two points: short-history constant.
        assert_eq!(out.order_volume.outcome, Some("short_history"));
        assert_eq!(
            out.order_volume.prediction.keys().copied().collect::<Vec<_>>(),
            vec![m(2026, 10), m(2026, 11), m(2026, 12)]
        );
        assert!(out.order_volume.prediction.values().all(|v| *v == 300));
        // Constant demand has no dispersion.
        assert!(out.safety_stock.prediction.values().all(|v| *v == 0));
        assert_eq!(out.safety_stock.prediction.len(), 3);
    }

    #[test]
    fn january_seed_reaches_into_the_previous_year() {
        let jan = NaiveDate::from_ymd_opt(2027, 1, 5).unwrap();
        let out = predict_mass_production(&StoredHistory::default(), &input("naive", 1), jan).unwrap();
        assert_eq!(out.order_volume.history.keys().copied().collect::<Vec<_>>(), vec![m(2026, 11), m(2026, 12)]);
    }

    #[test]
    fn full_history_is_used_as_stored() {
        let stored = year_of_history([10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0]);
        let out = predict_mass_production(&stored, &input("moving_average", 2), today()).unwrap();
        assert!(!out.seeded);
        assert_eq!(out.order_volume.history.len(), 12);
        assert_eq!(out.order_volume.outcome, Some("fitted"));
        assert_eq!(
            out.order_volume.prediction.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![(m(2026, 1), 110), (m(2026, 2), 113)]
        );
        // Stock is known for the first six months only.
        assert_eq!(out.safety_stock.history[&m(2025, 6)], 7);
        assert_eq!(out.safety_stock.history[&m(2025, 7)], 0);

        // sigma of 10..=120 step 10 is sqrt(1300); lead time 2.
        let expected = round_prediction(1.65 * 1300f64.sqrt() * 2f64.sqrt());
        assert!(out.safety_stock.prediction.values().all(|v| *v == expected));
        assert_eq!(
            out.safety_stock.prediction.keys().collect::<Vec<_>>(),
            out.order_volume.prediction.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn only_the_latest_window_is_read() {
        let mut stored = year_of_history([5.0; 12]);
        stored.order_volume.insert(m(2024, 6), 10_000.0);
        let out = predict_mass_production(&stored, &input("naive", 1), today()).unwrap();
        assert_eq!(out.order_volume.history.len(), 12);
        assert!(!out.order_volume.history.contains_key(&m(2024, 6)));
        assert_eq!(out.safety_stock.prediction.values().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn history_window_is_configurable() {
        let stored = year_of_history([5.0; 12]);
        let predictor = MassProductionPredictor::default().with_history_months(24);
        assert!(predictor.predict(&stored, &input("naive", 1), today()).unwrap().seeded);
        let predictor = MassProductionPredictor::default().with_history_months(6);
        let out = predictor.predict(&stored, &input("naive", 1), today()).unwrap();
        assert!(!out.seeded);
        assert_eq!(out.order_volume.history.len(), 6);
    }

    #[test]
    fn non_positive_horizon_is_rejected() {
        for months in [0, -1] {
            let err = predict_mass_production(&StoredHistory::default(), &input("ARIMA", months), today()).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn oversized_horizon_is_rejected() {
        let max = MAX_HORIZON_MONTHS as i64;
        assert_eq!(input("naive", max).horizon().unwrap(), MAX_HORIZON_MONTHS);
        for months in [max + 1, 100_000_000_000, i64::MAX] {
            let err = predict_mass_production(&StoredHistory::default(), &input("ARIMA", months), today()).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{months}");
        }
    }

    #[test]
    fn method_names_resolve_leniently() {
        assert_eq!(input("지수평활법", 1).method(), ForecastMethod::ExpSmoothing);
        assert_eq!(input("이동평균법", 1).method(), ForecastMethod::MovingAverage);
        assert_eq!(input("ARIMA", 1).method(), ForecastMethod::Autoregressive);
        assert_eq!(input("something else", 1).method(), ForecastMethod::Naive);
    }

    #[test]
    fn response_serializes_month_keys() {
        let out = predict_mass_production(&StoredHistory::default(), &input("naive", 1), today()).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["order_volume"]["prediction"]["2026-10"], 300);
        assert_eq!(json["safety_stock"]["history"]["2026-08"], 40);
        assert!(json["safety_stock"].get("outcome").is_none());
        assert_eq!(json["method"], "naive");
    }
}
