//! Safety-stock projection: `Z * sigma(demand) * sqrt(lead time)` per forecast month.

use plantops_core::MonthlySeries;

use crate::engine::{round_prediction, Prediction};
use crate::params::{MIN_LEAD_TIME, SERVICE_LEVEL_Z};

/// Sample standard deviation (n-1); zero for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / ((values.len() - 1) as f64);
    var.sqrt()
}

/// Project safety stock over the months of `demand_forecast` at the default service level.
///
/// Lead time comes from `lead_time_forecast` for the same month, floored at one
/// period; a month missing from the lead-time forecast also counts as one period.
pub fn project_safety_stock(
    demand_history: &MonthlySeries,
    demand_forecast: &Prediction,
    lead_time_forecast: &Prediction,
) -> Prediction {
    project_safety_stock_with_z(demand_history, demand_forecast, lead_time_forecast, SERVICE_LEVEL_Z)
}

pub fn project_safety_stock_with_z(
    demand_history: &MonthlySeries,
    demand_forecast: &Prediction,
    lead_time_forecast: &Prediction,
    z: f64,
) -> Prediction {
    let sigma = sample_std_dev(&demand_history.values());

    demand_forecast
        .keys()
        .map(|month| {
            let lt = lead_time_forecast
                .get(month)
                .map(|v| *v as f64)
                .unwrap_or(MIN_LEAD_TIME)
                .max(MIN_LEAD_TIME);
            (*month, round_prediction(z * sigma * lt.sqrt()))
        })
        .collect()
}
