//! Monthly histories read from stored records.

use plantops_core::MonthlySeries;
use plantops_forecast::aggregate::{last_by_month, sum_by_month};
use plantops_records::{InventoryEntry, ProductionRun};

/// Produced quantity summed per month.
pub fn order_volume_history(runs: &[ProductionRun]) -> MonthlySeries {
    sum_by_month(runs.iter().map(|r| (r.date, r.produced_quantity as f64)))
}

/// Closing finished-goods stock per month: last ledger line of the month, gaps forward-filled.
pub fn stock_level_history(entries: &[InventoryEntry]) -> MonthlySeries {
    last_by_month(entries.iter().map(|e| (e.ledger.date, e.ledger.current_quantity as f64)))
}
