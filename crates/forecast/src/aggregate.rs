//! History aggregation: raw `(timestamp, value)` observations -> [`MonthlySeries`].
//!
//! Two flavours, matching the two kinds of quantity the planning data holds:
//! - flows (produced quantity, orders): summed per month, gaps left absent;
//! - levels (stock on hand): last observation per month, gaps forward-filled.

use std::collections::BTreeMap;

use chrono::Datelike;

use plantops_core::{MonthKey, MonthlySeries};

/// Sum observations per calendar month.
///
/// Months without observations are absent from the output (no zero fill).
pub fn sum_by_month<D, I>(observations: I) -> MonthlySeries
where
    D: Datelike,
    I: IntoIterator<Item = (D, f64)>,
{
    let mut sums: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for (at, value) in observations {
        *sums.entry(MonthKey::of(&at)).or_insert(0.0) += value;
    }
    sums.into_iter().collect()
}

/// Last observed value per calendar month, forward-filled across gaps.
///
/// Input order is not assumed; observations are sorted by timestamp first
/// (stable, so among equal timestamps the later input wins). Non-finite values
/// count as missing.
pub fn last_by_month<D, I>(observations: I) -> MonthlySeries
where
    D: Datelike + Ord,
    I: IntoIterator<Item = (D, f64)>,
{
    let lasts = monthly_last_values(observations);
    match (lasts.keys().next().copied(), lasts.keys().next_back().copied()) {
        (Some(first), Some(last)) => forward_fill(&lasts, first, last),
        _ => MonthlySeries::new(),
    }
}

fn monthly_last_values<D, I>(observations: I) -> BTreeMap<MonthKey, f64>
where
    D: Datelike + Ord,
    I: IntoIterator<Item = (D, f64)>,
{
    let mut sorted: Vec<(D, f64)> = observations
        .into_iter()
        .filter(|(_, v)| v.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut lasts = BTreeMap::new();
    for (at, value) in sorted {
        lasts.insert(MonthKey::of(&at), value);
    }
    lasts
}

fn forward_fill(lasts: &BTreeMap<MonthKey, f64>, first: MonthKey, last: MonthKey) -> MonthlySeries {
    let span = first.months_until(last) as usize + 1;
    let mut carry = 0.0;

    first
        .range(span)
        .map(|month| {
            if let Some(v) = lasts.get(&month) {
                carry = *v;
            }
            (month, carry)
        })
        .collect()
}
