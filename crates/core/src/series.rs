//! Monthly series: one numeric value per calendar month, iterated in calendar order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::month::MonthKey;
use crate::value_object::ValueObject;

/// Ordered `MonthKey -> value` mapping.
///
/// Keys are unique and iterate in calendar order. Inserting an existing month
/// replaces its value; callers that need to combine observations do so before
/// insertion (see the history aggregator).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    points: BTreeMap<MonthKey, f64>,
}

impl ValueObject for MonthlySeries {}

impl MonthlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series holding `value` for every month in `months`.
    pub fn constant(months: impl IntoIterator<Item = MonthKey>, value: f64) -> Self {
        months.into_iter().map(|m| (m, value)).collect()
    }

    pub fn insert(&mut self, month: MonthKey, value: f64) -> Option<f64> {
        self.points.insert(month, value)
    }

    pub fn get(&self, month: &MonthKey) -> Option<f64> {
        self.points.get(month).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_month(&self) -> Option<MonthKey> {
        self.points.keys().next().copied()
    }

    pub fn last_month(&self) -> Option<MonthKey> {
        self.points.keys().next_back().copied()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.values().next_back().copied()
    }

    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.points.keys().copied()
    }

    /// Values in calendar order.
    pub fn values(&self) -> Vec<f64> {
        self.points.values().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, f64)> + '_ {
        self.points.iter().map(|(k, v)| (*k, *v))
    }

    /// Arithmetic mean of all values; `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.values().sum::<f64>() / self.points.len() as f64)
    }

    /// The most recent `n` months (the whole series if it is shorter).
    pub fn tail(&self, n: usize) -> Self {
        let skip = self.points.len().saturating_sub(n);
        self.iter().skip(skip).collect()
    }

    /// The `horizon` contiguous months immediately after the last month.
    pub fn future_months(&self, horizon: usize) -> Vec<MonthKey> {
        match self.last_month() {
            Some(last) => last.next().range(horizon).collect(),
            None => Vec::new(),
        }
    }
}

impl FromIterator<(MonthKey, f64)> for MonthlySeries {
    fn from_iter<I: IntoIterator<Item = (MonthKey, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MonthlySeries {
    type Item = (MonthKey, f64);
    type IntoIter = std::collections::btree_map::IntoIter<MonthKey, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
