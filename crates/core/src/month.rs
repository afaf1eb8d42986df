//! Calendar-month keys (`YYYY-MM`).

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A calendar month, rendered as `YYYY-MM`.
///
/// Ordering is calendar order: field order (year, then month) drives the derived `Ord`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl ValueObject for MonthKey {}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::invalid_month(format!("month {month} out of range 1..=12")));
        }
        if !(1..=9999).contains(&year) {
            return Err(DomainError::invalid_month(format!("year {year} out of range 1..=9999")));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month (December rolls over into January).
    pub fn next(self) -> Self {
        self.plus_months(1)
    }

    /// The preceding calendar month (January rolls back into December).
    pub fn prev(self) -> Self {
        self.plus_months(-1)
    }

    pub fn plus_months(self, n: i64) -> Self {
        let index = self.index() + n;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Months elapsed from `self` to `other` (negative if `other` is earlier).
    pub fn months_until(self, other: MonthKey) -> i64 {
        other.index() - self.index()
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains<D: Datelike>(&self, date: &D) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Iterator over `count` contiguous months starting at `self`.
    pub fn range(self, count: usize) -> impl Iterator<Item = MonthKey> {
        (0..count as i64).map(move |i| self.plus_months(i))
    }

    fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| DomainError::invalid_month(format!("expected YYYY-MM, got {s:?}")))?;
        if y.len() != 4 || m.len() != 2 {
            return Err(DomainError::invalid_month(format!("expected YYYY-MM, got {s:?}")));
        }
        let year = y
            .parse::<i32>()
            .map_err(|e| DomainError::invalid_month(format!("{s:?}: {e}")))?;
        let month = m
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_month(format!("{s:?}: {e}")))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display_roundtrip() {
        assert_eq!(mk("2024-03").to_string(), "2024-03");
        assert_eq!(mk("0999-11").year(), 999);
    }

    #[test]
    fn rejects_malformed_keys() {
        for bad in ["2024-13", "2024-00", "2024/01", "24-01", "2024-1", "abcd-ef", ""] {
            assert!(bad.parse::<MonthKey>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn next_rolls_over_year() {
        assert_eq!(mk("2025-12").next(), mk("2026-01"));
        assert_eq!(mk("2026-01").prev(), mk("2025-12"));
        assert_eq!(mk("2024-05").plus_months(-17), mk("2022-12"));
    }

    #[test]
    fn ordering_is_calendar_order() {
        let mut keys = vec![mk("2025-01"), mk("2024-12"), mk("2024-02")];
        keys.sort();
        assert_eq!(keys, vec![mk("2024-02"), mk("2024-12"), mk("2025-01")]);
        assert_eq!(mk("2024-11").months_until(mk("2025-02")), 3);
    }

    #[test]
    fn day_bounds() {
        let feb = mk("2024-02");
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(feb.contains(&NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
        assert_eq!(mk("2024-12").last_day(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&mk("2024-07")).unwrap();
        assert_eq!(json, "\"2024-07\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mk("2024-07"));
        assert!(serde_json::from_str::<MonthKey>("\"2024-7\"").is_err());
    }
}
