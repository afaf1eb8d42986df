use chrono::NaiveDate;
use serde::Deserialize;

use plantops_core::{DomainError, MonthKey, RecordId};
use plantops_records::ProductionFilter;

use crate::app::errors;

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

impl MonthQuery {
    pub fn month_key(&self) -> Result<MonthKey, axum::response::Response> {
        MonthKey::new(self.year, self.month).map_err(errors::domain_error_to_response)
    }
}

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub item_number: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
}

impl DaysQuery {
    pub fn filter(&self) -> ProductionFilter {
        ProductionFilter {
            operator: self.operator.clone(),
            item_number: self.item_number.clone(),
            item_name: self.item_name.clone(),
        }
    }
}

// -------------------------
// Path parsing
// -------------------------

pub fn parse_id(raw: &str) -> Result<RecordId, axum::response::Response> {
    raw.parse::<RecordId>().map_err(errors::domain_error_to_response)
}

pub fn parse_year(raw: &str) -> Result<i32, axum::response::Response> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (1..=9999).contains(y))
        .ok_or_else(|| errors::domain_error_to_response(DomainError::validation(format!("invalid year `{raw}`"))))
}

pub fn parse_month_key(year: &str, month: &str) -> Result<MonthKey, axum::response::Response> {
    let year = parse_year(year)?;
    let month = month
        .trim()
        .parse::<u32>()
        .map_err(|_| errors::domain_error_to_response(DomainError::invalid_month(format!("invalid month `{month}`"))))?;
    MonthKey::new(year, month).map_err(errors::domain_error_to_response)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, axum::response::Response> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        errors::domain_error_to_response(DomainError::validation(format!("invalid date `{raw}`: {e}")))
    })
}
