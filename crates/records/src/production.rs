use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use plantops_core::{AccountId, DomainResult, Entity, RecordId};

use crate::record::{apply_patch_fields, require_non_negative, require_text, Record};

/// One production run on a line (a shift's output for one item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRun {
    pub id: RecordId,
    pub date: NaiveDate,
    pub line: Option<String>,
    pub operator: Option<String>,
    pub item_number: String,
    pub item_name: String,
    pub model: String,
    pub target_quantity: i64,
    pub produced_quantity: i64,
    /// Percent.
    pub production_efficiency: i64,
    pub process: String,
    pub operating_time: Option<NaiveTime>,
    pub non_operating_time: Option<NaiveTime>,
    pub shift: String,
    /// Percent.
    pub line_efficiency: i64,
    pub specification: String,
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductionRun {
    pub date: NaiveDate,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    pub item_number: String,
    pub item_name: String,
    pub model: String,
    pub target_quantity: i64,
    pub produced_quantity: i64,
    pub production_efficiency: i64,
    pub process: String,
    #[serde(default)]
    pub operating_time: Option<NaiveTime>,
    #[serde(default)]
    pub non_operating_time: Option<NaiveTime>,
    pub shift: String,
    pub line_efficiency: i64,
    pub specification: String,
    #[serde(default)]
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionRunPatch {
    pub date: Option<NaiveDate>,
    pub line: Option<String>,
    pub operator: Option<String>,
    pub item_number: Option<String>,
    pub item_name: Option<String>,
    pub model: Option<String>,
    pub target_quantity: Option<i64>,
    pub produced_quantity: Option<i64>,
    pub production_efficiency: Option<i64>,
    pub process: Option<String>,
    pub operating_time: Option<NaiveTime>,
    pub non_operating_time: Option<NaiveTime>,
    pub shift: Option<String>,
    pub line_efficiency: Option<i64>,
    pub specification: Option<String>,
}

/// Optional filters for date-range production queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductionFilter {
    pub operator: Option<String>,
    pub item_number: Option<String>,
    pub item_name: Option<String>,
}

impl ProductionFilter {
    pub fn matches(&self, run: &ProductionRun) -> bool {
        let eq = |want: &Option<String>, have: &str| want.as_deref().is_none_or(|w| w.is_empty() || w == have);
        eq(&self.operator, run.operator.as_deref().unwrap_or_default())
            && eq(&self.item_number, &run.item_number)
            && eq(&self.item_name, &run.item_name)
    }
}

impl Entity for ProductionRun {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Record for ProductionRun {
    type New = NewProductionRun;
    type Patch = ProductionRunPatch;

    const KIND: &'static str = "production";

    fn from_new(id: RecordId, new: NewProductionRun) -> Self {
        Self {
            id,
            date: new.date,
            line: new.line,
            operator: new.operator,
            item_number: new.item_number,
            item_name: new.item_name,
            model: new.model,
            target_quantity: new.target_quantity,
            produced_quantity: new.produced_quantity,
            production_efficiency: new.production_efficiency,
            process: new.process,
            operating_time: new.operating_time,
            non_operating_time: new.non_operating_time,
            shift: new.shift,
            line_efficiency: new.line_efficiency,
            specification: new.specification,
            account_idx: new.account_idx,
        }
    }

    fn apply_patch(&mut self, patch: ProductionRunPatch) {
        apply_patch_fields!(
            self,
            patch,
            [
                date,
                item_number,
                item_name,
                model,
                target_quantity,
                produced_quantity,
                production_efficiency,
                process,
                shift,
                line_efficiency,
                specification,
            ];
            [line, operator, operating_time, non_operating_time]
        );
    }

    fn validate(&self) -> DomainResult<()> {
        require_text("item_number", &self.item_number)?;
        require_text("item_name", &self.item_name)?;
        require_non_negative("target_quantity", self.target_quantity)?;
        require_non_negative("produced_quantity", self.produced_quantity)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(date: NaiveDate, operator: Option<&str>, item: &str, produced: i64) -> ProductionRun {
        ProductionRun::from_new(
            RecordId::new(1),
            NewProductionRun {
                date,
                line: Some("L1".to_string()),
                operator: operator.map(str::to_string),
                item_number: item.to_string(),
                item_name: format!("{item}-name"),
                model: "M".to_string(),
                target_quantity: 100,
                produced_quantity: produced,
                production_efficiency: 90,
                process: "assembly".to_string(),
                operating_time: None,
                non_operating_time: None,
                shift: "day".to_string(),
                line_efficiency: 80,
                specification: "std".to_string(),
                account_idx: AccountId::default(),
            },
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn negative_output_is_rejected() {
        let r = run(day(1), None, "X", -1);
        assert!(r.validate().is_err());
    }

    #[test]
    fn patch_sets_optional_fields() {
        let mut r = run(day(1), None, "X", 10);
        r.apply_patch(ProductionRunPatch {
            operator: Some("kim".to_string()),
            produced_quantity: Some(12),
            ..ProductionRunPatch::default()
        });
        assert_eq!(r.operator.as_deref(), Some("kim"));
        assert_eq!(r.produced_quantity, 12);
        assert_eq!(r.line.as_deref(), Some("L1"));
    }

    #[test]
    fn filter_matches_only_given_fields() {
        let r = run(day(2), Some("lee"), "A-1", 5);
        assert!(ProductionFilter::default().matches(&r));
        assert!(ProductionFilter { operator: Some("lee".into()), ..Default::default() }.matches(&r));
        assert!(!ProductionFilter { operator: Some("park".into()), ..Default::default() }.matches(&r));
        assert!(ProductionFilter { item_number: Some("A-1".into()), item_name: Some("A-1-name".into()), ..Default::default() }.matches(&r));
        assert!(!ProductionFilter { item_name: Some("other".into()), ..Default::default() }.matches(&r));
    }

    #[test]
    fn empty_filter_value_is_ignored() {
        let r = run(day(2), None, "A-1", 5);
        assert!(ProductionFilter { operator: Some(String::new()), ..Default::default() }.matches(&r));
    }
}
