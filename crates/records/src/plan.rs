use serde::{Deserialize, Serialize};

use plantops_core::{AccountId, DomainResult, Entity, MonthKey, RecordId};

use crate::record::{apply_patch_fields, require_finite, require_month, require_non_negative, require_text, Record};

/// Monthly production plan line for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: RecordId,
    pub year: i32,
    pub month: u32,
    pub item_number: String,
    pub item_name: String,
    /// Planned quantity.
    pub inventory: i64,
    pub model: String,
    pub process: String,
    pub price: f64,
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlan {
    pub year: i32,
    pub month: u32,
    pub item_number: String,
    pub item_name: String,
    pub inventory: i64,
    pub model: String,
    pub process: String,
    pub price: f64,
    #[serde(default)]
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanPatch {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub item_number: Option<String>,
    pub item_name: Option<String>,
    pub inventory: Option<i64>,
    pub model: Option<String>,
    pub process: Option<String>,
    pub price: Option<f64>,
}

impl Plan {
    pub fn month_key(&self) -> DomainResult<MonthKey> {
        MonthKey::new(self.year, self.month)
    }

    /// Planned quantity valued at the plan price.
    pub fn planned_amount(&self) -> f64 {
        self.inventory as f64 * self.price
    }
}

impl Entity for Plan {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Record for Plan {
    type New = NewPlan;
    type Patch = PlanPatch;

    const KIND: &'static str = "plan";

    fn from_new(id: RecordId, new: NewPlan) -> Self {
        Self {
            id,
            year: new.year,
            month: new.month,
            item_number: new.item_number,
            item_name: new.item_name,
            inventory: new.inventory,
            model: new.model,
            process: new.process,
            price: new.price,
            account_idx: new.account_idx,
        }
    }

    fn apply_patch(&mut self, patch: PlanPatch) {
        apply_patch_fields!(self, patch, [year, month, item_number, item_name, inventory, model, process, price]);
    }

    fn validate(&self) -> DomainResult<()> {
        require_month(self.month)?;
        self.month_key()?;
        require_text("item_number", &self.item_number)?;
        require_text("item_name", &self.item_name)?;
        require_text("process", &self.process)?;
        require_non_negative("inventory", self.inventory)?;
        require_finite("price", self.price)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantops_core::DomainError;

    fn new_plan() -> NewPlan {
        NewPlan {
            year: 2024,
            month: 3,
            item_number: "P-100".to_string(),
            item_name: "Bracket".to_string(),
            inventory: 500,
            model: "M1".to_string(),
            process: "press".to_string(),
            price: 2.5,
            account_idx: AccountId::default(),
        }
    }

    #[test]
    fn builds_and_validates() {
        let plan = Plan::from_new(RecordId::new(1), new_plan());
        assert!(plan.validate().is_ok());
        assert_eq!(plan.planned_amount(), 1250.0);
        assert_eq!(plan.month_key().unwrap().to_string(), "2024-03");
    }

    #[test]
    fn rejects_bad_month() {
        let mut plan = Plan::from_new(RecordId::new(1), new_plan());
        plan.apply_patch(PlanPatch {
            month: Some(13),
            ..PlanPatch::default()
        });
        assert!(matches!(plan.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut plan = Plan::from_new(RecordId::new(7), new_plan());
        plan.apply_patch(PlanPatch {
            inventory: Some(800),
            process: Some("weld".to_string()),
            ..PlanPatch::default()
        });
        assert_eq!(plan.inventory, 800);
        assert_eq!(plan.process, "weld");
        assert_eq!(plan.item_name, "Bracket");
        assert_eq!(plan.id, RecordId::new(7));
    }

    #[test]
    fn account_defaults_when_missing_from_json() {
        let new: NewPlan = serde_json::from_value(serde_json::json!({
            "year": 2024, "month": 1, "item_number": "A", "item_name": "B",
            "inventory": 1, "model": "m", "process": "p", "price": 1.0
        }))
        .unwrap();
        assert_eq!(new.account_idx, AccountId::default());
    }
}
