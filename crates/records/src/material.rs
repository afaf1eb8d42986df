//! Raw-material records: receipts, monthly purchasing plans, lots, and purchase statements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use plantops_core::{AccountId, DomainResult, Entity, RecordId};

use crate::record::{apply_patch_fields, require_finite, require_month, require_non_negative, require_text, Record};

macro_rules! impl_entity {
    ($($t:ty),*) => {
        $(
            impl Entity for $t {
                type Id = RecordId;

                fn id(&self) -> RecordId {
                    self.id
                }
            }
        )*
    };
}

impl_entity!(Material, MaterialPlan, MaterialLot, MaterialInOut);

/// Material receipt from a client (supplier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: RecordId,
    pub date: NaiveDate,
    pub client: String,
    pub item_number: String,
    pub item_name: String,
    pub item_category: String,
    pub model: String,
    pub process: String,
    pub quantity: i64,
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaterial {
    pub date: NaiveDate,
    pub client: String,
    pub item_number: String,
    pub item_name: String,
    pub item_category: String,
    pub model: String,
    pub process: String,
    pub quantity: i64,
    #[serde(default)]
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialPatch {
    pub date: Option<NaiveDate>,
    pub client: Option<String>,
    pub item_number: Option<String>,
    pub item_name: Option<String>,
    pub item_category: Option<String>,
    pub model: Option<String>,
    pub process: Option<String>,
    pub quantity: Option<i64>,
}

impl Record for Material {
    type New = NewMaterial;
    type Patch = MaterialPatch;

    const KIND: &'static str = "material";

    fn from_new(id: RecordId, new: NewMaterial) -> Self {
        Self {
            id,
            date: new.date,
            client: new.client,
            item_number: new.item_number,
            item_name: new.item_name,
            item_category: new.item_category,
            model: new.model,
            process: new.process,
            quantity: new.quantity,
            account_idx: new.account_idx,
        }
    }

    fn apply_patch(&mut self, patch: MaterialPatch) {
        apply_patch_fields!(
            self,
            patch,
            [date, client, item_number, item_name, item_category, model, process, quantity]
        );
    }

    fn validate(&self) -> DomainResult<()> {
        require_text("client", &self.client)?;
        require_text("item_number", &self.item_number)?;
        require_text("item_name", &self.item_name)?;
        require_non_negative("quantity", self.quantity)?;
        Ok(())
    }
}

/// Monthly material purchasing plan and its achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPlan {
    pub id: RecordId,
    pub year: i32,
    pub month: u32,
    pub business_plan: f64,
    pub business_amount: f64,
    pub business_achievement_rate: f64,
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaterialPlan {
    pub year: i32,
    pub month: u32,
    pub business_plan: f64,
    pub business_amount: f64,
    /// Derived from plan/amount when omitted.
    #[serde(default)]
    pub business_achievement_rate: Option<f64>,
    #[serde(default)]
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialPlanPatch {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub business_plan: Option<f64>,
    pub business_amount: Option<f64>,
    pub business_achievement_rate: Option<f64>,
}

/// `amount / plan * 100`, or 0 when nothing was planned.
pub fn achievement_rate(plan: f64, amount: f64) -> f64 {
    if plan == 0.0 { 0.0 } else { amount / plan * 100.0 }
}

impl Record for MaterialPlan {
    type New = NewMaterialPlan;
    type Patch = MaterialPlanPatch;

    const KIND: &'static str = "material_plan";

    fn from_new(id: RecordId, new: NewMaterialPlan) -> Self {
        let rate = new
            .business_achievement_rate
            .unwrap_or_else(|| achievement_rate(new.business_plan, new.business_amount));
        Self {
            id,
            year: new.year,
            month: new.month,
            business_plan: new.business_plan,
            business_amount: new.business_amount,
            business_achievement_rate: rate,
            account_idx: new.account_idx,
        }
    }

    fn apply_patch(&mut self, patch: MaterialPlanPatch) {
        apply_patch_fields!(
            self,
            patch,
            [year, month, business_plan, business_amount, business_achievement_rate]
        );
    }

    fn validate(&self) -> DomainResult<()> {
        require_month(self.month)?;
        require_finite("business_plan", self.business_plan)?;
        require_finite("business_amount", self.business_amount)?;
        require_finite("business_achievement_rate", self.business_achievement_rate)?;
        Ok(())
    }
}

/// Material lot status snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLot {
    pub id: RecordId,
    pub date: NaiveDate,
    pub item_number: String,
    pub item_name: String,
    pub item_category: String,
    pub price: f64,
    pub process: String,
    pub client: String,
    pub model: String,
    pub overall_status_quantity: i64,
    pub overall_status_amount: f64,
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaterialLot {
    pub date: NaiveDate,
    pub item_number: String,
    pub item_name: String,
    pub item_category: String,
    pub price: f64,
    pub process: String,
    pub client: String,
    pub model: String,
    pub overall_status_quantity: i64,
    pub overall_status_amount: f64,
    #[serde(default)]
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialLotPatch {
    pub date: Option<NaiveDate>,
    pub item_number: Option<String>,
    pub item_name: Option<String>,
    pub item_category: Option<String>,
    pub price: Option<f64>,
    pub process: Option<String>,
    pub client: Option<String>,
    pub model: Option<String>,
    pub overall_status_quantity: Option<i64>,
    pub overall_status_amount: Option<f64>,
}

impl Record for MaterialLot {
    type New = NewMaterialLot;
    type Patch = MaterialLotPatch;

    const KIND: &'static str = "material_lot";

    fn from_new(id: RecordId, new: NewMaterialLot) -> Self {
        Self {
            id,
            date: new.date,
            item_number: new.item_number,
            item_name: new.item_name,
            item_category: new.item_category,
            price: new.price,
            process: new.process,
            client: new.client,
            model: new.model,
            overall_status_quantity: new.overall_status_quantity,
            overall_status_amount: new.overall_status_amount,
            account_idx: new.account_idx,
        }
    }

    fn apply_patch(&mut self, patch: MaterialLotPatch) {
        apply_patch_fields!(
            self,
            patch,
            [
                date,
                item_number,
                item_name,
                item_category,
                price,
                process,
                client,
                model,
                overall_status_quantity,
                overall_status_amount,
            ]
        );
    }

    fn validate(&self) -> DomainResult<()> {
        require_text("item_number", &self.item_number)?;
        require_text("item_name", &self.item_name)?;
        require_finite("price", self.price)?;
        Ok(())
    }
}

/// Purchase statement for delivered material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInOut {
    pub id: RecordId,
    pub date: NaiveDate,
    pub statement_number: String,
    pub client: String,
    pub delivery_quantity: i64,
    pub defective_quantity: i64,
    pub settlement_quantity: i64,
    pub supply_amount: f64,
    pub vat: f64,
    pub total_amount: f64,
    pub purchase_category: String,
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaterialInOut {
    pub date: NaiveDate,
    pub statement_number: String,
    pub client: String,
    pub delivery_quantity: i64,
    pub defective_quantity: i64,
    pub settlement_quantity: i64,
    pub supply_amount: f64,
    pub vat: f64,
    pub total_amount: f64,
    pub purchase_category: String,
    #[serde(default)]
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialInOutPatch {
    pub date: Option<NaiveDate>,
    pub statement_number: Option<String>,
    pub client: Option<String>,
    pub delivery_quantity: Option<i64>,
    pub defective_quantity: Option<i64>,
    pub settlement_quantity: Option<i64>,
    pub supply_amount: Option<f64>,
    pub vat: Option<f64>,
    pub total_amount: Option<f64>,
    pub purchase_category: Option<String>,
}

impl Record for MaterialInOut {
    type New = NewMaterialInOut;
    type Patch = MaterialInOutPatch;

    const KIND: &'static str = "material_in_out";

    fn from_new(id: RecordId, new: NewMaterialInOut) -> Self {
        Self {
            id,
            date: new.date,
            statement_number: new.statement_number,
            client: new.client,
            delivery_quantity: new.delivery_quantity,
            defective_quantity: new.defective_quantity,
            settlement_quantity: new.settlement_quantity,
            supply_amount: new.supply_amount,
            vat: new.vat,
            total_amount: new.total_amount,
            purchase_category: new.purchase_category,
            account_idx: new.account_idx,
        }
    }

    fn apply_patch(&mut self, patch: MaterialInOutPatch) {
        apply_patch_fields!(
            self,
            patch,
            [
                date,
                statement_number,
                client,
                delivery_quantity,
                defective_quantity,
                settlement_quantity,
                supply_amount,
                vat,
                total_amount,
                purchase_category,
            ]
        );
    }

    fn validate(&self) -> DomainResult<()> {
        require_text("statement_number", &self.statement_number)?;
        require_text("client", &self.client)?;
        require_non_negative("delivery_quantity", self.delivery_quantity)?;
        require_non_negative("defective_quantity", self.defective_quantity)?;
        if self.defective_quantity > self.delivery_quantity {
            return Err(plantops_core::DomainError::invariant(
                "defective_quantity cannot exceed delivery_quantity",
            ));
        }
        require_finite("total_amount", self.total_amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantops_core::DomainError;

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    #[test]
    fn material_plan_derives_rate() {
        let plan = MaterialPlan::from_new(
            RecordId::new(1),
            NewMaterialPlan {
                year: 2024,
                month: 4,
                business_plan: 200.0,
                business_amount: 150.0,
                business_achievement_rate: None,
                account_idx: AccountId::default(),
            },
        );
        assert_eq!(plan.business_achievement_rate, 75.0);
        assert_eq!(achievement_rate(0.0, 10.0), 0.0);
    }

    #[test]
    fn in_out_rejects_more_defects_than_deliveries() {
        let rec = MaterialInOut::from_new(
            RecordId::new(1),
            NewMaterialInOut {
                date: d(),
                statement_number: "S-1".to_string(),
                client: "ACME".to_string(),
                delivery_quantity: 10,
                defective_quantity: 11,
                settlement_quantity: 0,
                supply_amount: 100.0,
                vat: 10.0,
                total_amount: 110.0,
                purchase_category: "raw".to_string(),
                account_idx: AccountId::default(),
            },
        );
        assert!(matches!(rec.validate(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn material_patch_applies() {
        let mut m = Material::from_new(
            RecordId::new(3),
            NewMaterial {
                date: d(),
                client: "ACME".to_string(),
                item_number: "S-10".to_string(),
                item_name: "steel".to_string(),
                item_category: "metal".to_string(),
                model: "M".to_string(),
                process: "cut".to_string(),
                quantity: 5,
                account_idx: AccountId::default(),
            },
        );
        m.apply_patch(MaterialPatch {
            quantity: Some(-1),
            ..MaterialPatch::default()
        });
        assert!(m.validate().is_err());
        m.apply_patch(MaterialPatch {
            quantity: Some(8),
            client: Some("Globex".to_string()),
            ..MaterialPatch::default()
        });
        assert!(m.validate().is_ok());
        assert_eq!(m.client, "Globex");
    }
}
