//! Stock ledgers: finished-goods inventory and raw-material inventory share one line layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use plantops_core::{AccountId, DomainResult, Entity, RecordId};

use crate::record::{apply_patch_fields, require_finite, require_non_negative, require_text, Record};

/// One dated stock ledger line: opening balance, movements, and closing balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLedger {
    pub date: NaiveDate,
    pub item_number: String,
    pub item_name: String,
    pub price: f64,
    pub basic_quantity: i64,
    pub basic_amount: f64,
    pub in_quantity: i64,
    pub in_amount: f64,
    pub defective_in_quantity: i64,
    pub defective_in_amount: f64,
    pub out_quantity: i64,
    pub out_amount: f64,
    pub adjustment_quantity: i64,
    /// Closing stock level; the level quantity forecasting reads.
    pub current_quantity: i64,
    pub current_amount: f64,
    pub lot_current_quantity: i64,
    pub difference_quantity: i64,
    #[serde(default)]
    pub account_idx: AccountId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLedgerPatch {
    pub date: Option<NaiveDate>,
    pub item_number: Option<String>,
    pub item_name: Option<String>,
    pub price: Option<f64>,
    pub basic_quantity: Option<i64>,
    pub basic_amount: Option<f64>,
    pub in_quantity: Option<i64>,
    pub in_amount: Option<f64>,
    pub defective_in_quantity: Option<i64>,
    pub defective_in_amount: Option<f64>,
    pub out_quantity: Option<i64>,
    pub out_amount: Option<f64>,
    pub adjustment_quantity: Option<i64>,
    pub current_quantity: Option<i64>,
    pub current_amount: Option<f64>,
    pub lot_current_quantity: Option<i64>,
    pub difference_quantity: Option<i64>,
}

impl StockLedger {
    fn apply(&mut self, patch: StockLedgerPatch) {
        apply_patch_fields!(
            self,
            patch,
            [
                date,
                item_number,
                item_name,
                price,
                basic_quantity,
                basic_amount,
                in_quantity,
                in_amount,
                defective_in_quantity,
                defective_in_amount,
                out_quantity,
                out_amount,
                adjustment_quantity,
                current_quantity,
                current_amount,
                lot_current_quantity,
                difference_quantity,
            ]
        );
    }

    fn validate(&self) -> DomainResult<()> {
        require_text("item_number", &self.item_number)?;
        require_text("item_name", &self.item_name)?;
        require_finite("price", self.price)?;
        require_non_negative("in_quantity", self.in_quantity)?;
        require_non_negative("out_quantity", self.out_quantity)?;
        require_non_negative("defective_in_quantity", self.defective_in_quantity)?;
        Ok(())
    }
}

macro_rules! ledger_record {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub id: RecordId,
            #[serde(flatten)]
            pub ledger: StockLedger,
        }

        impl Entity for $name {
            type Id = RecordId;

            fn id(&self) -> RecordId {
                self.id
            }
        }

        impl Record for $name {
            type New = StockLedger;
            type Patch = StockLedgerPatch;

            const KIND: &'static str = $kind;

            fn from_new(id: RecordId, new: StockLedger) -> Self {
                Self { id, ledger: new }
            }

            fn apply_patch(&mut self, patch: StockLedgerPatch) {
                self.ledger.apply(patch);
            }

            fn validate(&self) -> DomainResult<()> {
                self.ledger.validate()
            }
        }
    };
}

ledger_record!(
    /// Finished-goods inventory ledger line.
    InventoryEntry,
    "inventory"
);

ledger_record!(
    /// Raw-material inventory ledger line.
    MaterialInventoryEntry,
    "material_inventory"
);

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(date: NaiveDate, item_name: &str, current: i64, price: f64) -> StockLedger {
        StockLedger {
            date,
            item_number: format!("{item_name}-no"),
            item_name: item_name.to_string(),
            price,
            basic_quantity: 0,
            basic_amount: 0.0,
            in_quantity: current,
            in_amount: current as f64 * price,
            defective_in_quantity: 0,
            defective_in_amount: 0.0,
            out_quantity: 0,
            out_amount: 0.0,
            adjustment_quantity: 0,
            current_quantity: current,
            current_amount: current as f64 * price,
            lot_current_quantity: current,
            difference_quantity: 0,
            account_idx: AccountId::default(),
        }
    }

    #[test]
    fn serializes_flat() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        let e = InventoryEntry::from_new(RecordId::new(9), ledger(d, "bolt", 40, 0.5));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["current_quantity"], 40);
        assert_eq!(json["date"], "2024-02-03");
        let back: InventoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn patch_and_validate() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        let mut e = MaterialInventoryEntry::from_new(RecordId::new(1), ledger(d, "steel", 10, 3.0));
        e.apply_patch(StockLedgerPatch {
            current_quantity: Some(25),
            ..StockLedgerPatch::default()
        });
        assert_eq!(e.ledger.current_quantity, 25);
        assert!(e.validate().is_ok());

        e.apply_patch(StockLedgerPatch {
            item_name: Some("  ".to_string()),
            ..StockLedgerPatch::default()
        });
        assert!(e.validate().is_err());
    }
}
