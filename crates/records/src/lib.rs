//! Planning, production, stock, and material records.
//!
//! This crate contains the record types and their validation rules, implemented
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod ledger;
pub mod material;
pub mod plan;
pub mod production;
pub mod record;

pub use ledger::{InventoryEntry, MaterialInventoryEntry, StockLedger, StockLedgerPatch};
pub use material::{
    achievement_rate, Material, MaterialInOut, MaterialInOutPatch, MaterialLot, MaterialLotPatch, MaterialPatch,
    MaterialPlan, MaterialPlanPatch, NewMaterial, NewMaterialInOut, NewMaterialLot, NewMaterialPlan,
};
pub use plan::{NewPlan, Plan, PlanPatch};
pub use production::{NewProductionRun, ProductionFilter, ProductionRun, ProductionRunPatch};
pub use record::Record;
