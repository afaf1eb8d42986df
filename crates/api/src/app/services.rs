use std::sync::Arc;

use plantops_infra::history::{order_volume_history, stock_level_history};
use plantops_infra::{AppConfig, InMemoryRecordStore, MassProductionPredictor, RecordStore, StoredHistory};
use plantops_records::{
    InventoryEntry, Material, MaterialInOut, MaterialInventoryEntry, MaterialLot, MaterialPlan, Plan, ProductionRun,
    Record,
};

/// Shared, type-erased record store.
pub type SharedStore<R> = Arc<dyn RecordStore<R>>;

/// Stores and services shared by every handler.
pub struct AppServices {
    pub plans: SharedStore<Plan>,
    pub productions: SharedStore<ProductionRun>,
    pub inventories: SharedStore<InventoryEntry>,
    pub materials: SharedStore<Material>,
    pub material_plans: SharedStore<MaterialPlan>,
    pub material_lots: SharedStore<MaterialLot>,
    pub materials_in_out: SharedStore<MaterialInOut>,
    pub material_inventories: SharedStore<MaterialInventoryEntry>,
    pub predictor: MassProductionPredictor,
}

fn in_memory<R: Record>() -> SharedStore<R> {
    Arc::new(InMemoryRecordStore::<R>::new())
}

impl AppServices {
    /// Empty in-memory stores.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self {
            plans: in_memory(),
            productions: in_memory(),
            inventories: in_memory(),
            materials: in_memory(),
            material_plans: in_memory(),
            material_lots: in_memory(),
            materials_in_out: in_memory(),
            material_inventories: in_memory(),
            predictor: MassProductionPredictor::default().with_history_months(config.history_months),
        }
    }

    /// Monthly histories the mass-production prediction reads.
    pub fn stored_history(&self) -> StoredHistory {
        StoredHistory {
            order_volume: order_volume_history(&self.productions.list()),
            stock_levels: stock_level_history(&self.inventories.list()),
        }
    }
}
