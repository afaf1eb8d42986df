//! Read queries over record stores.
//!
//! Stores only know ids; everything date- or field-based is a scan here.

use chrono::{Datelike, NaiveDate};

use plantops_core::{Entity, MonthKey};
use plantops_records::{InventoryEntry, MaterialInventoryEntry, ProductionFilter, ProductionRun, Record};

use super::RecordStore;

fn newest_first<R: Record>(mut records: Vec<R>) -> Vec<R> {
    records.sort_by_key(|r| std::cmp::Reverse(Entity::id(r)));
    records
}

/// Production runs dated in `year`, ordered by id.
pub fn productions_in_year<S>(store: &S, year: i32) -> Vec<ProductionRun>
where
    S: RecordStore<ProductionRun> + ?Sized,
{
    store.list().into_iter().filter(|r| r.date.year() == year).collect()
}

/// Production runs dated exactly `date`, newest first.
pub fn productions_on_day<S>(store: &S, date: NaiveDate) -> Vec<ProductionRun>
where
    S: RecordStore<ProductionRun> + ?Sized,
{
    newest_first(store.list().into_iter().filter(|r| r.date == date).collect())
}

/// Production runs within `start..=end` matching `filter`, newest first.
pub fn productions_between<S>(store: &S, start: NaiveDate, end: NaiveDate, filter: &ProductionFilter) -> Vec<ProductionRun>
where
    S: RecordStore<ProductionRun> + ?Sized,
{
    newest_first(
        store
            .list()
            .into_iter()
            .filter(|r| r.date >= start && r.date <= end && filter.matches(r))
            .collect(),
    )
}

/// Finished-goods ledger lines dated in `month`, newest first.
pub fn inventory_in_month<S>(store: &S, month: MonthKey) -> Vec<InventoryEntry>
where
    S: RecordStore<InventoryEntry> + ?Sized,
{
    newest_first(store.list().into_iter().filter(|e| month.contains(&e.ledger.date)).collect())
}

/// Raw-material ledger lines dated in `month`, newest first.
pub fn material_inventory_in_month<S>(store: &S, month: MonthKey) -> Vec<MaterialInventoryEntry>
where
    S: RecordStore<MaterialInventoryEntry> + ?Sized,
{
    newest_first(store.list().into_iter().filter(|e| month.contains(&e.ledger.date)).collect())
}
