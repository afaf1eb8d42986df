//! Planning and purchasing reports.
//!
//! Reports are pure functions over record snapshots; callers pass whatever
//! their stores currently hold.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use plantops_core::{DomainResult, MonthKey};
use plantops_records::{
    achievement_rate, InventoryEntry, Material, MaterialInventoryEntry, MaterialPlan, Plan, ProductionRun,
};

/// First and last calendar day of a month.
pub fn month_range(year: i32, month: u32) -> DomainResult<(NaiveDate, NaiveDate)> {
    let key = MonthKey::new(year, month)?;
    Ok((key.first_day(), key.last_day()))
}

/// Month-over-month change in percent; 0 when there is nothing to compare against.
pub fn growth_rate(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Plan versus actual production for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRate {
    pub year: i32,
    pub month: u32,
    pub prod_plan: f64,
    pub business_plan: f64,
    pub prod_amount: f64,
    pub business_amount: f64,
    pub production_achievement_rate: f64,
    pub business_achievement_rate: f64,
}

/// One row per month of `year` (January first); months without data are all zero.
pub fn plan_rates_for_year(plans: &[Plan], runs: &[ProductionRun], year: i32) -> DomainResult<Vec<PlanRate>> {
    let january = MonthKey::new(year, 1)?;

    Ok(january
        .range(12)
        .map(|month| {
            let month_plans: Vec<&Plan> = plans
                .iter()
                .filter(|p| p.year == month.year() && p.month == month.month())
                .collect();

            let prod_plan: f64 = month_plans.iter().map(|p| p.inventory as f64).sum();
            let business_plan: f64 = month_plans.iter().map(|p| p.planned_amount()).sum();

            let mut prod_amount = 0.0;
            let mut business_amount = 0.0;
            for run in runs.iter().filter(|r| month.contains(&r.date)) {
                let produced = run.produced_quantity as f64;
                prod_amount += produced;
                // Produced output is valued at the month's plan price for the item.
                if let Some(plan) = month_plans.iter().find(|p| p.item_number == run.item_number) {
                    business_amount += produced * plan.price;
                }
            }

            PlanRate {
                year: month.year(),
                month: month.month(),
                prod_plan,
                business_plan,
                prod_amount,
                business_amount,
                production_achievement_rate: achievement_rate(prod_plan, prod_amount),
                business_achievement_rate: achievement_rate(business_plan, business_amount),
            }
        })
        .collect())
}

/// Planned value of one process, current month against the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessGrowth {
    pub year: i32,
    pub month: u32,
    pub process: String,
    pub previous_amount: f64,
    pub current_amount: f64,
    pub growth_rate: f64,
}

/// Sum of `quantity * price` grouped by `group`, pairing every row with every
/// ledger line of the same item name.
fn valued_by<'a, T, L>(
    rows: impl Iterator<Item = &'a T>,
    ledgers: &[L],
    item_name: impl Fn(&T) -> &str,
    quantity: impl Fn(&T) -> f64,
    group: impl Fn(&T) -> &str,
    ledger_line: impl Fn(&L) -> (&str, f64),
) -> BTreeMap<String, f64>
where
    T: 'a,
{
    let mut out: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        let priced: Vec<f64> = ledgers
            .iter()
            .map(&ledger_line)
            .filter(|(name, _)| *name == item_name(row))
            .map(|(_, price)| price)
            .collect();
        if priced.is_empty() {
            continue;
        }
        let value: f64 = priced.iter().map(|price| quantity(row) * price).sum();
        *out.entry(group(row).to_string()).or_insert(0.0) += value;
    }
    out
}

/// Per-process planned value for `month` against the previous calendar month.
///
/// Plans are valued at the finished-goods ledger price of the same item name.
/// Only processes with a value in `month` are reported.
pub fn plan_growth_for_month(plans: &[Plan], inventory: &[InventoryEntry], month: MonthKey) -> Vec<ProcessGrowth> {
    let value_in = |key: MonthKey| {
        valued_by(
            plans.iter().filter(|p| p.year == key.year() && p.month == key.month()),
            inventory,
            |p: &Plan| p.item_name.as_str(),
            |p: &Plan| p.inventory as f64,
            |p: &Plan| p.process.as_str(),
            |e: &InventoryEntry| (e.ledger.item_name.as_str(), e.ledger.price),
        )
    };

    let current = value_in(month);
    let previous = value_in(month.prev());

    current
        .into_iter()
        .map(|(process, current_amount)| {
            let previous_amount = previous.get(&process).copied().unwrap_or(0.0);
            ProcessGrowth {
                year: month.year(),
                month: month.month(),
                process,
                previous_amount,
                current_amount,
                growth_rate: growth_rate(previous_amount, current_amount),
            }
        })
        .collect()
}

/// Average efficiencies for one month, truncated to whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EfficiencyRow {
    pub year: i32,
    pub month: u32,
    pub production_efficiency: i64,
    pub line_efficiency: i64,
}

fn truncated_mean(values: impl Iterator<Item = i64>) -> i64 {
    let (sum, n) = values.fold((0i64, 0i64), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0 } else { (sum as f64 / n as f64).trunc() as i64 }
}

pub fn production_efficiency_for_year(runs: &[ProductionRun], year: i32) -> DomainResult<Vec<EfficiencyRow>> {
    let january = MonthKey::new(year, 1)?;

    Ok(january
        .range(12)
        .map(|month| {
            let in_month = || runs.iter().filter(move |r| month.contains(&r.date));
            EfficiencyRow {
                year: month.year(),
                month: month.month(),
                production_efficiency: truncated_mean(in_month().map(|r| r.production_efficiency)),
                line_efficiency: truncated_mean(in_month().map(|r| r.line_efficiency)),
            }
        })
        .collect())
}

/// Material purchasing plan figures for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRate {
    pub year: i32,
    pub month: u32,
    pub business_plan: f64,
    pub business_amount: f64,
    pub business_achievement_rate: f64,
}

/// Material plans of `year`, ordered by month (insertion order within a month).
pub fn material_rates_for_year(plans: &[MaterialPlan], year: i32) -> Vec<MaterialRate> {
    let mut rows: Vec<MaterialRate> = plans
        .iter()
        .filter(|p| p.year == year)
        .map(|p| MaterialRate {
            year: p.year,
            month: p.month,
            business_plan: p.business_plan,
            business_amount: p.business_amount,
            business_achievement_rate: p.business_achievement_rate,
        })
        .collect();
    rows.sort_by_key(|r| r.month);
    rows
}

/// Received material value of one client, current month against the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientGrowth {
    pub year: i32,
    pub month: u32,
    pub client: String,
    pub previous_amount: f64,
    pub current_amount: f64,
    pub growth_rate: f64,
}

/// Per-client received material value for `month` against the previous calendar month.
///
/// Receipts are valued at the raw-material ledger price of the same item name.
pub fn material_growth_for_month(
    materials: &[Material],
    inventory: &[MaterialInventoryEntry],
    month: MonthKey,
) -> Vec<ClientGrowth> {
    let value_in = |key: MonthKey| {
        valued_by(
            materials.iter().filter(|m| key.contains(&m.date)),
            inventory,
            |m: &Material| m.item_name.as_str(),
            |m: &Material| m.quantity as f64,
            |m: &Material| m.client.as_str(),
            |e: &MaterialInventoryEntry| (e.ledger.item_name.as_str(), e.ledger.price),
        )
    };

    let current = value_in(month);
    let previous = value_in(month.prev());

    current
        .into_iter()
        .map(|(client, current_amount)| {
            let previous_amount = previous.get(&client).copied().unwrap_or(0.0);
            ClientGrowth {
                year: month.year(),
                month: month.month(),
                client,
                previous_amount,
                current_amount,
                growth_rate: growth_rate(previous_amount, current_amount),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::queries::fixtures::{date, ledger, run};
    use crate::store::{InMemoryRecordStore, RecordStore};
    use plantops_core::AccountId;
    use plantops_records::{NewMaterial, NewMaterialPlan, NewPlan};

    fn plan(year: i32, month: u32, item: &str, qty: i64, price: f64, process: &str) -> NewPlan {
        NewPlan {
            year,
            month,
            item_number: item.to_string(),
            item_name: format!("{item} name"),
            inventory: qty,
            model: "M1".to_string(),
            process: process.to_string(),
            price,
            account_idx: AccountId::default(),
        }
    }

    fn m(y: i32, mo: u32) -> MonthKey {
        MonthKey::new(y, mo).unwrap()
    }

    #[test]
    fn month_range_handles_leap_years() {
        assert_eq!(month_range(2024, 2).unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_range(2023, 12).unwrap(), (date(2023, 12, 1), date(2023, 12, 31)));
        assert!(month_range(2024, 13).is_err());
    }

    #[test]
    fn growth_rate_is_zero_without_a_baseline() {
        assert_eq!(growth_rate(0.0, 50.0), 0.0);
        assert_eq!(growth_rate(100.0, 150.0), 50.0);
        assert_eq!(growth_rate(100.0, 50.0), -50.0);
    }

    #[test]
    fn plan_rates_cover_every_month() {
        let plans = InMemoryRecordStore::<Plan>::new();
        plans.insert(plan(2024, 3, "A", 100, 2.0, "press")).unwrap();
        plans.insert(plan(2024, 3, "B", 50, 4.0, "press")).unwrap();
        let runs = InMemoryRecordStore::<ProductionRun>::new();
        runs.insert(run(date(2024, 3, 4), "A", 60)).unwrap();
        runs.insert(run(date(2024, 3, 9), "C", 10)).unwrap();
        runs.insert(run(date(2025, 3, 9), "A", 999)).unwrap();

        let rows = plan_rates_for_year(&plans.list(), &runs.list(), 2024).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].month, 1);
        assert_eq!(rows[0].prod_plan, 0.0);
        assert_eq!(rows[0].production_achievement_rate, 0.0);

        let march = &rows[2];
        assert_eq!(march.prod_plan, 150.0);
        assert_eq!(march.business_plan, 400.0);
        assert_eq!(march.prod_amount, 70.0);
        // Item C has no plan in March and adds no value.
        assert_eq!(march.business_amount, 120.0);
        assert!((march.production_achievement_rate - 70.0 / 150.0 * 100.0).abs() < 1e-9);
        assert_eq!(march.business_achievement_rate, 30.0);
    }

    #[test]
    fn plan_growth_wraps_january_to_previous_december() {
        let plans = InMemoryRecordStore::<Plan>::new();
        plans.insert(plan(2023, 12, "A", 10, 0.0, "press")).unwrap();
        plans.insert(plan(2024, 1, "A", 15, 0.0, "press")).unwrap();
        plans.insert(plan(2024, 1, "B", 4, 0.0, "weld")).unwrap();
        let inventory = InMemoryRecordStore::<InventoryEntry>::new();
        inventory.insert(ledger(date(2024, 1, 3), "A name", 2.0, 1)).unwrap();
        inventory.insert(ledger(date(2024, 1, 3), "B name", 5.0, 1)).unwrap();

        let rows = plan_growth_for_month(&plans.list(), &inventory.list(), m(2024, 1));
        assert_eq!(rows.len(), 2);
        let press = &rows[0];
        assert_eq!(press.process, "press");
        assert_eq!(press.previous_amount, 20.0);
        assert_eq!(press.current_amount, 30.0);
        assert_eq!(press.growth_rate, 50.0);
        let weld = &rows[1];
        assert_eq!(weld.previous_amount, 0.0);
        assert_eq!(weld.growth_rate, 0.0);
    }

    #[test]
    fn efficiency_means_truncate() {
        let store = InMemoryRecordStore::<ProductionRun>::new();
        let mut a = run(date(2024, 2, 1), "A", 1);
        a.production_efficiency = 90;
        a.line_efficiency = 70;
        let mut b = run(date(2024, 2, 2), "A", 1);
        b.production_efficiency = 85;
        b.line_efficiency = 72;
        store.insert(a).unwrap();
        store.insert(b).unwrap();

        let rows = production_efficiency_for_year(&store.list(), 2024).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[1].production_efficiency, 87);
        assert_eq!(rows[1].line_efficiency, 71);
        assert_eq!(rows[0].production_efficiency, 0);
    }

    #[test]
    fn material_rates_sorted_by_month() {
        let store = InMemoryRecordStore::<MaterialPlan>::new();
        for month in [5, 2, 9] {
            store
                .insert(NewMaterialPlan {
                    year: 2024,
                    month,
                    business_plan: 100.0,
                    business_amount: month as f64 * 10.0,
                    business_achievement_rate: None,
                    account_idx: AccountId::default(),
                })
                .unwrap();
        }
        let rows = material_rates_for_year(&store.list(), 2024);
        assert_eq!(rows.iter().map(|r| r.month).collect::<Vec<_>>(), vec![2, 5, 9]);
        assert_eq!(rows[0].business_achievement_rate, 20.0);
        assert!(material_rates_for_year(&store.list(), 2023).is_empty());
    }

    #[test]
    fn material_growth_groups_by_client() {
        let receipt = |on: NaiveDate, client: &str, qty: i64| NewMaterial {
            date: on,
            client: client.to_string(),
            item_number: "S-1".to_string(),
            item_name: "steel".to_string(),
            item_category: "metal".to_string(),
            model: "M".to_string(),
            process: "cut".to_string(),
            quantity: qty,
            account_idx: AccountId::default(),
        };
        let materials = InMemoryRecordStore::<Material>::new();
        materials.insert(receipt(date(2024, 4, 2), "acme", 10)).unwrap();
        materials.insert(receipt(date(2024, 5, 2), "acme", 15)).unwrap();
        materials.insert(receipt(date(2024, 5, 3), "globex", 1)).unwrap();
        let inventory = InMemoryRecordStore::<MaterialInventoryEntry>::new();
        inventory.insert(ledger(date(2024, 5, 1), "steel", 3.0, 1)).unwrap();

        let rows = material_growth_for_month(&materials.list(), &inventory.list(), m(2024, 5));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].client, "acme");
        assert_eq!(rows[0].previous_amount, 30.0);
        assert_eq!(rows[0].current_amount, 45.0);
        assert_eq!(rows[0].growth_rate, 50.0);
        assert_eq!(rows[1].client, "globex");
        assert_eq!(rows[1].current_amount, 3.0);
    }

    mod props {
        use super::*;
        use plantops_core::RecordId;
        use plantops_records::Record;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig { cases: 128, ..ProptestConfig::default() })]

            #[test]
            fn plan_rates_cover_twelve_months_with_finite_rates(
                year in 1i32..=9999,
                qty in 0i64..10_000,
                produced in 0i64..10_000,
                price in 0.0f64..1_000.0,
            ) {
                let plans = vec![Plan::from_new(RecordId::new(1), plan(year, 6, "A", qty, price, "press"))];
                let runs = vec![ProductionRun::from_new(RecordId::new(1), run(date(year, 6, 15), "A", produced))];

                let rows = plan_rates_for_year(&plans, &runs, year).unwrap();
                prop_assert_eq!(rows.iter().map(|r| r.month).collect::<Vec<_>>(), (1..=12).collect::<Vec<u32>>());
                for row in &rows {
                    prop_assert!(row.production_achievement_rate.is_finite());
                    prop_assert!(row.business_achievement_rate.is_finite());
                }
                prop_assert_eq!(rows[5].prod_amount, produced as f64);
            }

            #[test]
            fn growth_rate_round_trips_current(previous in 1.0f64..1e6, current in 0.0f64..1e6) {
                let rate = growth_rate(previous, current);
                prop_assert!((previous * (1.0 + rate / 100.0) - current).abs() < 1e-6 * previous.max(current).max(1.0));
            }
        }
    }
}
