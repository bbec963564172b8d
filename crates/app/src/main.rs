//! Demonstration run: track two batches, run one monitoring pass, report.

use anyhow::Context;
use chrono::{Duration, Utc};

use drugmon_core::BatchNo;
use drugmon_infra::{MonitoringSystem, SqliteStore, StoreConfig};
use drugmon_inventory::{ConditionReading, DrugStatus, Medicine, NewDrug};

struct DemoBatch {
    name: &'static str,
    batch_no: &'static str,
    formula: &'static str,
    age_days: i64,
    shelf_life_days: i64,
    temperature: f64,
    humidity: f64,
}

const DEMO_BATCHES: [DemoBatch; 2] = [
    DemoBatch {
        name: "Paracetamol",
        batch_no: "B123",
        formula: "C8H9NO2",
        age_days: 30,
        shelf_life_days: 365,
        temperature: 25.0,
        humidity: 50.0,
    },
    DemoBatch {
        name: "Ibuprofen",
        batch_no: "B456",
        formula: "C13H18O2",
        age_days: 15,
        shelf_life_days: 730,
        temperature: 32.0,
        humidity: 75.0,
    },
];

/// Insert the drug row the monitoring log references, unless it already exists.
fn ensure_drug(store: &SqliteStore, demo: &DemoBatch, batch_no: &BatchNo) -> anyhow::Result<()> {
    if store.find_drug_id(batch_no)?.is_some() {
        return Ok(());
    }
    let today = Utc::now().date_naive();
    store
        .insert_drug(&NewDrug {
            name: demo.name.to_string(),
            batch_no: batch_no.clone(),
            supplier_id: None,
            quantity: 100,
            expiry_date: today + Duration::days(demo.shelf_life_days),
            location: "Main store".to_string(),
            status: DrugStatus::InStock,
        })
        .with_context(|| format!("failed to seed drug row for batch {batch_no}"))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    drugmon_observability::init();

    let config = StoreConfig::default();
    let mut system = MonitoringSystem::open(&config)
        .with_context(|| format!("failed to open store at {}", config.db_path.display()))?;

    let today = Utc::now().date_naive();
    for demo in &DEMO_BATCHES {
        let batch_no = BatchNo::new(demo.batch_no)?;
        ensure_drug(system.store(), demo, &batch_no)?;

        let medicine = Medicine::new(
            demo.name,
            batch_no,
            today - Duration::days(demo.age_days),
            today + Duration::days(demo.shelf_life_days),
            demo.formula,
            ConditionReading::new(demo.temperature, demo.humidity),
        )?;
        system.add(medicine)?;
    }

    let alerts = system.monitor_conditions().context("monitoring pass failed")?;
    for alert in &alerts {
        tracing::warn!(
            "ALERT: {} (Batch {}) is in {} condition!",
            alert.name,
            alert.batch_no,
            alert.status
        );
    }

    let activity = system.store().fetch_supply_chain()?;
    if !activity.is_empty() {
        tracing::info!("recent supply chain activity");
        for entry in activity.iter().take(5) {
            tracing::info!(
                drug = %entry.drug_name,
                date = %entry.transaction_date,
                quantity = entry.quantity,
                kind = %entry.transaction_type,
                "supply chain transaction"
            );
        }
    }

    system.close();
    Ok(())
}
