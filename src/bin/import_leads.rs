//! Utility to import lead payloads from a JSON file through the intake pipeline.
//!
//! Expects a JSON array of lead payloads (phone required, everything else
//! optional). Validation rejects are reported and skipped; storage faults
//! abort the run.

use anyhow::Result;
use std::fs;

use leadflow_intake::config::Config;
use leadflow_intake::db::Database;
use leadflow_intake::errors::LeadError;
use leadflow_intake::models::NewLead;
use leadflow_intake::store::LeadStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== Import Leads ===\n");

    let config = Config::from_env()?;

    println!("Connecting to database...");
    let db = Database::new(&config.database_url).await?;
    println!("✓ Database connected\n");

    let mut store = LeadStore::new(db.pool.clone());
    if let Some(campaign) = config.campaign.clone() {
        store.set_campaign(campaign);
    }

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "leads.json".to_string());
    let raw = fs::read_to_string(&path)?;
    let batch: Vec<NewLead> = serde_json::from_str(&raw)?;

    let total = batch.len();
    if total == 0 {
        println!("No leads found in {}", path);
        return Ok(());
    }

    let mut imported = 0usize;
    let mut rejected = 0usize;

    for lead in &batch {
        match store.add_lead(lead).await {
            Ok(lead_id) => {
                imported += 1;
                println!("✓ {} -> lead {}", lead.phone, lead_id);
            }
            Err(
                e @ (LeadError::InvalidPhone(_)
                | LeadError::InvalidEmail(_)
                | LeadError::ConsentRequired),
            ) => {
                rejected += 1;
                println!("✗ {} rejected: {}", lead.phone, e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\nDone: {}/{} imported, {} rejected", imported, total, rejected);

    store.close().await;
    Ok(())
}
