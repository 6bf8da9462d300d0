//! The fetch-and-aggregate loop.
//!
//! Walks the branch registry in file order, issues one pricing call per
//! (branch, date, slot) with fixed pacing delays between calls, and collects
//! the normalized records into a single ordered sequence. Per-slot failures
//! are absorbed into error records; nothing short of an unwritable output
//! file aborts a run.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;

use buffetwatch_client::{records_for_slot, BuffetClient, BuffetPriceRequest};
use buffetwatch_core::{AppConfig, BranchConfig, Registry, ResultRecord};

/// Per-run counters reported at completion.
#[derive(Debug, Default)]
pub(crate) struct RunStats {
    pub total_calls: u64,
    pub price_records: usize,
    pub error_records: usize,
}

/// Pacing delays applied between upstream calls.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pacing {
    pub inter_slot_delay_ms: u64,
    pub inter_branch_delay_ms: u64,
}

/// Performs one full fetch cycle and writes the output document.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded, the branch filter does
/// not match a configured branch, the client cannot be constructed, or the
/// output file cannot be written. Per-slot fetch failures are recorded in the
/// output document instead.
pub(crate) async fn run(
    config: &AppConfig,
    branch_filter: Option<&str>,
    date: Option<NaiveDate>,
    output_override: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let registry = buffetwatch_core::load_registry(&config.branches_path)?;
    let branches = select_branches(&registry, branch_filter)?;
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let date_str = date.format("%Y-%m-%d").to_string();
    let output_path = output_override.unwrap_or_else(|| config.output_path.clone());

    if dry_run {
        print_plan(&branches, &date_str);
        return Ok(());
    }

    let client = build_client(config)?;
    let pacing = Pacing {
        inter_slot_delay_ms: config.inter_slot_delay_ms,
        inter_branch_delay_ms: config.inter_branch_delay_ms,
    };

    tracing::info!(
        branches = branches.len(),
        slots = branches.iter().map(|b| b.slots.len()).sum::<usize>(),
        date = %date_str,
        "starting fetch run"
    );

    let (records, stats) = collect_all(&client, &branches, &date_str, pacing).await;

    let document = serde_json::to_string_pretty(&records)?;
    std::fs::write(&output_path, document)
        .with_context(|| format!("failed to write output file {}", output_path.display()))?;

    tracing::info!(
        total_calls = stats.total_calls,
        price_records = stats.price_records,
        error_records = stats.error_records,
        output = %output_path.display(),
        "fetch run complete"
    );

    Ok(())
}

/// Resolves the branch filter against the registry.
///
/// `None` selects every branch in registry order; `Some(id)` selects that one
/// branch or fails if it is not configured.
fn select_branches<'a>(
    registry: &'a Registry,
    filter: Option<&str>,
) -> anyhow::Result<Vec<&'a BranchConfig>> {
    match filter {
        Some(id) => {
            let branch = registry.branch(id).ok_or_else(|| {
                anyhow::anyhow!("branch '{id}' is not in the registry; update config/branches.yaml")
            })?;
            Ok(vec![branch])
        }
        None => Ok(registry.branches.iter().collect()),
    }
}

fn build_client(config: &AppConfig) -> anyhow::Result<BuffetClient> {
    BuffetClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_attempts,
        config.retry_backoff_base_ms,
        &config.api_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build buffet client: {e}"))
}

fn print_plan(branches: &[&BranchConfig], date: &str) {
    let planned: usize = branches.iter().map(|b| b.slots.len()).sum();
    println!(
        "dry-run: would issue {planned} calls across {} branches for {date}",
        branches.len()
    );
    for branch in branches {
        println!(
            "  {} ({}): {} slots",
            branch.name,
            branch.branch_id,
            branch.slots.len()
        );
    }
}

/// Walks every (branch, slot) pair sequentially and aggregates the records.
///
/// One call per pair, awaited to completion (including its retries) before
/// the next starts. Pacing sleeps are skipped before the first slot of a
/// branch and before the first branch, so a single-slot run pays no delay.
pub(crate) async fn collect_all(
    client: &BuffetClient,
    branches: &[&BranchConfig],
    date: &str,
    pacing: Pacing,
) -> (Vec<ResultRecord>, RunStats) {
    let mut records: Vec<ResultRecord> = Vec::new();
    let mut stats = RunStats::default();

    for (branch_index, branch) in branches.iter().enumerate() {
        if branch_index > 0 && pacing.inter_branch_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(pacing.inter_branch_delay_ms)).await;
        }

        tracing::info!(
            branch = %branch.name,
            branch_id = %branch.branch_id,
            slots = branch.slots.len(),
            "fetching branch"
        );

        for (slot_index, slot) in branch.slots.iter().enumerate() {
            if slot_index > 0 && pacing.inter_slot_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(pacing.inter_slot_delay_ms)).await;
            }

            let payload = BuffetPriceRequest {
                branch_id: branch.branch_id.clone(),
                reservation_date: date.to_owned(),
                reservation_time: slot.time.clone(),
                slot_id: slot.slot_id,
            };

            let outcome = client.fetch_buffet_prices(&payload).await;
            stats.total_calls += 1;

            let slot_records = records_for_slot(branch, date, &slot.time, outcome);
            for record in &slot_records {
                if record.is_error() {
                    stats.error_records += 1;
                } else {
                    stats.price_records += 1;
                }
            }
            records.extend(slot_records);
        }

        tracing::info!(branch = %branch.name, "branch complete");
    }

    (records, stats)
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
