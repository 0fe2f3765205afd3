use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::Instant;
use tracing::info;

use pageflow_core::EnhanceConfig;
use pageflow_sim::{Change, Replay, ReplayReport, Scenario};

pub async fn run(path: &Path, config: EnhanceConfig, json: bool, realtime: bool) -> Result<()> {
    let scenario = Scenario::load(path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;

    let report = replay(&scenario, config, realtime).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// Run a scenario; with `realtime` each step waits for its wall-clock time
pub async fn replay(scenario: &Scenario, config: EnhanceConfig, realtime: bool) -> Result<ReplayReport> {
    let mut replay = Replay::start(scenario, config)?;
    let started = Instant::now();

    for step in &scenario.steps {
        if realtime {
            tokio::time::sleep_until(started + Duration::from_millis(step.at_ms)).await;
        }
        replay
            .apply(step)
            .with_context(|| format!("step at {}ms failed", step.at_ms))?;
    }

    let report = replay.finish()?;
    info!(
        finished_at = report.finished_at,
        mutations = report.mutations.len(),
        "replay finished"
    );
    Ok(report)
}

fn print_summary(report: &ReplayReport) {
    let snapshot = &report.coordinator;

    println!("Settled at {}ms, scroll offset {}", report.finished_at, report.scroll_offset);
    println!(
        "Active section: {}",
        snapshot.active_section.as_deref().unwrap_or("(none)")
    );
    println!(
        "Fade-in: {}/{} animated, cards: {}/{} animated",
        snapshot.fade_in.animated,
        snapshot.fade_in.tracked,
        snapshot.cards.animated,
        snapshot.cards.tracked
    );
    if snapshot.lazy_images_pending > 0 {
        println!("Lazy images still pending: {}", snapshot.lazy_images_pending);
    }
    if snapshot.errors_reported > 0 {
        println!("Errors reported: {}", snapshot.errors_reported);
    }

    let prevented = report.dispatched.iter().filter(|d| d.default_prevented).count();
    println!(
        "\nEvents dispatched: {} ({} default prevented)",
        report.dispatched.len(),
        prevented
    );

    let scrolls = report
        .mutations
        .iter()
        .filter(|m| matches!(m.change, Change::Scroll { .. }))
        .count();
    println!(
        "Mutations: {} ({} programmatic scrolls)",
        report.mutations.len(),
        scrolls
    );
}
