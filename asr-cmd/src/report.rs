//! The `report` command: one sequential pass over the array's volumes.
//!
//! Connects, enumerates volumes, fetches each volume's 90-day space
//! history, derives the report metrics, and writes one CSV row per
//! volume. A failure on one volume (deleted mid-run, transient fault)
//! is logged and skipped so the report still completes for the rest;
//! session, enumeration, and file errors remain fatal. The session is
//! invalidated on every exit path.

use anyhow::Context;
use asr_array::error::ArrayError;
use asr_array::session::{ArrayConfig, ArraySession};
use asr_array::space::HISTORICAL_WINDOW;
use asr_report::metrics::SpaceMetrics;
use asr_report::report::{report_filename, ReportWriter};
use chrono::Local;
use log::{info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub struct ReportOptions {
    pub array: String,
    pub api_token: String,
    pub output_dir: PathBuf,
    pub insecure: bool,
    pub request_timeout_secs: u64,
    pub run_budget_secs: u64,
}

struct ReportSummary {
    path: PathBuf,
    rows_written: usize,
    skipped: Vec<(String, String)>,
}

pub async fn run_report(opts: ReportOptions) -> anyhow::Result<()> {
    let started = Instant::now();

    if opts.insecure {
        warn!("TLS certificate verification disabled by --insecure");
    }

    info!("Connecting to array {}.", opts.array);
    let session = ArraySession::connect(&ArrayConfig {
        host: opts.array.clone(),
        api_token: opts.api_token.clone(),
        accept_invalid_certs: opts.insecure,
        request_timeout: Duration::from_secs(opts.request_timeout_secs),
    })
    .await
    .with_context(|| format!("failed to open a session to array {}", opts.array))?;

    // An unresponsive array must not hang the run forever; the whole
    // fetch/compute/write phase runs under one budget.
    let budget = Duration::from_secs(opts.run_budget_secs);
    let outcome = tokio::time::timeout(budget, generate(&session, &opts)).await;

    // Invalidate the session whether the pipeline succeeded, failed, or
    // ran out of budget. A close failure is logged, never masks the
    // pipeline result.
    if let Err(e) = session.close().await {
        warn!("Failed to invalidate array session: {e}");
    }

    let summary = match outcome {
        Ok(result) => result?,
        Err(_) => anyhow::bail!(
            "run budget of {}s exceeded before the report finished",
            opts.run_budget_secs
        ),
    };

    println!(
        "Report completed in {:.2} seconds.",
        started.elapsed().as_secs_f64()
    );
    println!("Output file: {}", summary.path.display());
    println!("{} volume(s) written.", summary.rows_written);
    if !summary.skipped.is_empty() {
        println!("{} volume(s) skipped:", summary.skipped.len());
        for (name, reason) in &summary.skipped {
            println!("  {name}: {reason}");
        }
    }

    Ok(())
}

async fn generate(session: &ArraySession, opts: &ReportOptions) -> anyhow::Result<ReportSummary> {
    info!("Gathering all volumes.");
    let volumes = session
        .list_volumes()
        .await
        .context("failed to enumerate volumes")?;

    let filename = report_filename(Local::now().date_naive(), session.host());
    let path = opts.output_dir.join(filename);
    let mut writer = ReportWriter::create(&path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;

    info!("Parsing space history for {} volume(s).", volumes.len());
    let mut rows_written = 0;
    let mut skipped = Vec::new();
    for volume in &volumes {
        match session
            .volume_space_history(&volume.name, HISTORICAL_WINDOW)
            .await
        {
            Ok(samples) => match SpaceMetrics::from_samples(&samples) {
                Some(metrics) => {
                    writer.write_row(&volume.name, &metrics)?;
                    rows_written += 1;
                }
                None => {
                    warn!("Volume {} returned no space samples, skipping.", volume.name);
                    skipped.push((volume.name.clone(), "no space samples returned".to_string()));
                }
            },
            Err(e @ ArrayError::VolumeNotFound(_)) => {
                // Deleted between enumeration and fetch; not worth
                // aborting the whole report over.
                warn!("{e}, skipping.");
                skipped.push((volume.name.clone(), e.to_string()));
            }
            Err(e) => {
                warn!("Failed to fetch space history for {}: {e}, skipping.", volume.name);
                skipped.push((volume.name.clone(), e.to_string()));
            }
        }
    }
    writer.finish()?;

    Ok(ReportSummary {
        path,
        rows_written,
        skipped,
    })
}
