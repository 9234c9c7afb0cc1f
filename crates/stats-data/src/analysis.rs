//! Report pipeline.
//!
//! Orchestrates loading, sender normalisation and the independent view
//! derivations, returning an [`AnalysisResult`] ready to be written out.

use std::path::Path;

use chrono::{DateTime, Utc};
use stats_core::error::{Result, StatsError};
use stats_core::models::{AggregatedReport, Message};
use stats_core::settings::AggregationConfig;
use stats_core::time_utils::format_generated_at;
use tracing::info;

use crate::aggregator::MessageAggregator;
use crate::interactions::InteractionExtractor;
use crate::reader::read_messages;
use crate::words::{word_frequency, WordFrequencyOptions};

// ── Public types ──────────────────────────────────────────────────────────────

/// Bookkeeping produced alongside the report.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// Data rows in the export, header excluded.
    pub rows_read: usize,
    /// Rows dropped because their date or time could not be parsed.
    pub rows_dropped: usize,
    /// Wall-clock seconds spent reading and parsing the export.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent deriving the views.
    pub transform_time_seconds: f64,
}

/// The complete output of [`analyze_file`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub report: AggregatedReport,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Derive every view of the report from already-parsed messages.
///
/// `messages` must be sorted by timestamp; senders are normalised here through
/// `config.identities`. Apart from `generated_at` the result depends only on
/// the inputs, so the same messages and config always give the same report.
pub fn build_report(
    messages: Vec<Message>,
    config: &AggregationConfig,
    generated_at: DateTime<Utc>,
) -> AggregatedReport {
    let messages = config.identities.normalize(messages);

    let extractor =
        InteractionExtractor::new(config.interaction_window, config.min_interaction_weight);
    let word_options = WordFrequencyOptions {
        min_len: config.min_word_len,
        limit: config.top_words,
    };

    AggregatedReport {
        generated_at: format_generated_at(generated_at),
        stats: MessageAggregator::global_stats(&messages),
        hourly: MessageAggregator::hourly(&messages),
        daily: MessageAggregator::daily(&messages),
        monthly: MessageAggregator::monthly(&messages),
        heatmap: MessageAggregator::heatmap(&messages),
        contributors: MessageAggregator::contributors(&messages),
        wordfreq: word_frequency(&messages, &config.stopwords, word_options),
        interactions: extractor.extract(&messages),
    }
}

/// Run the full pipeline over an export on disk.
///
/// 1. Read and parse the export, dropping malformed rows.
/// 2. Build the report.
///
/// Fails when the file cannot be read, or when it has data rows and none of
/// them parse. An export with no data rows yields an all-zero report.
pub fn analyze_file(path: &Path, config: &AggregationConfig) -> Result<AnalysisResult> {
    // ── Step 1: Load messages ─────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let outcome = read_messages(path, &config.unknown_sender)?;
    let load_time = load_start.elapsed().as_secs_f64();

    if outcome.messages.is_empty() && outcome.rows_read > 0 {
        return Err(StatsError::NoValidRows {
            path: path.to_path_buf(),
            rows: outcome.rows_read,
        });
    }

    // ── Step 2: Derive views ──────────────────────────────────────────────────
    let transform_start = std::time::Instant::now();
    let report = build_report(outcome.messages, config, Utc::now());
    let transform_time = transform_start.elapsed().as_secs_f64();

    info!(
        "Aggregated {} messages from {} ({} participants, {} rows dropped)",
        report.stats.total_messages,
        path.display(),
        report.stats.unique_participants,
        outcome.rows_dropped,
    );

    Ok(AnalysisResult {
        report,
        metadata: AnalysisMetadata {
            rows_read: outcome.rows_read,
            rows_dropped: outcome.rows_dropped,
            load_time_seconds: load_time,
            transform_time_seconds: transform_time,
        },
    })
}

/// Serialise the report as pretty JSON (two-space indent, UTF-8 kept as is).
pub fn render_report(report: &AggregatedReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the report to `path`, creating parent directories.
///
/// The JSON goes to a sibling temp file first and is renamed into place, so
/// readers never see a half-written document.
pub fn write_report(report: &AggregatedReport, path: &Path) -> Result<()> {
    let write_err = |source: std::io::Error| StatsError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let json = render_report(report)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
