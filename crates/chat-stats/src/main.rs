mod bootstrap;

use anyhow::{Context, Result};
use stats_core::settings::{ConfigFile, Settings};
use stats_data::analysis::{analyze_file, write_report, AnalysisResult};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("chat-stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Settings: {:?}", settings);

    let result = run(&settings)?;

    println!(
        "Aggregated data written to {} ({} messages)",
        settings.output.display(),
        result.report.stats.total_messages
    );

    Ok(())
}

/// Load configuration, aggregate the export and write the report.
fn run(settings: &Settings) -> Result<AnalysisResult> {
    let config = ConfigFile::discover(settings.config.as_deref())
        .and_then(ConfigFile::into_aggregation_config)
        .context("Failed to load configuration")?;

    tracing::debug!(
        "Config: {} identity mappings, {} stopwords",
        config.identities.len(),
        config.stopwords.len()
    );

    let result = analyze_file(&settings.input, &config).with_context(|| {
        format!(
            "Failed to aggregate {} (export the chat as CSV first)",
            settings.input.display()
        )
    })?;

    tracing::info!(
        "Loaded in {:.3}s, aggregated in {:.3}s",
        result.metadata.load_time_seconds,
        result.metadata.transform_time_seconds
    );

    write_report(&result.report, &settings.output)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    tracing::info!("Report written to {}", settings.output.display());

    Ok(result)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
