use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StatsError};
use crate::identity::IdentityMap;
use crate::stopwords::StopwordList;

/// File name looked up in the working directory when `--config` is absent.
pub const LOCAL_CONFIG_FILE: &str = "chat-stats.json";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Aggregate a chat export into dashboard statistics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chat-stats",
    about = "Aggregate a chat export into dashboard statistics",
    version
)]
pub struct Settings {
    /// Chat export to read (CSV: date, time, name, text)
    #[arg(long, default_value = "w.csv")]
    pub input: PathBuf,

    /// Where the aggregated JSON is written
    #[arg(long, default_value = "data/whatsapp-aggregated.json")]
    pub output: PathBuf,

    /// Configuration file (identity map, stopwords, thresholds)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but over an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── AggregationConfig ──────────────────────────────────────────────────────────

/// Everything the aggregation pipeline needs besides the messages themselves.
///
/// Passed explicitly into the pipeline; nothing here is process-wide state.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    pub identities: IdentityMap,
    pub stopwords: StopwordList,
    /// Tokens with fewer characters are not counted.
    pub min_word_len: usize,
    /// Length of the word-frequency list.
    pub top_words: usize,
    /// Maximum gap between two consecutive messages that still counts as an
    /// interaction.
    pub interaction_window: chrono::Duration,
    /// Edges lighter than this are dropped.
    pub min_interaction_weight: u64,
    /// Display name for rows whose sender cell is blank.
    pub unknown_sender: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            identities: IdentityMap::new(),
            stopwords: StopwordList::portuguese(),
            min_word_len: default_min_word_len(),
            top_words: default_top_words(),
            interaction_window: chrono::Duration::minutes(default_window_minutes()),
            min_interaction_weight: default_min_weight(),
            unknown_sender: default_unknown_sender(),
        }
    }
}

// ── ConfigFile ─────────────────────────────────────────────────────────────────

/// On-disk JSON configuration. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Raw sender label → canonical name.
    #[serde(default)]
    pub identities: IdentityMap,
    /// Replaces the built-in Portuguese list when present.
    #[serde(default)]
    pub stopwords: Option<Vec<String>>,
    /// Added on top of whichever list is in effect.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
    #[serde(default = "default_min_word_len")]
    pub min_word_length: usize,
    #[serde(default = "default_top_words")]
    pub top_words: usize,
    #[serde(default = "default_window_minutes")]
    pub interaction_window_minutes: i64,
    #[serde(default = "default_min_weight")]
    pub min_interaction_weight: u64,
    #[serde(default = "default_unknown_sender")]
    pub unknown_sender: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            identities: IdentityMap::new(),
            stopwords: None,
            extra_stopwords: Vec::new(),
            min_word_length: default_min_word_len(),
            top_words: default_top_words(),
            interaction_window_minutes: default_window_minutes(),
            min_interaction_weight: default_min_weight(),
            unknown_sender: default_unknown_sender(),
        }
    }
}

fn default_min_word_len() -> usize {
    2
}

fn default_top_words() -> usize {
    100
}

fn default_window_minutes() -> i64 {
    5
}

fn default_min_weight() -> u64 {
    3
}

fn default_unknown_sender() -> String {
    "Desconhecido".to_string()
}

impl ConfigFile {
    /// Default per-user config path, `<config_dir>/chat-stats/config.json`.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chat-stats").join("config.json"))
    }

    /// Read and parse a config file. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StatsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| {
            StatsError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise `chat-stats.json` in the working
    /// directory is tried, then the per-user config, then built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let candidates = [Some(PathBuf::from(LOCAL_CONFIG_FILE)), Self::user_config_path()];
        Self::discover_in(explicit, &candidates)
    }

    /// [`ConfigFile::discover`] over an explicit candidate list.
    pub fn discover_in(explicit: Option<&Path>, candidates: &[Option<PathBuf>]) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from {}", path.display());
            return Self::load_from(path);
        }

        match candidates.iter().flatten().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from(path)
            }
            None => {
                tracing::debug!("No config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate and convert into the pipeline's parameter bundle.
    pub fn into_aggregation_config(self) -> Result<AggregationConfig> {
        if self.min_word_length == 0 {
            return Err(StatsError::Config("minWordLength must be at least 1".into()));
        }
        if self.top_words == 0 {
            return Err(StatsError::Config("topWords must be positive".into()));
        }
        if self.interaction_window_minutes < 0 {
            return Err(StatsError::Config(
                "interactionWindowMinutes must not be negative".into(),
            ));
        }
        if self.unknown_sender.trim().is_empty() {
            return Err(StatsError::Config("unknownSender must not be blank".into()));
        }

        let interaction_window = chrono::Duration::try_minutes(self.interaction_window_minutes)
            .ok_or_else(|| StatsError::Config("interactionWindowMinutes is out of range".into()))?;

        let mut stopwords = match self.stopwords {
            Some(words) => StopwordList::from_words(words),
            None => StopwordList::portuguese(),
        };
        stopwords.extend(self.extra_stopwords);

        Ok(AggregationConfig {
            identities: self.identities,
            stopwords,
            min_word_len: self.min_word_length,
            top_words: self.top_words,
            interaction_window,
            min_interaction_weight: self.min_interaction_weight,
            unknown_sender: self.unknown_sender,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
