//! CSV chat export loading.
//!
//! Reads the rows of a chat export and converts them into [`Message`] values.
//! Bad rows are dropped one at a time; only an unreadable file fails the load.

use std::io::Read;
use std::path::Path;

use stats_core::error::{Result, StatsError};
use stats_core::models::Message;
use stats_core::time_utils::parse_export_timestamp;
use tracing::{debug, warn};

// ── Public types ──────────────────────────────────────────────────────────────

/// Messages parsed from one export plus row bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Parsed messages, sorted by timestamp (ties keep file order).
    pub messages: Vec<Message>,
    /// Data rows seen, excluding the header.
    pub rows_read: usize,
    /// Data rows that could not be turned into a message.
    pub rows_dropped: usize,
}

/// Positions of the four export columns within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    date: usize,
    time: usize,
    sender: Option<usize>,
    body: Option<usize>,
}

impl ColumnLayout {
    /// date, time, name, text.
    const POSITIONAL: Self = Self {
        date: 0,
        time: 1,
        sender: Some(2),
        body: Some(3),
    };

    /// Recognise a header row. Returns `None` when the date or time column
    /// cannot be found, in which case the row is treated as data.
    fn from_header(record: &csv::StringRecord) -> Option<Self> {
        let names: Vec<String> = record
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let find = |pred: fn(&str) -> bool| names.iter().position(|n| pred(n.as_str()));

        let date = find(|n| n.starts_with("date"))?;
        let time = find(|n| n.starts_with("time"))?;
        let sender = find(|n| matches!(n, "name" | "sender" | "author" | "from"));
        let body = find(|n| matches!(n, "text" | "message" | "body" | "content"));

        Some(Self {
            date,
            time,
            sender,
            body,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a chat export from disk.
///
/// `unknown_sender` is used for rows whose sender cell is blank.
pub fn read_messages(path: &Path, unknown_sender: &str) -> Result<ParseOutcome> {
    let file = std::fs::File::open(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = parse_messages(std::io::BufReader::new(file), unknown_sender)?;

    debug!(
        "File {}: {} rows read, {} dropped, {} messages",
        path.display(),
        outcome.rows_read,
        outcome.rows_dropped,
        outcome.messages.len(),
    );

    Ok(outcome)
}

/// Parse chat export CSV from any reader.
///
/// The first record is used as a header when it names a date and a time
/// column; otherwise columns are taken positionally (date, time, name, text)
/// and the first record is parsed as data.
pub fn parse_messages<R: Read>(reader: R, unknown_sender: &str) -> Result<ParseOutcome> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut outcome = ParseOutcome::default();
    let mut layout: Option<ColumnLayout> = None;

    for (index, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(StatsError::Csv(e)),
            Err(e) => {
                // Encoding or quoting problem confined to one record.
                debug!("Skipping unreadable record {}: {}", index + 1, e);
                if layout.is_some() {
                    outcome.rows_read += 1;
                    outcome.rows_dropped += 1;
                }
                continue;
            }
        };

        let current = match layout {
            Some(l) => l,
            None => match ColumnLayout::from_header(&record) {
                Some(header_layout) => {
                    layout = Some(header_layout);
                    continue;
                }
                None => {
                    debug!("No recognisable header; using positional columns");
                    layout = Some(ColumnLayout::POSITIONAL);
                    ColumnLayout::POSITIONAL
                }
            },
        };

        outcome.rows_read += 1;
        match parse_record(&record, current, unknown_sender) {
            Some(msg) => outcome.messages.push(msg),
            None => {
                outcome.rows_dropped += 1;
                debug!("Dropping malformed row {}: {:?}", index + 1, record);
            }
        }
    }

    if outcome.rows_dropped > 0 {
        warn!(
            "Dropped {} of {} rows that could not be parsed",
            outcome.rows_dropped, outcome.rows_read
        );
    }

    outcome.messages.sort_by_key(|m| m.timestamp);
    Ok(outcome)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Convert one record into a [`Message`], returning `None` when the date or
/// time cell is missing or malformed.
fn parse_record(
    record: &csv::StringRecord,
    layout: ColumnLayout,
    unknown_sender: &str,
) -> Option<Message> {
    let date = record.get(layout.date)?;
    let time = record.get(layout.time)?;
    let timestamp = parse_export_timestamp(date, time).ok()?;

    let sender = layout
        .sender
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(unknown_sender);

    let body = layout.body.and_then(|i| record.get(i)).unwrap_or_default();

    Some(Message::new(timestamp, sender, body))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
