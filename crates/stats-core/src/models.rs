use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single chat message parsed from one export row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Local wall-clock time the message was sent (the export carries no zone).
    pub timestamp: NaiveDateTime,
    /// Sender identity. Raw as exported until passed through an
    /// [`IdentityMap`](crate::identity::IdentityMap), canonical afterwards.
    pub sender: String,
    /// Message text, possibly empty.
    #[serde(default)]
    pub body: String,
}

impl Message {
    pub fn new(timestamp: NaiveDateTime, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Calendar date of the message.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    /// Messages that survived row filtering.
    pub total_messages: u64,
    /// Distinct canonical senders.
    pub unique_participants: u64,
    /// Calendar days between the first and the last message.
    pub days_span: i64,
    /// Days with at least one message.
    pub active_days: u64,
    /// `total_messages / active_days`, one decimal, `0.0` when there are no active days.
    pub avg_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: u64,
}

/// Day-of-week bucket, Monday = 0 .. Sunday = 6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub day: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    /// `"YYYY-MM"`.
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub day: u32,
    pub hour: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Undirected relation between two canonical senders.
///
/// `source` always sorts before `target` so the same pair is never emitted twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEdge {
    pub source: String,
    pub target: String,
    pub value: u64,
}

/// The JSON document consumed by the dashboard pages.
///
/// Field names and shapes are the compatibility contract with the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedReport {
    /// UTC generation time, `YYYY-MM-DDTHH:MM:SSZ`.
    pub generated_at: String,
    pub stats: GlobalStats,
    /// Always 24 entries.
    pub hourly: Vec<HourCount>,
    /// Always 7 entries.
    pub daily: Vec<DayCount>,
    /// Only months with messages, oldest first.
    pub monthly: Vec<MonthCount>,
    /// Always 168 entries, day-major.
    pub heatmap: Vec<HeatmapCell>,
    pub contributors: Vec<Contributor>,
    pub wordfreq: Vec<WordCount>,
    pub interactions: Vec<InteractionEdge>,
}
