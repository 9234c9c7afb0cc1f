//! Message counts over time buckets and participants.
//!
//! Every view is a pure function of the (already normalised) message slice,
//! so each one can be tested and reasoned about on its own.

use std::collections::{BTreeMap, HashMap, HashSet};

use stats_core::models::{
    Contributor, DayCount, GlobalStats, HeatmapCell, HourCount, Message, MonthCount,
};
use stats_core::time_utils::{hour_of_day, month_key, weekday_index};

const HOURS: u32 = 24;
const WEEKDAYS: u32 = 7;

// ── MessageAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that derives the report's count views.
pub struct MessageAggregator;

impl MessageAggregator {
    /// Headline numbers. Safe on an empty slice: everything is zero.
    pub fn global_stats(messages: &[Message]) -> GlobalStats {
        let total = messages.len() as u64;

        let participants: HashSet<&str> = messages.iter().map(|m| m.sender.as_str()).collect();
        let active: HashSet<_> = messages.iter().map(Message::date).collect();

        let first = messages.iter().map(Message::date).min();
        let last = messages.iter().map(Message::date).max();
        let days_span = match (first, last) {
            (Some(first), Some(last)) => (last - first).num_days(),
            _ => 0,
        };

        let active_days = active.len() as u64;
        let avg_per_day = if active_days == 0 {
            0.0
        } else {
            round_one_decimal(total as f64 / active_days as f64)
        };

        GlobalStats {
            total_messages: total,
            unique_participants: participants.len() as u64,
            days_span,
            active_days,
            avg_per_day,
        }
    }

    /// 24 buckets, one per hour of day, zero buckets included.
    pub fn hourly(messages: &[Message]) -> Vec<HourCount> {
        let mut counts = [0u64; HOURS as usize];
        for msg in messages {
            counts[hour_of_day(&msg.timestamp) as usize] += 1;
        }
        (0..HOURS)
            .map(|hour| HourCount {
                hour,
                count: counts[hour as usize],
            })
            .collect()
    }

    /// 7 buckets, Monday = 0 .. Sunday = 6, zero buckets included.
    pub fn daily(messages: &[Message]) -> Vec<DayCount> {
        let mut counts = [0u64; WEEKDAYS as usize];
        for msg in messages {
            counts[weekday_index(&msg.timestamp) as usize] += 1;
        }
        (0..WEEKDAYS)
            .map(|day| DayCount {
                day,
                count: counts[day as usize],
            })
            .collect()
    }

    /// One entry per `"YYYY-MM"` that has messages, oldest first.
    pub fn monthly(messages: &[Message]) -> Vec<MonthCount> {
        Self::count_by_key(messages, |m| month_key(m.date()))
            .into_iter()
            .map(|(month, count)| MonthCount { month, count })
            .collect()
    }

    /// Dense day × hour grid: all 168 cells, Monday 00h first, zeros included.
    pub fn heatmap(messages: &[Message]) -> Vec<HeatmapCell> {
        let mut grid = [[0u64; HOURS as usize]; WEEKDAYS as usize];
        for msg in messages {
            let day = weekday_index(&msg.timestamp) as usize;
            let hour = hour_of_day(&msg.timestamp) as usize;
            grid[day][hour] += 1;
        }

        (0..WEEKDAYS)
            .flat_map(|day| (0..HOURS).map(move |hour| (day, hour)))
            .map(|(day, hour)| HeatmapCell {
                day,
                hour,
                count: grid[day as usize][hour as usize],
            })
            .collect()
    }

    /// Messages per sender, most active first; ties by name ascending.
    pub fn contributors(messages: &[Message]) -> Vec<Contributor> {
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for msg in messages {
            *counts.entry(msg.sender.as_str()).or_default() += 1;
        }

        let mut ranked: Vec<Contributor> = counts
            .into_iter()
            .map(|(name, count)| Contributor {
                name: name.to_string(),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        ranked
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Count messages per string key, returned in key order.
    fn count_by_key(
        messages: &[Message],
        key_fn: impl Fn(&Message) -> String,
    ) -> BTreeMap<String, u64> {
        let mut map: BTreeMap<String, u64> = BTreeMap::new();
        for msg in messages {
            *map.entry(key_fn(msg)).or_default() += 1;
        }
        map
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
