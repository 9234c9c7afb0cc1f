//! Who-talks-to-whom edges for the social graph.
//!
//! Two consecutive messages from different senders count as one interaction
//! when the second follows the first within the window. Distance is measured
//! in elapsed time, never in message positions.

use std::collections::HashMap;

use chrono::Duration;
use stats_core::models::{InteractionEdge, Message};
use tracing::debug;

/// Parameters for [`InteractionExtractor`].
#[derive(Debug, Clone, Copy)]
pub struct InteractionExtractor {
    /// Maximum gap (inclusive) between two consecutive messages.
    window: Duration,
    /// Edges lighter than this are dropped after the pass.
    min_weight: u64,
}

impl Default for InteractionExtractor {
    fn default() -> Self {
        Self::new(Duration::minutes(5), 3)
    }
}

impl InteractionExtractor {
    pub fn new(window: Duration, min_weight: u64) -> Self {
        Self { window, min_weight }
    }

    /// Walk `messages` (sorted by timestamp) and return the retained edges.
    ///
    /// Sorted by weight descending, then source, then target.
    pub fn extract(&self, messages: &[Message]) -> Vec<InteractionEdge> {
        let mut weights: HashMap<(&str, &str), u64> = HashMap::new();

        for pair in messages.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.sender == next.sender {
                continue;
            }
            let gap = next.timestamp - prev.timestamp;
            if gap < Duration::zero() || gap > self.window {
                continue;
            }
            *weights
                .entry(pair_key(&prev.sender, &next.sender))
                .or_default() += 1;
        }

        let candidates = weights.len();
        let mut edges: Vec<InteractionEdge> = weights
            .into_iter()
            .filter(|(_, weight)| *weight >= self.min_weight)
            .map(|((source, target), value)| InteractionEdge {
                source: source.to_string(),
                target: target.to_string(),
                value,
            })
            .collect();

        edges.sort_by(|a, b| {
            b.value
                .cmp(&a.value)
                .then_with(|| a.source.cmp(&b.source))
                .then_with(|| a.target.cmp(&b.target))
        });

        debug!(
            "Interaction pairs: {} seen, {} kept (min weight {})",
            candidates,
            edges.len(),
            self.min_weight
        );

        edges
    }
}

/// Order-independent key for an unordered sender pair.
fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
