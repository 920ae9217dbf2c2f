//! Summary statistics over the decision history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::history::log::HistoryLog;

/// How often an item has been picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCount {
    pub item: String,
    pub count: usize,
}

/// Aggregate figures for a history log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of decisions in the log.
    pub total_decisions: usize,

    /// Mean number of items per decided list, `None` for an empty log.
    pub average_list_size: Option<f64>,

    /// Picked items ordered by count (descending). Ties go to the item picked
    /// most recently.
    pub most_picked: Vec<ItemCount>,

    /// Decisions made on a list that had a title.
    pub titled_lists: usize,

    /// Timestamp of the oldest decision in the log.
    pub first_decision: Option<DateTime<Utc>>,

    /// Timestamp of the newest decision in the log.
    pub last_decision: Option<DateTime<Utc>>,
}

impl Statistics {
    /// Computes statistics for `log`.
    #[must_use]
    pub fn from_history(log: &HistoryLog) -> Self {
        let total_decisions = log.len();

        let average_list_size = (total_decisions > 0).then(|| {
            let sum: usize = log.iter().map(|d| d.total_items).sum();
            sum as f64 / total_decisions as f64
        });

        // Walk newest to oldest so first-seen order is recency order.
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for decision in log {
            let item = decision.selected_item.as_str();
            let count = counts.entry(item).or_insert(0);
            if *count == 0 {
                order.push(item);
            }
            *count += 1;
        }

        let mut most_picked: Vec<ItemCount> = order
            .into_iter()
            .map(|item| ItemCount {
                item: item.to_string(),
                count: counts[item],
            })
            .collect();
        // Stable sort keeps recency order among equal counts.
        most_picked.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total_decisions,
            average_list_size,
            most_picked,
            titled_lists: log.iter().filter(|d| d.title.is_some()).count(),
            first_decision: log.iter().last().map(|d| d.timestamp),
            last_decision: log.latest().map(|d| d.timestamp),
        }
    }

    /// The single most picked item, if any.
    #[must_use]
    pub fn favourite(&self) -> Option<&ItemCount> {
        self.most_picked.first()
    }
}
