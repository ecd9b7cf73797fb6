//! Participant ranking.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::AnalyticsConfig;
use crate::store::RecordStore;

/// User-authored records sent by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    /// Participant name
    pub sender: String,
    /// Messages and media placeholders sent
    pub messages: usize,
}

/// A participant's share of all user-authored records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserShare {
    /// Participant name
    pub sender: String,
    /// Percentage, rounded to two decimals
    pub percent: f64,
}

/// Result of [`most_active_users`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserRanking {
    /// Every participant, most active first
    pub counts: Vec<UserCount>,
    /// The top participants with their percentage share
    pub shares: Vec<UserShare>,
}

impl UserRanking {
    /// Total number of user-authored records.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.messages).sum()
    }
}

/// Ranks participants by the number of user-authored records they sent.
///
/// This query always looks at the whole transcript. Ties keep the order in
/// which the participants first appear. `shares` covers the first
/// [`AnalyticsConfig::top_users`] entries of `counts`.
pub fn most_active_users(store: &RecordStore, config: &AnalyticsConfig) -> UserRanking {
    let mut counts: Vec<UserCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in store.iter().filter(|r| r.is_user_authored()) {
        let Some(sender) = record.sender_name() else {
            continue;
        };
        let position = *positions.entry(sender).or_insert_with(|| {
            counts.push(UserCount {
                sender: sender.to_string(),
                messages: 0,
            });
            counts.len() - 1
        });
        counts[position].messages += 1;
    }

    counts.sort_by(|a, b| b.messages.cmp(&a.messages));

    let total = counts.iter().map(|c| c.messages).sum::<usize>();
    let shares = counts
        .iter()
        .take(config.top_users)
        .map(|c| UserShare {
            sender: c.sender.clone(),
            percent: percentage(c.messages, total),
        })
        .collect();

    UserRanking { counts, shares }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = part as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}
