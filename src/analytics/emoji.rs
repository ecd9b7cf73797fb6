//! Emoji usage.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::record::MessageKind;
use crate::store::{RecordStore, Selector};

/// An emoji and how often it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    /// The emoji code point
    pub emoji: String,
    /// Occurrences
    pub count: usize,
}

fn emoji_regex() -> &'static Regex {
    static EMOJI_RE: OnceLock<Regex> = OnceLock::new();
    EMOJI_RE.get_or_init(|| {
        Regex::new(r"[\p{Extended_Pictographic}\x{1F1E6}-\x{1F1FF}]").expect("valid emoji regex")
    })
}

/// Emoji code points in `text`, in order of appearance.
///
/// Pictographs and regional indicator letters count; skin-tone modifiers,
/// joiners and variation selectors do not.
///
/// ```rust
/// use chatstat::analytics::extract_emoji;
///
/// assert_eq!(extract_emoji("ok 👍🏽 🎉🎉"), vec!["👍", "🎉", "🎉"]);
/// ```
pub fn extract_emoji(text: &str) -> Vec<&str> {
    emoji_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Emoji frequencies in the selection's text messages, most used first.
/// Ties keep the order of first appearance.
pub fn emoji_frequencies(store: &RecordStore, selector: &Selector) -> Vec<EmojiCount> {
    let mut ranking: Vec<EmojiCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in store
        .filter(selector)
        .filter(|r| r.kind() == MessageKind::UserMessage)
    {
        for emoji in extract_emoji(record.body()) {
            let position = *positions.entry(emoji).or_insert_with(|| {
                ranking.push(EmojiCount {
                    emoji: emoji.to_string(),
                    count: 0,
                });
                ranking.len() - 1
            });
            ranking[position].count += 1;
        }
    }

    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}
