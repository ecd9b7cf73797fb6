//! Word frequency ranking.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{AnalyticsConfig, StopWords};
use crate::record::{MEDIA_OMITTED, MessageKind};
use crate::store::{RecordStore, Selector};

/// A word and how often it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    /// Lowercase word without punctuation
    pub token: String,
    /// Occurrences
    pub count: usize,
}

fn punctuation() -> &'static Regex {
    static PUNCT_RE: OnceLock<Regex> = OnceLock::new();
    PUNCT_RE.get_or_init(|| Regex::new(r"\p{P}+").expect("valid punctuation regex"))
}

/// Splits a message body into ranked tokens.
///
/// The media sentinel is removed, the text lowercased and split on
/// whitespace, and Unicode punctuation stripped from each piece. Empty
/// pieces and stop words are skipped.
///
/// ```rust
/// use chatstat::analytics::tokenize;
/// use chatstat::config::StopWords;
///
/// let stop = StopWords::from_text("the");
/// let tokens = tokenize("The cat's hat, the END!", &stop);
/// assert_eq!(tokens, vec!["cats", "hat", "end"]);
/// ```
pub fn tokenize(body: &str, stop_words: &StopWords) -> Vec<String> {
    body.replace(MEDIA_OMITTED, " ")
        .to_lowercase()
        .split_whitespace()
        .map(|piece| punctuation().replace_all(piece, "").into_owned())
        .filter(|token| !token.is_empty() && !stop_words.contains(token))
        .collect()
}

/// Most frequent words in the selection's text messages.
///
/// Sorted by count, descending; ties are broken alphabetically. The list is
/// cut to [`AnalyticsConfig::top_words`] entries unless that is `0`.
pub fn common_words(
    store: &RecordStore,
    selector: &Selector,
    config: &AnalyticsConfig,
) -> Vec<TokenCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in store
        .filter(selector)
        .filter(|r| r.kind() == MessageKind::UserMessage)
    {
        for token in tokenize(record.body(), &config.stop_words) {
            *counts.entry(token).or_default() += 1;
        }
    }

    let mut ranking: Vec<TokenCount> = counts
        .into_iter()
        .map(|(token, count)| TokenCount { token, count })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));

    if config.top_words > 0 {
        ranking.truncate(config.top_words);
    }
    ranking
}
