//! Message, word, media and link counts.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::store::{RecordStore, Selector};

/// Headline numbers for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BasicCounts {
    /// Records in the selection
    pub messages: usize,
    /// Whitespace-separated tokens across all bodies
    pub words: usize,
    /// Media placeholders
    pub media: usize,
    /// URL-like substrings
    pub links: usize,
}

fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| {
        Regex::new(r#"(?i:https?://|www\.)[^\s<>"',\)\]\}]+"#).expect("valid URL regex")
    })
}

/// Number of URL-like substrings (`http://`, `https://` or `www.` prefixed)
/// in `text`.
///
/// Bare domains such as `example.com` are not counted: without a scheme or
/// `www.` they can't be told apart from file names or a missing space after
/// a full stop. A comma ends a URL, so comma-joined links count separately.
///
/// ```rust
/// use chatstat::analytics::count_links;
///
/// assert_eq!(count_links("check http://example.com now"), 1);
/// assert_eq!(count_links("www.a.org and https://b.io/x?y=1"), 2);
/// assert_eq!(count_links("no links here"), 0);
/// ```
pub fn count_links(text: &str) -> usize {
    url_regex().find_iter(text).count()
}

/// Counts messages, words, media placeholders and links in the selection.
pub fn basic_counts(store: &RecordStore, selector: &Selector) -> BasicCounts {
    store
        .filter(selector)
        .fold(BasicCounts::default(), |mut counts, record| {
            counts.messages += 1;
            counts.words += record.body().split_whitespace().count();
            counts.links += count_links(record.body());
            if record.is_media() {
                counts.media += 1;
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MessageRecord;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(10, min, 0)
            .unwrap()
    }

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            MessageRecord::user(at(0), "Alice", "Hello there"),
            MessageRecord::user(at(1), "Bob", "see https://example.com and www.rust-lang.org"),
            MessageRecord::user(at(2), "Alice", "<Media omitted>"),
            MessageRecord::system(at(3), "Alice added Carol"),
        ])
    }

    #[test]
    fn test_overall_counts() {
        let counts = basic_counts(&store(), &Selector::Overall);
        assert_eq!(
            counts,
            BasicCounts {
                messages: 4,
                words: 2 + 4 + 2 + 3,
                media: 1,
                links: 2,
            }
        );
    }

    #[test]
    fn test_sender_counts() {
        let alice = basic_counts(&store(), &Selector::sender("Alice"));
        assert_eq!(alice.messages, 2);
        assert_eq!(alice.media, 1);
        assert_eq!(alice.links, 0);

        let nobody = basic_counts(&store(), &Selector::sender("Nobody"));
        assert_eq!(nobody, BasicCounts::default());
    }

    #[test]
    fn test_empty_store() {
        assert_eq!(
            basic_counts(&RecordStore::empty(), &Selector::Overall),
            BasicCounts::default()
        );
    }

    #[test]
    fn test_link_boundaries() {
        assert_eq!(count_links("(see https://example.com/a)"), 1);
        assert_eq!(count_links("HTTPS://EXAMPLE.COM"), 1);
        assert_eq!(count_links("http://www.example.com"), 1);
        assert_eq!(count_links("https://a.com https://a.com"), 2);
        assert_eq!(count_links("wwwhat"), 0);
    }

    #[test]
    fn test_comma_separated_links() {
        assert_eq!(count_links("http://a.com,http://b.com"), 2);
        assert_eq!(count_links("www.a.org, www.b.org"), 2);
    }

    #[test]
    fn test_bare_domains_not_counted() {
        assert_eq!(count_links("visit example.com"), 0);
        assert_eq!(count_links("open notes.txt.Then reply"), 0);
    }
}
