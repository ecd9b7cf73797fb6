//! Classification of the text following a timestamp.

use std::sync::OnceLock;

use regex::Regex;

/// What follows the timestamp prefix of a logical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// `<sender>: <body>`
    User {
        /// Trimmed sender name
        sender: &'a str,
        /// Body as written (may span several lines)
        body: &'a str,
    },
    /// Anything without a sender separator
    System {
        /// The notification text, verbatim
        text: &'a str,
    },
}

fn sender_separator() -> &'static Regex {
    static SENDER_RE: OnceLock<Regex> = OnceLock::new();
    SENDER_RE.get_or_init(|| {
        Regex::new(r"^(?P<sender>[^:\n]+?):(?:[ \t\r\n\x{00A0}]|$)(?P<body>(?s:.*))")
            .expect("valid sender separator regex")
    })
}

/// Splits the remainder of a logical unit into sender and body.
///
/// # Example
///
/// ```rust
/// use chatstat::parsing::{Entry, classify_entry};
///
/// assert_eq!(
///     classify_entry("Alice: Hello: again"),
///     Entry::User { sender: "Alice", body: "Hello: again" }
/// );
/// assert_eq!(
///     classify_entry("Alice added Bob"),
///     Entry::System { text: "Alice added Bob" }
/// );
/// ```
pub fn classify_entry(rest: &str) -> Entry<'_> {
    if let Some(caps) = sender_separator().captures(rest) {
        let sender = caps.name("sender").map_or("", |m| m.as_str().trim());
        if !sender.is_empty() {
            let body = caps.name("body").map_or("", |m| m.as_str());
            return Entry::User { sender, body };
        }
    }
    Entry::System { text: rest }
}
