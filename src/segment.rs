//! Line segmenter: splits a raw transcript into logical units.
//!
//! A physical line that starts with a timestamp opens a new unit; every other
//! line belongs to the unit above it, so multi-line messages stay together.
//! Lines before the first timestamp (export banners and the like) are
//! skipped.
//!
//! ```rust
//! use chatstat::segment::Segments;
//!
//! let text = "Exported chat\n1/2/23, 10:00 AM - Alice: shopping list:\nmilk\neggs\n1/2/23, 10:01 AM - Bob: ok\n";
//! let units: Vec<&str> = Segments::new(text).collect();
//!
//! assert_eq!(units, vec![
//!     "1/2/23, 10:00 AM - Alice: shopping list:\nmilk\neggs",
//!     "1/2/23, 10:01 AM - Bob: ok",
//! ]);
//! ```

use std::iter::FusedIterator;

use regex::Regex;

use crate::parsing::timestamp_head;

/// Iterator over the logical units of a transcript.
///
/// Units are slices of the input with trailing line breaks removed. The
/// iterator is cheap to [`Clone`], which restarts it from the clone point.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
    head: &'a Regex,
}

impl<'a> Segments<'a> {
    /// Segments `text` using the timestamp prefixes of every known family.
    pub fn new(text: &'a str) -> Self {
        Self::with_head(text, timestamp_head())
    }

    /// Segments `text` using a custom unit-start pattern.
    pub fn with_head(text: &'a str, head: &'a Regex) -> Self {
        Self { text, pos: 0, head }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let mut start = None;
        let mut offset = self.pos;

        for line in self.text[self.pos..].split_inclusive('\n') {
            if self.head.is_match(line) {
                if start.is_some() {
                    break;
                }
                start = Some(offset);
            }
            offset += line.len();
        }

        self.pos = offset;
        let start = start?;
        Some(self.text[start..offset].trim_end_matches(['\r', '\n']))
    }
}

impl FusedIterator for Segments<'_> {}
