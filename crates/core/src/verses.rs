//! Verse segmentation and pagination for lyric text.
//!
//! A verse is a run of text between blank lines. Splitting is exact: the delimiter is two
//! consecutive `\n` characters, nothing is trimmed, and empty verses are kept. Joining the
//! segments back with the delimiter reproduces the input.

use crate::constants::VERSE_DELIMITER;

/// Splits lyric text into verses. Empty input yields a single empty verse.
pub fn segment(text: &str) -> Vec<&str> {
    text.split(VERSE_DELIMITER).collect()
}

/// Returns the verses in the window `[offset, offset + limit)`, clipped to the verse count.
///
/// An offset at or beyond the end yields an empty page.
pub fn page<'a>(verses: &[&'a str], offset: u64, limit: u64) -> Vec<&'a str> {
    let Ok(start) = usize::try_from(offset) else {
        return Vec::new();
    };
    if start >= verses.len() {
        return Vec::new();
    }

    let len = usize::try_from(limit).unwrap_or(usize::MAX);
    let end = start.saturating_add(len).min(verses.len());
    verses[start..end].to_vec()
}
