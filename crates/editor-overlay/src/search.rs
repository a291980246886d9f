//! Document search.
//!
//! Scans the text leaves of a document in document order and reports match spans in
//! **document positions**. Within a leaf, offsets are counted in characters (not bytes) and
//! added to the leaf's start position. Matches never span leaf boundaries.
//!
//! The default [`SearchOptions`] perform case-insensitive literal search. After each hit the
//! cursor advances to the end of the hit, so a term overlapping itself is reported once per
//! non-overlapping occurrence (`"aa"` in `"aaaa"` yields two spans, not three).

use regex::{Regex, RegexBuilder};

use crate::error::SearchError;
use crate::host::DocumentTree;

/// Options that control how search is performed.
///
/// The default is a case-insensitive literal search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (alphanumeric and `_`).
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub regex: bool,
}

/// A half-open range (`[start, end)`) with `start < end`.
///
/// [`find_all`] returns spans in character offsets within a string; [`match_document`]
/// returns spans in document positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchSpan {
    /// Inclusive start.
    pub start: usize,
    /// Exclusive end.
    pub end: usize,
}

impl MatchSpan {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Shift the span by `offset`.
    pub fn offset_by(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }

    pub(crate) fn char_at(&self, text: &str, char_offset: usize) -> Option<char> {
        if char_offset >= self.char_count() {
            return None;
        }
        let start = self.char_to_byte[char_offset];
        let end = self.char_to_byte[char_offset + 1];
        text.get(start..end)?.chars().next()
    }
}

/// A compiled query, reusable across leaves.
#[derive(Debug, Clone)]
pub struct Matcher {
    re: Regex,
    whole_word: bool,
}

impl Matcher {
    /// Compile `query`. Returns `Ok(None)` for an empty query.
    pub fn new(query: &str, options: SearchOptions) -> Result<Option<Self>, SearchError> {
        if query.is_empty() {
            return Ok(None);
        }

        let pattern = if options.regex {
            query.to_string()
        } else {
            regex::escape(query)
        };

        // Unicode simple case folding: `ſ` matches `s` and the Kelvin sign matches `k`.
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(!options.case_sensitive)
            .multi_line(true)
            .build()?;

        Ok(Some(Self {
            re,
            whole_word: options.whole_word,
        }))
    }

    /// All non-overlapping matches in `text`, in character offsets.
    pub fn find_in(&self, text: &str) -> Vec<MatchSpan> {
        let index = CharIndex::new(text);
        let mut matches = Vec::new();

        for m in self.re.find_iter(text) {
            let candidate = MatchSpan {
                start: index.byte_to_char(m.start()),
                end: index.byte_to_char(m.end()),
            };

            if candidate.is_empty() {
                continue;
            }
            if self.whole_word && !is_whole_word(text, &index, candidate) {
                continue;
            }

            matches.push(candidate);
        }

        matches
    }
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_whole_word(text: &str, index: &CharIndex, m: MatchSpan) -> bool {
    if m.is_empty() {
        return false;
    }

    let before = if m.start == 0 {
        None
    } else {
        index.char_at(text, m.start.saturating_sub(1))
    };
    let after = index.char_at(text, m.end);

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Find all occurrences of `query` in `text`.
///
/// - Returns an empty list if `query` is empty.
/// - Match ranges are character offsets and are half-open (`[start, end)`).
pub fn find_all(
    text: &str,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<MatchSpan>, SearchError> {
    Ok(Matcher::new(query, options)?
        .map(|matcher| matcher.find_in(text))
        .unwrap_or_default())
}

/// Match `term` against every text leaf of `doc` with default (case-insensitive, literal)
/// options.
///
/// An empty term yields an empty list.
pub fn match_document(doc: &dyn DocumentTree, term: &str) -> Vec<MatchSpan> {
    let Some(matcher) = Matcher::new(term, SearchOptions::default())
        .ok()
        .flatten()
    else {
        return Vec::new();
    };
    scan(doc, &matcher)
}

/// Match `query` against every text leaf of `doc` with explicit options.
pub fn match_document_with(
    doc: &dyn DocumentTree,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<MatchSpan>, SearchError> {
    Ok(Matcher::new(query, options)?
        .map(|matcher| scan(doc, &matcher))
        .unwrap_or_default())
}

fn scan(doc: &dyn DocumentTree, matcher: &Matcher) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    doc.descendants(&mut |node| {
        if node.is_text() && !node.text.is_empty() {
            spans.extend(
                matcher
                    .find_in(node.text)
                    .into_iter()
                    .map(|span| span.offset_by(node.position)),
            );
        }
    });
    spans
}
