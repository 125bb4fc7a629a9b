//! Selection bridge receiver
//!
//! The browser side of the bridge computes character offsets for a pointer
//! selection and reports them through a fire-and-forget callback request
//! carrying `selected_text`, `start`, and `end` as query parameters. This
//! module is the receiving side: it decodes that side channel into a typed
//! [`SelectionEvent`] and provides the character-offset arithmetic used to
//! check an event against the document it claims to describe.
//!
//! Malformed events are noise, not errors: any missing field, undecodable
//! text, or unparseable integer yields `None` and the event is dropped.

/// A decoded selection report from the browser snippet.
///
/// `start`/`end` are half-open character offsets into the document as
/// rendered; they are untrusted until checked with
/// [`matches_document`](Self::matches_document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl SelectionEvent {
    /// Decode a raw query string into a selection event.
    ///
    /// Expects `selected_text` (percent-encoded), `start`, and `end`.
    /// Returns `None` for anything malformed, for an empty selection, and
    /// for percent sequences that do not decode to UTF-8. Pairs with
    /// unknown keys are ignored; on repeated keys the first occurrence
    /// wins.
    pub fn from_query(query: &str) -> Option<Self> {
        let mut text = None;
        let mut start = None;
        let mut end = None;

        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "selected_text" if text.is_none() => {
                    text = Some(urlencoding::decode(value).ok()?.into_owned());
                }
                "start" if start.is_none() => {
                    start = Some(value.parse::<usize>().ok()?);
                }
                "end" if end.is_none() => {
                    end = Some(value.parse::<usize>().ok()?);
                }
                _ => {}
            }
        }

        let event = Self {
            text: text?,
            start: start?,
            end: end?,
        };
        if event.text.is_empty() {
            return None;
        }
        Some(event)
    }

    /// Whether the event's span actually selects its text out of `document`.
    ///
    /// A mismatch means the browser rendered something other than the
    /// current document (usually a selection raced with a document swap),
    /// so the event is stale and must be discarded.
    pub fn matches_document(&self, document: &str) -> bool {
        char_slice(document, self.start, self.end) == Some(self.text.as_str())
    }
}

/// Slice `text` by half-open character offsets.
///
/// Offsets count Unicode scalar values, not bytes. Returns `None` when
/// `start > end` or either offset is past the end of the text.
pub fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let from = byte_offset(text, start)?;
    let to = byte_offset(text, end)?;
    text.get(from..to)
}

/// Byte index of the character at position `char_pos`, where `char_pos`
/// may equal the character count (the end of the text).
fn byte_offset(text: &str, char_pos: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(char_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_slice_ascii() {
        let doc = "Order SKU123 shipped";
        assert_eq!(char_slice(doc, 6, 12), Some("SKU123"));
        assert_eq!(char_slice(doc, 0, 0), Some(""));
        assert_eq!(char_slice(doc, 0, doc.len()), Some(doc));
    }

    #[test]
    fn test_char_slice_counts_characters_not_bytes() {
        let doc = "naïve café order";
        assert_eq!(char_slice(doc, 0, 5), Some("naïve"));
        assert_eq!(char_slice(doc, 6, 10), Some("café"));
        assert_eq!(char_slice(doc, 11, 16), Some("order"));
    }

    #[test]
    fn test_char_slice_rejects_out_of_range() {
        let doc = "short";
        assert_eq!(char_slice(doc, 3, 2), None);
        assert_eq!(char_slice(doc, 0, 6), None);
        assert_eq!(char_slice(doc, 9, 9), None);
    }

    #[test]
    fn test_from_query_decodes_fields() {
        let event =
            SelectionEvent::from_query("selected_text=SKU%20123&start=6&end=13").unwrap();
        assert_eq!(event.text, "SKU 123");
        assert_eq!(event.start, 6);
        assert_eq!(event.end, 13);
    }

    #[test]
    fn test_from_query_first_occurrence_wins() {
        let event =
            SelectionEvent::from_query("selected_text=a&start=1&end=2&start=9").unwrap();
        assert_eq!(event.start, 1);
    }

    #[test]
    fn test_from_query_rejects_malformed() {
        // Missing fields
        assert_eq!(SelectionEvent::from_query(""), None);
        assert_eq!(SelectionEvent::from_query("selected_text=abc&start=1"), None);
        // Unparseable integers
        assert_eq!(
            SelectionEvent::from_query("selected_text=abc&start=x&end=3"),
            None
        );
        assert_eq!(
            SelectionEvent::from_query("selected_text=abc&start=1&end=-3"),
            None
        );
        // Empty selection
        assert_eq!(SelectionEvent::from_query("selected_text=&start=0&end=0"), None);
        // Invalid percent encoding
        assert_eq!(
            SelectionEvent::from_query("selected_text=%FF&start=0&end=1"),
            None
        );
    }

    #[test]
    fn test_matches_document() {
        let doc = "Order SKU123 shipped";
        let event = SelectionEvent {
            text: "SKU123".to_string(),
            start: 6,
            end: 12,
        };
        assert!(event.matches_document(doc));
        assert!(!event.matches_document("a different document"));

        let shifted = SelectionEvent { start: 7, end: 13, ..event };
        assert!(!shifted.matches_document(doc));
    }
}
