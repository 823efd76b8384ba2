//! Markup stripping char filter.
//!
//! Removes `<...>` regions from a document with a three-state scanner:
//!
//! ```text
//!            '<'                 ' or "
//! Outside ───────▶ InsideTag ─────────────▶ InsideQuote(q)
//!    ▲                 │   ◀─────────────        │
//!    └──────'>'────────┘    matching q           │
//! ```
//!
//! A quote character preceded by a backslash does not change state. A `<`
//! seen while already inside a tag restarts the tag at the new position, so
//! a stray `<` in running text never swallows what precedes the real tag.
//! A tag that is still open when the input ends is not well-formed and is
//! kept verbatim.

use super::CharFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InsideTag { start: usize },
    InsideQuote { start: usize, quote: char },
}

/// A char filter that removes markup tags while keeping the text between them.
#[derive(Clone, Debug, Default)]
pub struct MarkupStripCharFilter;

impl MarkupStripCharFilter {
    /// Create a new markup strip filter.
    pub fn new() -> Self {
        MarkupStripCharFilter
    }

    /// Byte ranges `[start, end)` of every well-formed tag in `input`, in order.
    pub fn tag_spans(input: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut state = ScanState::Outside;
        let mut previous: Option<char> = None;

        for (i, c) in input.char_indices() {
            // Position 0 has no predecessor and is never escaped.
            let escaped = previous == Some('\\');

            state = match state {
                ScanState::Outside if c == '<' => ScanState::InsideTag { start: i },
                ScanState::Outside => ScanState::Outside,
                ScanState::InsideTag { .. } if c == '<' => ScanState::InsideTag { start: i },
                ScanState::InsideTag { start } if c == '>' => {
                    spans.push((start, i + c.len_utf8()));
                    ScanState::Outside
                }
                ScanState::InsideTag { start } if (c == '\'' || c == '"') && !escaped => {
                    ScanState::InsideQuote { start, quote: c }
                }
                ScanState::InsideTag { start } => ScanState::InsideTag { start },
                ScanState::InsideQuote { start, quote } if c == quote && !escaped => {
                    ScanState::InsideTag { start }
                }
                ScanState::InsideQuote { start, quote } => ScanState::InsideQuote { start, quote },
            };

            previous = Some(c);
        }

        spans
    }
}

impl CharFilter for MarkupStripCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut last_end = 0;

        for (start, end) in Self::tag_spans(input) {
            output.push_str(&input[last_end..start]);
            last_end = end;
        }

        output.push_str(&input[last_end..]);
        output
    }

    fn name(&self) -> &'static str {
        "markup_strip"
    }
}
