//! Line-oriented document type

use std::fmt;

/// An ordered sequence of text lines.
///
/// Splitting is on `'\n'` only and preserves trailing empty lines
/// (`"a\n"` becomes `["a", ""]`), so a round trip through
/// [`Document::from`] and [`Document::to_string`] reproduces the input
/// byte for byte. Equality is line-by-line and order-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Create an empty document (zero lines, renders as `""`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing line sequence.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// The lines of this document, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the document, yielding its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if the document has no lines at all.
    ///
    /// Note that `Document::from("")` has one (empty) line; only a document
    /// built from no lines is empty in this sense.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// The last line, if any.
    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}
