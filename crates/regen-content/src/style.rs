//! Footer comment styles

/// Comment syntax used to wrap the anchor footer.
///
/// Footer detection keys solely off the file's last line starting with a
/// recognized close token, so adding a comment syntax here is the single
/// extension point for new target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FooterStyle {
    /// C-family block comment: `/*` ... `*/`
    Block,
    /// Markup comment: `<!--` ... `-->`
    Html,
}

impl FooterStyle {
    /// The comment-open marker line.
    pub fn open(&self) -> &'static str {
        match self {
            Self::Block => "/*",
            Self::Html => "<!--",
        }
    }

    /// The comment-close marker line.
    pub fn close(&self) -> &'static str {
        match self {
            Self::Block => "*/",
            Self::Html => "-->",
        }
    }

    /// Pick a style from a target file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "html" | "xhtml" | "xml" | "svg" | "md" | "markdown" => Self::Html,
            _ => Self::Block,
        }
    }

    /// Recognize a footer close token at the start of `last_line`.
    pub fn detect(last_line: &str) -> Option<Self> {
        if last_line.starts_with("*/") {
            Some(Self::Block)
        } else if last_line.starts_with("-->") {
            Some(Self::Html)
        } else {
            None
        }
    }
}
