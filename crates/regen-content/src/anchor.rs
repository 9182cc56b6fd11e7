//! Anchor footer codec.
//!
//! Every file the engine writes ends with a three-line footer: a comment-open
//! line, the anchor string, and a comment-close line. The anchor string is
//! the flat concatenation of one fixed-width code per generated body line
//! (regions excluded), in document order. From that footer a later run can
//! tell generator-owned lines apart from developer insertions and rebuild the
//! last generated baseline.

use sha2::{Digest, Sha256};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::region::{RegionMarkers, strip};
use crate::style::FooterStyle;

/// Width of a single anchor code, in characters.
pub const CODE_WIDTH: usize = 4;

/// Compute the anchor code for one line: the first two bytes of the line's
/// SHA-256 digest, lower-hex.
pub fn anchor_code(line: &str) -> String {
    let digest = Sha256::digest(line.as_bytes());
    format!("{:02x}{:02x}", digest[0], digest[1])
}

/// Encode an anchor string over a sequence of lines.
pub fn encode_anchors(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.len() * CODE_WIDTH);
    for line in lines {
        out.push_str(&anchor_code(line));
    }
    out
}

/// True iff `content` ends in a recognizable footer: at least 3 lines, with
/// the last one starting with a known comment-close token.
pub fn has_footer(content: &str) -> bool {
    let doc = Document::from(content);
    doc.len() >= 3 && doc.last_line().is_some_and(|l| FooterStyle::detect(l).is_some())
}

/// Append a fresh three-line footer to `body`.
///
/// The anchor string is computed over `baseline_for_hash`, which must
/// already have its region interiors excluded (see [`strip`]) and is not
/// necessarily `body` itself: after a merge the footer is anchored on the
/// recovered baseline, so lines merged in from the new generation are only
/// covered from the next regeneration cycle onward.
pub fn stamp(body: &Document, baseline_for_hash: &Document, style: FooterStyle) -> Document {
    let mut out = body.clone();
    out.push(style.open());
    out.push(encode_anchors(baseline_for_hash.lines()));
    out.push(style.close());
    out
}

/// A document split into its body and anchor hashes.
///
/// Constructed fresh for each comparison and never mutated. `old_hash` is
/// the anchor string as read from disk; `new_hash` is recomputed from the
/// current body, regions stripped.
#[derive(Debug, Clone)]
pub struct HashedDocument {
    body: Document,
    old_hash: String,
    new_hash: String,
    style: Option<FooterStyle>,
}

impl HashedDocument {
    /// Decode `content` into body and anchor hashes.
    ///
    /// A document whose last line carries no recognized close token has no
    /// footer: the whole content is the body and `old_hash` is empty. This
    /// covers both first generation and freshly generated, not-yet-stamped
    /// input. A document that does end in a close token but has fewer than
    /// three lines, or an anchor string whose length is not a multiple of
    /// [`CODE_WIDTH`], fails with [`Error::MalformedFooter`].
    pub fn decode(content: &str, markers: &dyn RegionMarkers) -> Result<Self> {
        if content.is_empty() {
            return Ok(Self {
                body: Document::new(),
                old_hash: String::new(),
                new_hash: String::new(),
                style: None,
            });
        }

        let doc = Document::from(content);
        let style = doc.last_line().and_then(FooterStyle::detect);

        let (body, old_hash) = match style {
            None => (doc, String::new()),
            Some(_) => {
                if doc.len() < 3 {
                    return Err(Error::malformed(format!(
                        "footer close token present but only {} line(s)",
                        doc.len()
                    )));
                }
                let mut lines = doc.into_lines();
                lines.truncate(lines.len() - 1); // close marker
                let old_hash = lines.pop().unwrap_or_default();
                lines.truncate(lines.len() - 1); // open marker
                if old_hash.len() % CODE_WIDTH != 0 {
                    return Err(Error::malformed(format!(
                        "anchor string length {} is not a multiple of {CODE_WIDTH}",
                        old_hash.len()
                    )));
                }
                (Document::from_lines(lines), old_hash)
            }
        };

        let new_hash = encode_anchors(strip(&body, markers).lines());
        Ok(Self {
            body,
            old_hash,
            new_hash,
            style,
        })
    }

    /// The content minus its three-line footer.
    pub fn body(&self) -> &Document {
        &self.body
    }

    /// The anchor string read from the footer, empty if there was none.
    pub fn old_hash(&self) -> &str {
        &self.old_hash
    }

    /// The anchor string recomputed from the current body.
    pub fn new_hash(&self) -> &str {
        &self.new_hash
    }

    /// The comment style the footer was written in, if a footer was present.
    pub fn style(&self) -> Option<FooterStyle> {
        self.style
    }

    /// The decoded anchor codes, one per originally generated line.
    fn codes(&self) -> Vec<&str> {
        self.old_hash
            .as_bytes()
            .chunks(CODE_WIDTH)
            .map(|chunk| {
                // Length is validated to be a multiple of CODE_WIDTH at
                // decode time, and codes are hex, so this cannot split a
                // UTF-8 sequence.
                std::str::from_utf8(chunk).unwrap_or("")
            })
            .collect()
    }

    /// Rebuild the last generated baseline from the current body.
    ///
    /// Greedy forward alignment: walk the region-stripped body with cursor
    /// `l` and the anchor codes with cursor `h`; when the hash of line `l`
    /// matches code `h`, accept the line as original and advance both,
    /// otherwise treat the line as developer-inserted and advance `l` alone.
    /// A single linear scan with no backtracking: hash-code collisions
    /// resolve to the first candidate, which downstream merge semantics
    /// depend on.
    pub fn recover_original(&self, markers: &dyn RegionMarkers) -> Document {
        let clean = strip(&self.body, markers);
        let codes = self.codes();
        let mut original = Document::new();
        let mut h = 0;
        for line in clean.lines() {
            if h >= codes.len() {
                break;
            }
            if anchor_code(line) == codes[h] {
                original.push(line.clone());
                h += 1;
            }
        }
        original
    }

    /// True iff every anchor code is still matched, in order, by some line
    /// of the region-stripped body.
    ///
    /// This is the authoritative "did the developer modify or delete a
    /// generator-owned line" signal. Insertions are skipped unpenalized;
    /// modification, deletion, or reordering of an anchored line leaves its
    /// code unmatched.
    pub fn all_anchors_present(&self, markers: &dyn RegionMarkers) -> bool {
        let clean = strip(&self.body, markers);
        let codes = self.codes();
        let mut h = 0;
        for line in clean.lines() {
            if h >= codes.len() {
                break;
            }
            if anchor_code(line) == codes[h] {
                h += 1;
            }
        }
        h == codes.len()
    }
}
