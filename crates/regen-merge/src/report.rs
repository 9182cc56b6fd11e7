//! Preserved-insertion reporting.
//!
//! After a successful merge the engine can tell the developer where their
//! hand-inserted lines survived the regeneration: runs of lines present in
//! the merged output but absent from the fresh generator output.

use std::fmt;

use similar::{ChangeTag, TextDiff};

use regen_content::{Document, RegionMarkers, strip};

/// A run of developer lines kept through a regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreservedInsertion {
    /// 1-based line number in the fresh generator output after which the
    /// run sits (0 for lines preserved at the very top).
    pub after_line: usize,
    /// Number of consecutive preserved lines.
    pub count: usize,
}

impl fmt::Display for PreservedInsertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} line{} been added and preserved after line {}",
            self.count,
            if self.count != 1 { "s have" } else { " has" },
            self.after_line
        )
    }
}

/// Locate runs of lines the merge kept that the fresh generation does not
/// contain. Regions are stripped from both sides first, so a growing region
/// interior does not show up as preserved insertions.
pub fn preserved_insertions(
    fresh: &Document,
    merged: &Document,
    markers: &dyn RegionMarkers,
) -> Vec<PreservedInsertion> {
    let fresh_text = newline_terminated(strip(fresh, markers).to_string());
    let merged_text = newline_terminated(strip(merged, markers).to_string());

    let diff = TextDiff::from_lines(&fresh_text, &merged_text);
    let mut runs = Vec::new();
    let mut fresh_line = 0usize;
    let mut current: Option<PreservedInsertion> = None;

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => {
                match &mut current {
                    Some(run) => run.count += 1,
                    None => {
                        current = Some(PreservedInsertion {
                            after_line: fresh_line,
                            count: 1,
                        });
                    }
                }
            }
            ChangeTag::Equal => {
                fresh_line += 1;
                if let Some(run) = current.take() {
                    runs.push(run);
                }
            }
            ChangeTag::Delete => {
                fresh_line += 1;
                if let Some(run) = current.take() {
                    runs.push(run);
                }
            }
        }
    }
    if let Some(run) = current.take() {
        runs.push(run);
    }
    runs
}

/// The line diff tokenizes on `'\n'`, so `"C"` and `"C\n"` would count as
/// different last lines. Terminating both sides keeps a trailing-newline
/// mismatch out of the run counts.
fn newline_terminated(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
