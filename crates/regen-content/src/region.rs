//! Protected region extraction and reinjection.
//!
//! A protected region is a marker-delimited block whose interior belongs to
//! the developer. Regions are opaque to both hashing and merging: only the
//! start-marker line stays visible to those passes, while the interior (end
//! marker included) is parked in a side table and spliced back afterwards.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::document::Document;

/// Captured region interiors, keyed by the literal start-marker line.
///
/// Start-marker lines are assumed unique within a document. If two regions
/// share an identical start line the later extraction overwrites the earlier
/// capture; extension of the key with an occurrence index is a known possible
/// fix that has deliberately not been applied.
pub type RegionTable = BTreeMap<String, Vec<String>>;

/// Recognizes the marker lines that delimit a protected region.
///
/// The marker syntax is owned by the implementation; the merge engine only
/// consumes the boolean verdicts.
pub trait RegionMarkers: Send + Sync {
    fn is_start(&self, line: &str) -> bool;
    fn is_end(&self, line: &str) -> bool;
}

static START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"protected region [A-Za-z0-9_.:-]+ (?:on|off) begin")
        .expect("Invalid region start regex")
});

static END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"protected region [A-Za-z0-9_.:-]+ end").expect("Invalid region end regex")
});

/// Default marker syntax: `protected region <id> on begin` ... `protected
/// region <id> end`, anywhere inside a comment line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtectedRegionMarkers;

impl RegionMarkers for ProtectedRegionMarkers {
    fn is_start(&self, line: &str) -> bool {
        START_RE.is_match(line)
    }

    fn is_end(&self, line: &str) -> bool {
        END_RE.is_match(line)
    }
}

/// Strip region interiors from `body`, capturing them into `table`.
///
/// The start-marker line is kept in the returned document and opens a
/// capture; every following line up to and including the end-marker line is
/// routed into the table instead of the output.
pub fn extract(body: &Document, markers: &dyn RegionMarkers, table: &mut RegionTable) -> Document {
    let mut stripped = Document::new();
    let mut in_region: Option<String> = None;

    for line in body.lines() {
        if let Some(key) = &in_region {
            if let Some(captured) = table.get_mut(key) {
                captured.push(line.clone());
            }
            if markers.is_end(line) {
                in_region = None;
            }
            continue;
        }
        if markers.is_start(line) {
            table.insert(line.clone(), Vec::new());
            in_region = Some(line.clone());
        }
        stripped.push(line.clone());
    }

    stripped
}

/// Strip region interiors without keeping them.
pub fn strip(body: &Document, markers: &dyn RegionMarkers) -> Document {
    let mut scratch = RegionTable::new();
    extract(body, markers, &mut scratch)
}

/// Splice captured region interiors back into a merged body.
///
/// After emitting any line that exactly equals a table key, that key's
/// captured lines follow in their original order.
pub fn reinject(merged: &Document, table: &RegionTable) -> Document {
    let mut out = Document::new();
    for line in merged.lines() {
        out.push(line.clone());
        if let Some(captured) = table.get(line) {
            for inner in captured {
                out.push(inner.clone());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const START: &str = "// protected region init on begin";
    const END: &str = "// protected region init end";

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn extract_keeps_start_line_and_captures_interior() {
        let body = doc(&["a", START, "inner 1", "inner 2", END, "b"]);
        let mut table = RegionTable::new();
        let stripped = extract(&body, &ProtectedRegionMarkers, &mut table);

        assert_eq!(stripped, doc(&["a", START, "b"]));
        assert_eq!(
            table.get(START).unwrap(),
            &["inner 1".to_string(), "inner 2".to_string(), END.to_string()]
        );
    }

    #[test]
    fn extract_passes_through_unmarked_content() {
        let body = doc(&["x", "y"]);
        let mut table = RegionTable::new();
        let stripped = extract(&body, &ProtectedRegionMarkers, &mut table);
        assert_eq!(stripped, body);
        assert!(table.is_empty());
    }

    #[test]
    fn reinject_restores_interior_after_marker() {
        let body = doc(&["a", START, "inner", END, "b"]);
        let mut table = RegionTable::new();
        let stripped = extract(&body, &ProtectedRegionMarkers, &mut table);
        let restored = reinject(&stripped, &table);
        assert_eq!(restored, body);
    }

    #[test]
    fn duplicate_start_line_overwrites_earlier_capture() {
        let body = doc(&[START, "first", END, START, "second", END]);
        let mut table = RegionTable::new();
        extract(&body, &ProtectedRegionMarkers, &mut table);
        assert_eq!(
            table.get(START).unwrap(),
            &["second".to_string(), END.to_string()]
        );
    }

    #[test]
    fn unterminated_region_captures_to_end() {
        let body = doc(&["a", START, "inner"]);
        let mut table = RegionTable::new();
        let stripped = extract(&body, &ProtectedRegionMarkers, &mut table);
        assert_eq!(stripped, doc(&["a", START]));
        assert_eq!(table.get(START).unwrap(), &["inner".to_string()]);
    }
}
