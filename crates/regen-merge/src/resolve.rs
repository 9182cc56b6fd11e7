//! The merge state machine.
//!
//! `resolve` sequences: sentinel check, anchor-integrity check, baseline
//! recovery, region stripping on both sides, the external three-way merge,
//! region reinjection, conflict classification, and footer re-stamping.

use tracing::debug;

use regen_content::{
    Document, FooterStyle, HashedDocument, ProtectedRegionMarkers, RegionMarkers, RegionTable,
    extract, reinject, stamp,
};

use crate::error::Result;
use crate::merge3::{DiffyMerge, ThreeWayMerge};
use crate::outcome::{MergeOutcome, MergeStatus};

/// Literal trailing line marking a file as awaiting manual conflict
/// resolution.
pub const CONFLICT_SENTINEL: &str = "conflicted";

/// Literal separator line the merge collaborator emits inside a conflict
/// chunk.
const CONFLICT_SEPARATOR: &str = "=======";

/// The regeneration-merge orchestrator.
///
/// Stateless across calls: each [`Merger::resolve`] works on two in-memory
/// text blobs and returns a fresh [`MergeOutcome`]. Per-target invocations
/// are safely parallelizable by the caller.
pub struct Merger {
    merge3: Box<dyn ThreeWayMerge>,
    markers: Box<dyn RegionMarkers>,
    default_style: FooterStyle,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

impl Merger {
    /// A merger with the `diffy` collaborator and the default protected
    /// region marker syntax.
    pub fn new() -> Self {
        Self {
            merge3: Box::new(DiffyMerge),
            markers: Box::new(ProtectedRegionMarkers),
            default_style: FooterStyle::Block,
        }
    }

    /// Swap in a different merge collaborator or marker syntax.
    pub fn with_parts(
        merge3: Box<dyn ThreeWayMerge>,
        markers: Box<dyn RegionMarkers>,
        default_style: FooterStyle,
    ) -> Self {
        Self {
            merge3,
            markers,
            default_style,
        }
    }

    /// Footer style used when the existing content carries no footer to
    /// recover one from.
    pub fn set_default_style(&mut self, style: FooterStyle) {
        self.default_style = style;
    }

    /// The region marker syntax this merger strips and reinjects with.
    pub fn markers(&self) -> &dyn RegionMarkers {
        self.markers.as_ref()
    }

    /// Classify `existing` content before any merge is attempted.
    ///
    /// A trailing `conflicted` sentinel line means the developer has
    /// hand-resolved a previous conflict: the sentinel is stripped and
    /// [`MergeStatus::ConflictsResolved`] returned. A broken anchor walk
    /// means a generator-owned line was modified or deleted:
    /// [`MergeStatus::OriginalWasModified`], and the caller must not write.
    /// Otherwise the content is ready to merge: [`MergeStatus::NotYetMerged`].
    pub fn check(&self, existing: &str) -> Result<MergeOutcome> {
        let doc = Document::from(existing);
        if doc.last_line() == Some(CONFLICT_SENTINEL) {
            let mut lines = doc.into_lines();
            lines.pop();
            let resolved = Document::from_lines(lines).to_string();
            return Ok(MergeOutcome::conflicts_resolved(resolved));
        }

        let hashed = HashedDocument::decode(existing, self.markers.as_ref())?;
        if !hashed.all_anchors_present(self.markers.as_ref()) {
            return Ok(MergeOutcome::original_was_modified());
        }

        Ok(MergeOutcome::not_yet_merged(existing))
    }

    /// Merge freshly generated content against the possibly-edited existing
    /// file.
    ///
    /// `existing` is the on-disk content (footer included); `new` is the
    /// regenerated content, stamped or not. Never returns
    /// [`MergeStatus::NotYetMerged`].
    pub fn resolve(&self, existing: &str, new: &str) -> Result<MergeOutcome> {
        let checked = self.check(existing)?;
        if checked.status() != MergeStatus::NotYetMerged {
            return Ok(checked);
        }

        let markers = self.markers.as_ref();
        let existing_doc = HashedDocument::decode(existing, markers)?;
        let new_doc = HashedDocument::decode(new, markers)?;
        let baseline = existing_doc.recover_original(markers);

        // Shared region table, new side first: for a key present on both
        // sides the existing file's capture wins, so developer edits inside
        // a region survive the regeneration.
        let mut regions = RegionTable::new();
        let ours = extract(new_doc.body(), markers, &mut regions);
        let theirs = extract(existing_doc.body(), markers, &mut regions);

        let merged_text = self.merge3.merge(
            &baseline.to_string(),
            &ours.to_string(),
            &theirs.to_string(),
        )?;
        let merged = reinject(&Document::from(merged_text.as_str()), &regions);

        let style = existing_doc.style().unwrap_or(self.default_style);
        if merged.lines().iter().any(|l| l == CONFLICT_SEPARATOR) {
            debug!(regions = regions.len(), "merge produced conflicts");
            let mut primary = stamp(existing_doc.body(), &baseline, style);
            primary.push(CONFLICT_SENTINEL);
            return Ok(MergeOutcome::conflicts_found(
                primary.to_string(),
                merged.to_string(),
            ));
        }

        debug!(regions = regions.len(), "merge succeeded");
        let stamped = stamp(&merged, &baseline, style);
        Ok(MergeOutcome::merged_successfully(stamped.to_string()))
    }
}
