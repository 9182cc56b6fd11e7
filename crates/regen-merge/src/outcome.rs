//! Merge status and outcome record

/// Terminal status of one merge attempt.
///
/// Exactly one status is produced per attempt. `NotYetMerged` is the
/// transient marker between the integrity check and the merge proper; it is
/// never the final outcome of [`crate::Merger::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeStatus {
    NotYetMerged,
    OriginalWasModified,
    ConflictsResolved,
    ConflictsFound,
    MergedSuccessfully,
}

/// Immutable outcome of a merge attempt.
///
/// `new_contents` is the content to persist when the status calls for a
/// write; `conflict_contents` carries the raw merge output with its markers
/// only for [`MergeStatus::ConflictsFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    status: MergeStatus,
    new_contents: String,
    conflict_contents: String,
}

impl MergeOutcome {
    pub(crate) fn not_yet_merged(existing: impl Into<String>) -> Self {
        Self {
            status: MergeStatus::NotYetMerged,
            new_contents: existing.into(),
            conflict_contents: String::new(),
        }
    }

    pub(crate) fn original_was_modified() -> Self {
        Self {
            status: MergeStatus::OriginalWasModified,
            new_contents: String::new(),
            conflict_contents: String::new(),
        }
    }

    pub(crate) fn conflicts_resolved(new_contents: impl Into<String>) -> Self {
        Self {
            status: MergeStatus::ConflictsResolved,
            new_contents: new_contents.into(),
            conflict_contents: String::new(),
        }
    }

    pub(crate) fn conflicts_found(
        new_contents: impl Into<String>,
        conflict_contents: impl Into<String>,
    ) -> Self {
        Self {
            status: MergeStatus::ConflictsFound,
            new_contents: new_contents.into(),
            conflict_contents: conflict_contents.into(),
        }
    }

    pub(crate) fn merged_successfully(new_contents: impl Into<String>) -> Self {
        Self {
            status: MergeStatus::MergedSuccessfully,
            new_contents: new_contents.into(),
            conflict_contents: String::new(),
        }
    }

    pub fn status(&self) -> MergeStatus {
        self.status
    }

    pub fn new_contents(&self) -> &str {
        &self.new_contents
    }

    pub fn conflict_contents(&self) -> &str {
        &self.conflict_contents
    }
}
