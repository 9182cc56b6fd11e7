//! Regeneration merge orchestration for Regenerator
//!
//! Sequences the anchor-integrity check, baseline recovery, region
//! stripping, the external three-way merge, region reinjection, and conflict
//! materialization into a single [`Merger::resolve`] call returning an
//! immutable [`MergeOutcome`].

pub mod error;
pub mod merge3;
pub mod outcome;
pub mod report;
pub mod resolve;

pub use error::{Error, Result};
pub use merge3::{DiffyMerge, ThreeWayMerge};
pub use outcome::{MergeOutcome, MergeStatus};
pub use report::{PreservedInsertion, preserved_insertions};
pub use resolve::{CONFLICT_SENTINEL, Merger};
