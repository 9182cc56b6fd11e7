//! External three-way merge collaborator

use crate::error::Result;

/// Three-way line merge over a common ancestor.
///
/// Implementations must be pure functions of their three inputs and must
/// mark each conflicting chunk with a literal `=======` separator line in
/// the returned text (the `<<<<<<<`/`>>>>>>>` framing is free-form). Any
/// diff3-capable library can sit behind this seam.
pub trait ThreeWayMerge: Send + Sync {
    fn merge(&self, base: &str, ours: &str, theirs: &str) -> Result<String>;
}

/// Default collaborator backed by `diffy`'s diff3 merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffyMerge;

impl ThreeWayMerge for DiffyMerge {
    fn merge(&self, base: &str, ours: &str, theirs: &str) -> Result<String> {
        // diffy reports conflicts through Err, with the markers already
        // embedded in the carried text. Both arms are valid merge output
        // here; classification happens on the text itself.
        match diffy::merge(base, ours, theirs) {
            Ok(clean) => Ok(clean),
            Err(conflicted) => Ok(conflicted),
        }
    }
}
