//! Target-file generation and output-mode dispatch.
//!
//! Interprets a [`regen_merge::MergeOutcome`] against the filesystem:
//! fresh targets are stamped and written, regenerated targets are merged,
//! blocked targets are left alone, and conflicts are materialized as a
//! `<target>.conflict` side file next to the sentinel-stamped primary.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use regen_content::{Document, FooterStyle, HashedDocument, RegionMarkers, stamp, strip};
use regen_merge::{MergeStatus, Merger, PreservedInsertion, preserved_insertions};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::io;

/// How generated content is combined with an existing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Replace the target (still merge-checked when a managed copy exists).
    Write,
    /// Concatenate after the existing content, no anchor machinery.
    Append,
    /// Merge with the existing content and report preserved lines.
    Merge,
}

/// What `generate` did to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content written (fresh target or clean merge).
    Written,
    /// Target already had this exact content; nothing written.
    Unchanged,
    /// Anchor footers are disabled and the target exists; left untouched.
    Skipped,
    /// A previously conflicted target was hand-resolved; sentinel stripped,
    /// side file removed.
    ConflictResolved,
    /// Conflicts found; primary carries the sentinel, markers are in the
    /// side file. Regeneration of this target is deferred, not failed.
    ConflictDeferred { conflict_path: PathBuf },
    /// A generator-owned line was modified or deleted; nothing written.
    BlockedModified,
}

/// The conflict side-file path for a target: `<target>.conflict`.
pub fn conflict_path(target: &Path) -> PathBuf {
    let mut os = target.as_os_str().to_os_string();
    os.push(".conflict");
    PathBuf::from(os)
}

/// Writes generated content to target files, one call per target.
///
/// Holds no per-target state; calls for different targets are independent
/// and safely parallelizable.
pub struct FileGenerator {
    config: GeneratorConfig,
    merger: Merger,
}

impl FileGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            merger: Merger::new(),
        }
    }

    /// Use a custom merge collaborator or region marker syntax.
    pub fn with_merger(config: GeneratorConfig, merger: Merger) -> Self {
        Self { config, merger }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate `contents` into `target` under the given output mode.
    ///
    /// Nothing is written until a terminal merge outcome is in hand; on
    /// [`WriteOutcome::BlockedModified`] no write happens at all.
    pub fn generate(
        &self,
        target: &Path,
        contents: &str,
        mode: OutputMode,
    ) -> Result<WriteOutcome> {
        let existing = io::read_if_exists(target)?;

        match mode {
            OutputMode::Append => self.append(target, contents, existing),
            OutputMode::Write | OutputMode::Merge => {
                self.write_managed(target, contents, mode, existing)
            }
        }
    }

    fn append(
        &self,
        target: &Path,
        contents: &str,
        existing: Option<String>,
    ) -> Result<WriteOutcome> {
        let out = match &existing {
            Some(e) => format!("{e}\n{contents}"),
            None => contents.to_string(),
        };
        io::write_text(target, &out)?;
        info!(target = %target.display(), "appended");
        Ok(WriteOutcome::Written)
    }

    fn write_managed(
        &self,
        target: &Path,
        contents: &str,
        mode: OutputMode,
        existing: Option<String>,
    ) -> Result<WriteOutcome> {
        if !self.config.use_anchor_footers {
            if existing.is_some() {
                debug!(target = %target.display(), "anchor footers disabled; existing target left untouched");
                return Ok(WriteOutcome::Skipped);
            }
            io::write_text(target, contents)?;
            info!(target = %target.display(), "wrote");
            return Ok(WriteOutcome::Written);
        }

        let style = footer_style_for(target);
        let fresh_body = Document::from(contents);
        let fresh = stamp(
            &fresh_body,
            &strip(&fresh_body, self.merger.markers()),
            style,
        )
        .to_string();

        let Some(existing) = existing.filter(|e| !e.is_empty()) else {
            io::write_text(target, &fresh)?;
            info!(target = %target.display(), "wrote");
            return Ok(WriteOutcome::Written);
        };

        if !self.config.overwrite_unchanged && fresh == existing {
            debug!(target = %target.display(), "content unchanged");
            return Ok(WriteOutcome::Unchanged);
        }

        let outcome = self.merger.resolve(&existing, &fresh)?;
        match outcome.status() {
            MergeStatus::ConflictsResolved => {
                let side = conflict_path(target);
                remove_if_exists(&side)?;
                io::write_text(target, outcome.new_contents())?;
                info!(target = %target.display(), "conflict resolved");
                Ok(WriteOutcome::ConflictResolved)
            }
            MergeStatus::OriginalWasModified => {
                warn!(
                    target = %target.display(),
                    "at least one generated line has been changed or deleted; target left untouched"
                );
                Ok(WriteOutcome::BlockedModified)
            }
            MergeStatus::ConflictsFound => {
                let side = conflict_path(target);
                io::write_text(&side, outcome.conflict_contents())?;
                io::write_text(target, outcome.new_contents())?;
                warn!(
                    conflict = %side.display(),
                    "conflict found; fix the conflict and rerun the generation"
                );
                Ok(WriteOutcome::ConflictDeferred {
                    conflict_path: side,
                })
            }
            MergeStatus::MergedSuccessfully => {
                io::write_text(target, outcome.new_contents())?;
                if mode == OutputMode::Merge {
                    for run in
                        preserved_runs(&fresh_body, outcome.new_contents(), self.merger.markers())?
                    {
                        info!(target = %target.display(), "{run}");
                    }
                }
                info!(target = %target.display(), "merged");
                Ok(WriteOutcome::Written)
            }
            MergeStatus::NotYetMerged => {
                unreachable!("Merger::resolve never returns the transient status")
            }
        }
    }
}

/// Runs of developer lines the merge preserved, for the success log.
///
/// `merged_contents` is the stamped on-disk result; only its body takes part
/// in the diff, so the anchor footer never shows up as a preserved run.
fn preserved_runs(
    fresh_body: &Document,
    merged_contents: &str,
    markers: &dyn RegionMarkers,
) -> Result<Vec<PreservedInsertion>> {
    let merged = HashedDocument::decode(merged_contents, markers)
        .map_err(regen_merge::Error::from)?;
    Ok(preserved_insertions(fresh_body, merged.body(), markers))
}

fn footer_style_for(target: &Path) -> FooterStyle {
    target
        .extension()
        .and_then(|e| e.to_str())
        .map(FooterStyle::from_extension)
        .unwrap_or(FooterStyle::Block)
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}
