//! Output-mode dispatch and atomic file I/O for Regenerator
//!
//! The write side of the engine: decides among write/append/merge for a
//! target file, runs the merge orchestrator when an existing copy is on
//! disk, manages the `.conflict` side file, and performs all disk I/O
//! atomically. The merge decision itself is a single atomic point: nothing
//! is written until a terminal outcome is in hand, and a blocked target is
//! not written at all.

pub mod config;
pub mod error;
pub mod generate;
pub mod io;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use generate::{FileGenerator, OutputMode, WriteOutcome, conflict_path};
