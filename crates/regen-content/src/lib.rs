//! Line documents, anchor footers, and protected regions for Regenerator
//!
//! Provides the building blocks of the regeneration-merge engine: a
//! line-oriented [`Document`] type, the anchor-footer codec that lets a
//! generated file carry a fingerprint of its own content, and the protected
//! region extractor that keeps developer-owned blocks out of hashing and
//! merging.

pub mod anchor;
pub mod document;
pub mod error;
pub mod region;
pub mod style;

pub use anchor::{CODE_WIDTH, HashedDocument, anchor_code, encode_anchors, has_footer, stamp};
pub use document::Document;
pub use error::{Error, Result};
pub use region::{ProtectedRegionMarkers, RegionMarkers, RegionTable, extract, reinject, strip};
pub use style::FooterStyle;
