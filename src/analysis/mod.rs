//! Analysis and result aggregation modules
//!
//! Combines key detection and segment harmonization into the final summary:
//! - Bar and half-bar segmentation
//! - Result types
//! - Metadata and advisories

pub mod bars;
pub mod metadata;
pub mod result;
