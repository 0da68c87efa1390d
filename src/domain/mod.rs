//! Core domain models for requp
//!
//! This module contains the fundamental types used throughout the application:
//! - Requirement records parsed from a manifest
//! - Update decision results
//! - Per-manifest reports and the run summary

mod requirement;
mod summary;
mod update_result;

pub use pep508_rs::pep440_rs::Version;
pub use requirement::{normalize_name, Operator, Requirement};
pub use summary::{ManifestReport, RunSummary};
pub use update_result::{SkipReason, UpdateResult};
