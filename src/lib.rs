//! requp - find newer releases for packages pinned in requirements files
//!
//! This library provides the building blocks of the `requp` CLI:
//! - Reading requirements files as logical lines and parsing `name OP version`
//! - Looking up published versions through a pluggable version oracle
//! - Deciding which requirements are outdated and rewriting the file

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod update;
