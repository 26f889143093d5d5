//! # ratify-apply
//!
//! Verify a proposal folder's manifest, then apply its patches (or copy its
//! documents when it ships none), then regenerate the output manifest.
//!
//! Call [`pipeline::run`] with an explicit proposal folder, working directory,
//! and [`PatchRunner`]. Nothing in this crate reads the process cwd.

pub mod copy;
pub mod error;
pub mod patches;
pub mod pipeline;

pub use error::ApplyError;
pub use patches::{GitApply, PatchRunner};
pub use pipeline::{RunAction, RunReport};
