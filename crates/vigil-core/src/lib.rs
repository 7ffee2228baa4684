//! Core types, configuration, and error handling for the Vigil bot.
//!
//! This crate provides the shared foundation used by the pipeline crate:
//! - [`VigilError`] — unified error type using `thiserror`
//! - [`Config`] — configuration resolved once from the environment
//! - Shared types: [`FailedCheck`], [`FindingsSummary`]

mod config;
mod error;
mod types;

pub use config::{
    Config, DEFAULT_MODEL, DEFAULT_PR_NUMBER, DEFAULT_REPO_SLUG, DEFAULT_REPORT_PATH,
};
pub use error::VigilError;
pub use types::{FailedCheck, FindingsSummary};

/// A convenience `Result` type for Vigil operations.
pub type Result<T> = std::result::Result<T, VigilError>;
