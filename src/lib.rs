//! labelcheck - Terraform label policy checker
//!
//! A library for finding Terraform resources that support labels but do not set them,
//! driven by a provider schema dump.

pub mod check;
pub mod cli;
pub mod discover;
pub mod error;
pub mod report;
pub mod schema;
pub mod terraform;

pub use check::{Analysis, CheckContext, ParseFailurePolicy, UnparseableFile, Violation};
pub use error::LabelCheckError;
pub use report::OutputFormat;
pub use schema::{ProviderKeys, ProviderMatch};
