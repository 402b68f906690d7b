//! Label checks over discovered Terraform files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::discover;
use crate::error::LabelCheckError;
use crate::terraform::{self, Document, ParseError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Violation {
    pub file: PathBuf,
    pub resource_type: String,
    pub resource_name: String,
    pub address: String,
    /// Always `None`: the HCL parser does not keep source positions.
    pub line_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnparseableFile {
    pub file: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseFailurePolicy {
    /// The first unreadable or malformed file aborts the run.
    #[default]
    FailFast,
    /// Unreadable or malformed files are recorded and skipped.
    KeepGoing,
}

#[derive(Debug, Clone)]
pub struct CheckContext {
    pub label_supporting: BTreeSet<String>,
    pub root: PathBuf,
    pub policy: ParseFailurePolicy,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub root: PathBuf,
    pub checked_types: usize,
    pub files: Vec<PathBuf>,
    pub violations: Vec<Violation>,
    pub unparseable: Vec<UnparseableFile>,
}

impl Analysis {
    pub fn is_success(&self) -> bool {
        !self.files.is_empty() && self.violations.is_empty() && self.unparseable.is_empty()
    }

    pub fn files_with_violations(&self) -> usize {
        self.violations
            .iter()
            .map(|v| v.file.as_path())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

pub fn check_document(
    file: &Path,
    document: &Document,
    label_supporting: &BTreeSet<String>,
) -> Vec<Violation> {
    document
        .resources
        .iter()
        .filter(|resource| label_supporting.contains(&resource.resource_type))
        .filter(|resource| !resource.has_labels())
        .map(|resource| Violation {
            file: file.to_path_buf(),
            resource_type: resource.resource_type.clone(),
            resource_name: resource.name.clone(),
            address: resource.address(),
            line_number: None,
        })
        .collect()
}

pub fn check_file(
    file: &Path,
    label_supporting: &BTreeSet<String>,
) -> Result<Vec<Violation>, ParseError> {
    let document = terraform::parse_file(file)?;
    Ok(check_document(file, &document, label_supporting))
}

pub fn analyze(ctx: &CheckContext) -> Result<Analysis, LabelCheckError> {
    let root = std::path::absolute(&ctx.root)?;
    let files = discover::find_terraform_files(&ctx.root);

    let mut analysis = Analysis {
        root,
        checked_types: ctx.label_supporting.len(),
        files: Vec::with_capacity(files.len()),
        ..Default::default()
    };

    for file in files {
        match check_file(&file, &ctx.label_supporting) {
            Ok(violations) => {
                if !violations.is_empty() {
                    tracing::debug!(
                        file = %file.display(),
                        count = violations.len(),
                        "resources missing labels"
                    );
                }
                analysis.violations.extend(violations);
            }
            Err(err) if ctx.policy == ParseFailurePolicy::KeepGoing => {
                tracing::warn!(file = %err.path().display(), error = %err, "skipping unparseable file");
                analysis.unparseable.push(UnparseableFile {
                    file: file.clone(),
                    error: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        }
        analysis.files.push(file);
    }

    tracing::info!(
        files = analysis.files.len(),
        violations = analysis.violations.len(),
        unparseable = analysis.unparseable.len(),
        "analysis complete"
    );

    Ok(analysis)
}
