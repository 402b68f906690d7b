//! Terraform configuration parsing.
//!
//! Both syntaxes are reduced to the same [`Document`]: the ordered list of
//! `resource` blocks with their attributes. Everything else in a file
//! (variables, modules, data sources, ...) is dropped.

mod config;
mod json;
mod native;

pub use config::{AttributeValue, Document, ResourceBlock};

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse HCL in {}: {message}", path.display())]
    Hcl { path: PathBuf, message: String },

    #[error("failed to parse Terraform JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ParseError {
    pub fn path(&self) -> &Path {
        match self {
            ParseError::Io { path, .. }
            | ParseError::Hcl { path, .. }
            | ParseError::Json { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Native,
    Json,
}

impl Syntax {
    pub fn for_path(path: &Path) -> Self {
        let is_json = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".tf.json"));
        if is_json { Syntax::Json } else { Syntax::Native }
    }
}

/// Parses configuration text. Blank input yields an empty document without
/// invoking either parser.
pub fn parse_str(content: &str, syntax: Syntax, path: &Path) -> Result<Document, ParseError> {
    if content.trim().is_empty() {
        return Ok(Document::default());
    }

    match syntax {
        Syntax::Native => native::parse(content).map_err(|err| ParseError::Hcl {
            path: path.to_path_buf(),
            message: err.to_string(),
        }),
        Syntax::Json => json::parse(content).map_err(|source| ParseError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn parse_file(path: &Path) -> Result<Document, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_str(&content, Syntax::for_path(path), path)?;
    tracing::debug!(
        file = %path.display(),
        resources = document.resources.len(),
        "parsed terraform file"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_for_path() {
        assert_eq!(Syntax::for_path(Path::new("main.tf")), Syntax::Native);
        assert_eq!(Syntax::for_path(Path::new("a/main.tf.json")), Syntax::Json);
    }

    #[test]
    fn test_blank_content_short_circuits() {
        let doc = parse_str("  \n\t\n", Syntax::Native, Path::new("empty.tf")).unwrap();
        assert!(doc.resources.is_empty());

        let doc = parse_str("", Syntax::Json, Path::new("empty.tf.json")).unwrap();
        assert!(doc.resources.is_empty());
    }

    #[test]
    fn test_malformed_hcl_reports_path() {
        let err = parse_str(
            "resource \"google_compute_instance\" \"vm\" {",
            Syntax::Native,
            Path::new("broken.tf"),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Hcl { .. }));
        assert_eq!(err.path(), Path::new("broken.tf"));
        assert!(err.to_string().starts_with("failed to parse HCL in broken.tf"));
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let err = parse_str("{\"resource\": ", Syntax::Json, Path::new("broken.tf.json")).unwrap_err();
        assert!(matches!(err, ParseError::Json { .. }));
        assert_eq!(err.path(), Path::new("broken.tf.json"));
    }

    #[test]
    fn test_parse_file_picks_syntax_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let native = dir.path().join("main.tf");
        std::fs::write(
            &native,
            "resource \"google_storage_bucket\" \"logs\" {\n  name = \"logs\"\n}\n",
        )
        .unwrap();
        let json = dir.path().join("extra.tf.json");
        std::fs::write(
            &json,
            r#"{"resource": {"google_pubsub_topic": {"events": {"name": "events"}}}}"#,
        )
        .unwrap();

        let doc = parse_file(&native).unwrap();
        assert_eq!(doc.resources[0].address(), "google_storage_bucket.logs");

        let doc = parse_file(&json).unwrap();
        assert_eq!(doc.resources[0].address(), "google_pubsub_topic.events");
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("gone.tf")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
