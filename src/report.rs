//! Rendering of analysis results.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::check::{Analysis, UnparseableFile, Violation};

/// Resource types whose labels live in `resource_labels` rather than `labels`.
pub const RESOURCE_LABELS_TYPES: &[&str] = &[
    "google_cloudfunctions_function",
    "google_cloudfunctions2_function",
];

/// Violations turned into remediation snippets.
pub const MAX_SUGGESTIONS: usize = 10;

/// Snippets printed in the text report.
pub const SHOWN_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
}

pub fn label_attribute_for(resource_type: &str) -> &'static str {
    if RESOURCE_LABELS_TYPES.contains(&resource_type) {
        "resource_labels"
    } else {
        "labels"
    }
}

pub fn label_suggestion(violation: &Violation) -> String {
    format!(
        "\n# In {file}\n# Add to resource \"{resource_type}\" \"{name}\":\n\n  {attr} = {{\n    environment = var.environment\n    project     = var.project_name\n    team        = var.team\n    managed_by  = \"terraform\"\n  }}\n",
        file = violation.file.display(),
        resource_type = violation.resource_type,
        name = violation.resource_name,
        attr = label_attribute_for(&violation.resource_type),
    )
}

pub fn generate_label_suggestions(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(label_suggestion)
        .collect()
}

fn by_resource_type(violations: &[Violation]) -> BTreeMap<&str, Vec<&Violation>> {
    let mut grouped: BTreeMap<&str, Vec<&Violation>> = BTreeMap::new();
    for violation in violations {
        grouped
            .entry(violation.resource_type.as_str())
            .or_default()
            .push(violation);
    }
    grouped
}

fn by_file(violations: &[Violation]) -> BTreeMap<String, Vec<&Violation>> {
    let mut grouped: BTreeMap<String, Vec<&Violation>> = BTreeMap::new();
    for violation in violations {
        grouped
            .entry(violation.file.display().to_string())
            .or_default()
            .push(violation);
    }
    grouped
}

#[derive(Tabled)]
struct ViolationRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Resource Type")]
    resource_type: String,
    #[tabled(rename = "Address")]
    address: String,
}

fn violations_table(violations: &[Violation]) -> String {
    let mut rows: Vec<ViolationRow> = violations
        .iter()
        .map(|v| ViolationRow {
            file: v.file.display().to_string(),
            resource_type: v.resource_type.clone(),
            address: v.address.clone(),
        })
        .collect();
    rows.sort_by(|a, b| a.file.cmp(&b.file).then_with(|| a.address.cmp(&b.address)));

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    root: &'a Path,
    checked_resource_types: usize,
    files_scanned: usize,
    files_with_violations: usize,
    violations: &'a [Violation],
    unparseable_files: &'a [UnparseableFile],
    suggestions: Vec<String>,
}

pub fn render<W: Write>(format: OutputFormat, analysis: &Analysis, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(analysis, false, out),
        OutputFormat::Table => render_text(analysis, true, out),
        OutputFormat::Json => {
            let report = JsonReport {
                success: analysis.is_success(),
                root: &analysis.root,
                checked_resource_types: analysis.checked_types,
                files_scanned: analysis.files.len(),
                files_with_violations: analysis.files_with_violations(),
                violations: &analysis.violations,
                unparseable_files: &analysis.unparseable,
                suggestions: generate_label_suggestions(&analysis.violations),
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)
        }
    }
}

fn render_text<W: Write>(analysis: &Analysis, table: bool, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "🔍 Analyzing Terraform files in {}...",
        analysis.root.display()
    )?;
    writeln!(
        out,
        "📋 Checking {} resource types for labels",
        analysis.checked_types
    )?;

    if analysis.files.is_empty() {
        writeln!(out, "❌ No Terraform files found")?;
        return Ok(());
    }

    writeln!(out, "📁 Found {} Terraform files", analysis.files.len())?;

    if !analysis.unparseable.is_empty() {
        writeln!(
            out,
            "\n⚠️  Skipped {} unparseable files:",
            analysis.unparseable.len()
        )?;
        for skipped in &analysis.unparseable {
            writeln!(out, "  - {}: {}", skipped.file.display(), skipped.error)?;
        }
    }

    if analysis.violations.is_empty() {
        if analysis.unparseable.is_empty() {
            writeln!(
                out,
                "\n✅ All {} label-supporting resource types have labels!",
                analysis.checked_types
            )?;
        } else {
            writeln!(
                out,
                "\n❌ No missing labels found, but {} files could not be checked",
                analysis.unparseable.len()
            )?;
        }
        return Ok(());
    }

    writeln!(
        out,
        "\n❌ Found {} resources missing labels in {} files",
        analysis.violations.len(),
        analysis.files_with_violations()
    )?;

    if table {
        writeln!(out)?;
        writeln!(out, "{}", violations_table(&analysis.violations))?;
    } else {
        writeln!(out, "\n📊 Violations by resource type:")?;
        for (resource_type, violations) in by_resource_type(&analysis.violations) {
            writeln!(out, "  • {}: {} resources", resource_type, violations.len())?;
        }

        writeln!(out, "\n📁 Violations by file:")?;
        for (file, violations) in by_file(&analysis.violations) {
            writeln!(out, "\n  {} ({} violations):", file, violations.len())?;
            for violation in violations {
                writeln!(out, "    - {}", violation.address)?;
            }
        }
    }

    writeln!(out, "\n💡 Example label configurations:")?;
    let suggestions = generate_label_suggestions(&analysis.violations);
    for suggestion in suggestions.iter().take(SHOWN_SUGGESTIONS) {
        writeln!(out, "{}", suggestion)?;
    }
    if suggestions.len() > SHOWN_SUGGESTIONS {
        writeln!(
            out,
            "... and {} more suggestions",
            suggestions.len() - SHOWN_SUGGESTIONS
        )?;
    }

    Ok(())
}

pub fn render_resource_list<W: Write>(
    format: OutputFormat,
    resource_types: &BTreeSet<String>,
    out: &mut W,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, resource_types)?;
        return writeln!(out);
    }

    writeln!(out, "📋 Resources that should have labels:")?;
    for resource_type in resource_types {
        writeln!(out, "  • {}", resource_type)?;
    }
    Ok(())
}

pub fn render_provider_not_found<W: Write>(available: &[String], out: &mut W) -> io::Result<()> {
    writeln!(out, "❌ Google provider not found in schema. Available providers:")?;
    for key in available {
        writeln!(out, "  • {}", key)?;
    }
    Ok(())
}
