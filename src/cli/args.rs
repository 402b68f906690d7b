use std::path::PathBuf;

use clap::Parser;

use crate::check::ParseFailurePolicy;
use crate::report::OutputFormat;

/// Check Terraform HCL files for missing labels
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to provider-schema.json file
    #[arg(short, long, env = "LABELCHECK_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Directory to scan (default: current)
    #[arg(short, long, env = "LABELCHECK_DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// List supported resource types
    #[arg(long)]
    pub list_resources: bool,

    /// Additional provider schema key, tried before the built-in Google keys
    #[arg(
        long = "provider-key",
        env = "LABELCHECK_PROVIDER_KEYS",
        value_delimiter = ','
    )]
    pub provider_keys: Vec<String>,

    /// Report unparseable files and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Output format
    #[arg(long, env = "LABELCHECK_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    pub fn parse_failure_policy(&self) -> ParseFailurePolicy {
        if self.keep_going {
            ParseFailurePolicy::KeepGoing
        } else {
            ParseFailurePolicy::FailFast
        }
    }
}
