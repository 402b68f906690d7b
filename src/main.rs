use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use labelcheck::cli::Cli;
use labelcheck::{CheckContext, OutputFormat, ProviderKeys, ProviderMatch, check, report, schema};

/// Exit status when no schema path was given.
const EXIT_MISSING_SCHEMA: u8 = 2;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = run(&cli, &mut out)?;
    out.flush()?;

    Ok(code)
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<ExitCode> {
    let text = cli.format != OutputFormat::Json;

    let Some(schema_path) = cli.schema.as_deref() else {
        tracing::error!("no provider schema given");
        if text {
            writeln!(out, "❌ No schema provided")?;
        } else {
            eprintln!("❌ No schema provided");
        }
        return Ok(ExitCode::from(EXIT_MISSING_SCHEMA));
    };

    if text {
        writeln!(
            out,
            "📄 Loading resource schema from {}",
            schema_path.display()
        )?;
    }

    let keys = ProviderKeys::with_extra(cli.provider_keys.iter().cloned());
    let matched = schema::load_label_supporting_resources(schema_path, &keys)?;
    if let ProviderMatch::NotFound { available } = &matched {
        if text {
            report::render_provider_not_found(available, out)?;
        }
    }
    let label_supporting = matched.into_resource_types();

    if cli.list_resources {
        report::render_resource_list(cli.format, &label_supporting, out)?;
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = CheckContext {
        label_supporting,
        root: cli.directory.clone(),
        policy: cli.parse_failure_policy(),
    };
    let analysis = check::analyze(&ctx)?;
    report::render(cli.format, &analysis, out)?;

    if analysis.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
