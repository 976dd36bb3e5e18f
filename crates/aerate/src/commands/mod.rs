//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

use std::path::PathBuf;

use aerate_config::{CliSettings, Config};
use aerate_render::XrefIndex;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;
use crate::pipeline::{Pipeline, RunReport, load_index};
use crate::scanner::scan;

/// Input selection shared by all commands.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Doxygen XML output directory (overrides config).
    #[arg(short = 'x', long, env = "AERATE_XML_DIR")]
    xml_dir: Option<PathBuf>,

    /// Compound file name pattern, repeatable (overrides config).
    #[arg(short, long = "pattern")]
    patterns: Vec<String>,

    /// Path to configuration file (default: auto-discover aerate.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl InputArgs {
    /// Settings carrying this command's input overrides.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            xml_dir: self.xml_dir.clone(),
            patterns: (!self.patterns.is_empty()).then(|| self.patterns.clone()),
            ..CliSettings::default()
        }
    }

    fn load(&self, settings: &CliSettings) -> Result<Config, CliError> {
        Ok(Config::load(self.config.as_deref(), Some(settings))?)
    }
}

/// Scan, index and render everything the configuration selects.
fn run_pipeline(config: &Config, output: &Output) -> Result<RunReport, CliError> {
    let input = &config.input_resolved;
    output.info(&format!("Source: {}", input.xml_dir.display()));

    let files = scan(&input.xml_dir, &input.patterns)?;
    if files.is_empty() {
        output.warning(&format!(
            "No compound files match {}",
            input.patterns.join(", ")
        ));
    }

    let index = load_index(&input.xml_dir)?.unwrap_or_else(|| {
        output.warning("No index.xml found, references render as plain text");
        XrefIndex::new()
    });

    Ok(Pipeline::new(&config.render, &index).run(&files))
}

/// Print every failure of a run.
fn report_failures(report: &RunReport, output: &Output) {
    for failure in &report.load_failures {
        output.error(&format!(
            "{}: {}",
            failure.source.display(),
            failure.error
        ));
    }
    for (source, failure) in report.entity_failures() {
        output.warning(&format!(
            "{}: {} ({}): {}",
            source.display(),
            failure.name,
            failure.id,
            failure.error
        ));
    }
}
