//! `aerate check` command implementation.

use clap::Args;

use super::{InputArgs, report_failures, run_pipeline};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
}

impl CheckArgs {
    /// Render everything without writing, failing if any entity fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.input.load(&self.input.cli_settings())?;

        let report = run_pipeline(&config, &output)?;
        report_failures(&report, &output);

        let failed = report.failed();
        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} entities or files failed to render",
                report.rendered() + failed
            )));
        }
        output.success(&format!(
            "All {} entities in {} files render cleanly",
            report.rendered(),
            report.files.len()
        ));
        Ok(())
    }
}
