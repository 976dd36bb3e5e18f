//! `aerate render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use aerate_config::CliSettings;
use clap::Args;

use super::{InputArgs, report_failures, run_pipeline};
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline::RunReport;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Directory for the generated .rst files (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write documents to stdout even if an output directory is configured.
    #[arg(long, conflicts_with = "output_dir")]
    stdout: bool,

    /// Indentation width of directive bodies (overrides config).
    #[arg(long)]
    indent: Option<usize>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir.clone(),
            stdout: self.stdout,
            indent: self.indent,
            ..self.input.cli_settings()
        };
        let config = self.input.load(&cli_settings)?;

        let report = run_pipeline(&config, &output)?;

        match &config.output_resolved.dir {
            Some(dir) => {
                for path in write_documents(&report, dir)? {
                    output.highlight(&path.display().to_string());
                }
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                for document in report.files.iter().map(|f| &f.document) {
                    if !document.is_empty() {
                        writeln!(stdout, "{document}")?;
                    }
                }
                stdout.flush()?;
            }
        }

        report_failures(&report, &output);
        output.success(&format!(
            "Rendered {} entities from {} files",
            report.rendered(),
            report.files.len()
        ));
        let failed = report.failed();
        if failed > 0 {
            output.warning(&format!("{failed} entities or files skipped"));
        }
        Ok(())
    }
}

/// Write one `.rst` file per rendered compound file into `dir`.
///
/// Files without documented content are not written.
fn write_documents(report: &RunReport, dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for file in &report.files {
        if file.document.is_empty() {
            continue;
        }
        let target = dir.join(file.output_name());
        std::fs::write(&target, &file.document)?;
        written.push(target);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RenderedFile;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn rendered(source: &str, document: &str) -> RenderedFile {
        RenderedFile {
            source: PathBuf::from(source),
            document: document.to_owned(),
            rendered: 1,
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_write_documents() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("api");
        let report = RunReport {
            files: vec![
                rendered("xml/access_8h.xml", "access.h\n========\n"),
                rendered("xml/empty_8h.xml", ""),
            ],
            load_failures: Vec::new(),
        };

        let written = write_documents(&report, &out).unwrap();

        assert_eq!(written, vec![out.join("access_8h.rst")]);
        assert_eq!(
            std::fs::read_to_string(out.join("access_8h.rst")).unwrap(),
            "access.h\n========\n"
        );
        assert!(!out.join("empty_8h.rst").exists());
    }
}
