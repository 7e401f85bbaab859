//! `tt render` command implementation.

use std::path::PathBuf;

use clap::Args;
use tt_content::split_frontmatter;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline::pipeline_from_config;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RenderArgs {
    /// Render the file body (after any frontmatter) and print it to stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let pipeline = pipeline_from_config(&config.markdown)?;

        let source = std::fs::read_to_string(&self.file)?;
        let (_, body) = split_frontmatter(&source);
        let result = pipeline.render(body);

        for warning in &result.warnings {
            output.warning(&format!("{}: {warning}", self.file.display()));
        }
        if let Some(label) = result.minutes_read() {
            tracing::info!(file = %self.file.display(), "{label}");
        }

        output.data(&result.html)?;
        Ok(())
    }
}
