//! `tt check` command implementation.

use clap::Args;
use tt_content::load_posts;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline::pipeline_from_config;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CheckArgs {
    /// Load every post and fail if any embed directive did not resolve.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let pipeline = pipeline_from_config(&config.markdown)?;

        let loaded = load_posts(&config.content_resolved.source_dir, &pipeline)?;
        let total = loaded.len();

        let mut failed = 0;
        for entry in &loaded {
            if entry.rendered.warnings.is_empty() {
                continue;
            }
            failed += 1;
            for warning in &entry.rendered.warnings {
                output.warning(&format!("{}: {warning}", entry.post.path.display()));
            }
        }

        if failed > 0 {
            return Err(CliError::Check { failed, total });
        }
        output.success(&format!("Checked {total} posts"));
        Ok(())
    }
}
