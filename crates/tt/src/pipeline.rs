//! Markdown pipeline construction from configuration.

use tt_config::MarkdownConfig;
use tt_renderer::{ExternalLinks, HtmlOptions, MarkdownPipeline, TocOptions};

use crate::error::CliError;

/// Build the markdown pipeline described by `[markdown]`.
pub(crate) fn pipeline_from_config(config: &MarkdownConfig) -> Result<MarkdownPipeline, CliError> {
    let external_links = config.external_links.then(|| ExternalLinks {
        rel: config.external_link_rel.clone(),
        target: config.external_link_target.clone(),
    });

    let mut pipeline = MarkdownPipeline::new()
        .with_reading_time(config.words_per_minute)
        .with_html_options(HtmlOptions {
            autolink_headings: config.autolink_headings,
            external_links,
        });

    if config.toc {
        let toc = TocOptions::default()
            .with_heading(&config.toc_heading)
            .map_err(|e| CliError::Validation(format!("Invalid toc_heading: {e}")))?
            .with_max_depth(config.toc_max_depth)
            .with_tight(config.toc_tight);
        pipeline = pipeline.with_toc(toc);
    }

    Ok(pipeline)
}
