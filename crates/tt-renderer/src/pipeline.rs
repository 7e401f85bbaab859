//! Markdown pipeline driver.
//!
//! Runs the fixed transform chain over one document:
//! parse → reading time → embeds → heading ids → contents list → HTML.

use std::time::Instant;

use pulldown_cmark::Options;

use crate::ast::Node;
use crate::embed::transform_embeds;
use crate::html::{HtmlOptions, render_html};
use crate::parse::{default_options, parse_markdown};
use crate::reading_time::ReadingTime;
use crate::slug::assign_heading_ids;
use crate::toc::{TocEntry, TocOptions, collect_toc, insert_toc};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
    /// Reading time estimate (if enabled).
    pub reading_time: Option<ReadingTime>,
    /// Warnings generated during conversion (e.g., unresolved embeds).
    pub warnings: Vec<String>,
}

impl RenderResult {
    /// Reading time label such as `"3 min read"`, if computed.
    #[must_use]
    pub fn minutes_read(&self) -> Option<String> {
        self.reading_time.as_ref().map(ReadingTime::label)
    }
}

/// Configurable markdown pipeline.
///
/// # Example
///
/// ```
/// use tt_renderer::MarkdownPipeline;
///
/// let result = MarkdownPipeline::new()
///     .with_reading_time(200)
///     .render("{% embed %}\n[Demo](https://example.com/demo)");
///
/// assert!(result.html.starts_with("<iframe"));
/// assert_eq!(result.minutes_read().as_deref(), Some("1 min read"));
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownPipeline {
    options: Options,
    words_per_minute: Option<u32>,
    embeds: bool,
    toc: Option<TocOptions>,
    html: HtmlOptions,
}

impl Default for MarkdownPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownPipeline {
    /// Create a pipeline with GFM parsing and embeds enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: default_options(),
            words_per_minute: None,
            embeds: true,
            toc: None,
            html: HtmlOptions::default(),
        }
    }

    /// Set parser options.
    #[must_use]
    pub fn with_parser_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Compute reading time at the given speed.
    #[must_use]
    pub fn with_reading_time(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = Some(words_per_minute);
        self
    }

    /// Enable or disable embed directive resolution.
    #[must_use]
    pub fn with_embeds(mut self, enabled: bool) -> Self {
        self.embeds = enabled;
        self
    }

    /// Insert a contents list under the matching heading.
    #[must_use]
    pub fn with_toc(mut self, options: TocOptions) -> Self {
        self.toc = Some(options);
        self
    }

    /// Set HTML serialization options.
    #[must_use]
    pub fn with_html_options(mut self, options: HtmlOptions) -> Self {
        self.html = options;
        self
    }

    /// Parse markdown and apply every enabled tree transform.
    ///
    /// Returns the transformed tree, the reading time of the untransformed
    /// text, and any warnings.
    pub fn transform(&self, markdown: &str) -> (Node, Option<ReadingTime>, Vec<String>) {
        let mut root = parse_markdown(markdown, self.options);

        let reading_time = self
            .words_per_minute
            .map(|wpm| ReadingTime::of(&root.to_plain_text(), wpm));

        let mut warnings = Vec::new();
        if self.embeds {
            warnings.extend(transform_embeds(&mut root).iter().map(ToString::to_string));
        }

        assign_heading_ids(&mut root);
        if let Some(toc) = &self.toc {
            insert_toc(&mut root, toc);
        }

        (root, reading_time, warnings)
    }

    /// Render markdown to HTML.
    pub fn render(&self, markdown: &str) -> RenderResult {
        let start = Instant::now();
        let (root, reading_time, warnings) = self.transform(markdown);
        let html = render_html(&root, &self.html);
        tracing::debug!(
            elapsed = ?start.elapsed(),
            warnings = warnings.len(),
            "rendered markdown"
        );

        RenderResult {
            html,
            toc: collect_toc(&root),
            reading_time,
            warnings,
        }
    }
}
