//! Markdown transform pipeline for techtext posts.
//!
//! Markdown is parsed into a [`Node`] tree with `pulldown-cmark`, run through
//! a fixed chain of tree transforms, and serialized to an HTML fragment.
//!
//! # Transforms
//!
//! - [`transform_embeds`]: `{% embed %}` directives become iframes
//! - [`assign_heading_ids`]: GitHub-style heading slugs
//! - [`insert_toc`]: contents list under a "Table of contents" heading
//! - [`ReadingTime`]: reading time estimate of the source text
//!
//! [`MarkdownPipeline`] runs them in order and renders the result with
//! [`render_html`].
//!
//! # Example
//!
//! ```
//! use tt_renderer::{HtmlOptions, MarkdownPipeline};
//!
//! let result = MarkdownPipeline::new()
//!     .with_html_options(HtmlOptions {
//!         autolink_headings: true,
//!         ..Default::default()
//!     })
//!     .render("## Hello\n\n**Bold** text");
//!
//! assert!(result.html.starts_with(r#"<h2 id="hello">"#));
//! ```

mod ast;
pub mod embed;
mod html;
pub mod parse;
mod pipeline;
mod reading_time;
mod slug;
mod toc;
mod util;

pub use ast::{ColumnAlign, Node};
pub use embed::{DirectiveError, MalformedReason, Platform, transform_embeds};
pub use html::{ExternalLinks, HtmlOptions, render_html};
pub use parse::parse_markdown;
pub use pipeline::{MarkdownPipeline, RenderResult};
pub use reading_time::{DEFAULT_WORDS_PER_MINUTE, ReadingTime};
pub use slug::{Slugger, assign_heading_ids, slug};
pub use toc::{DEFAULT_TOC_HEADING, TocEntry, TocOptions, collect_toc, insert_toc};
pub use util::escape_html;
