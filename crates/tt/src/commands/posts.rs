//! `tt posts` command implementation.

use clap::Args;
use tt_content::{load_posts, published, sort_posts};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::pipeline::pipeline_from_config;

/// Arguments for the posts command.
#[derive(Args)]
pub(crate) struct PostsArgs {
    /// Include drafts.
    #[arg(long)]
    drafts: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl PostsArgs {
    /// List posts newest first as `date  slug  reading time  title`.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config()?;
        let pipeline = pipeline_from_config(&config.markdown)?;
        let source_dir = &config.content_resolved.source_dir;

        let posts: Vec<_> = load_posts(source_dir, &pipeline)?
            .into_iter()
            .map(|loaded| loaded.post)
            .collect();
        let posts = if self.drafts { posts } else { published(posts) };
        let posts = sort_posts(posts);

        if posts.is_empty() {
            output.info(&format!("No posts found in {}", source_dir.display()));
            return Ok(());
        }

        for post in &posts {
            let fm = &post.frontmatter;
            let minutes = fm.minutes_read.as_deref().unwrap_or("-");
            output.data(&format!(
                "{}  {}  {}  {}",
                fm.pub_datetime.format("%Y-%m-%d"),
                post.slug,
                output.dim(minutes),
                fm.title
            ))?;
        }
        Ok(())
    }
}
