//! Blog content collection for techtext.
//!
//! Loads markdown posts with YAML frontmatter from a directory, renders them
//! through a [`tt_renderer::MarkdownPipeline`] and provides the helpers the
//! site uses to list them:
//!
//! - [`load_posts`] discovers and renders every post in parallel
//! - [`published`] and [`sort_posts`] filter drafts and order by date
//! - [`slugify_post`] derives URL slugs from titles
//! - [`article_schema`] builds JSON-LD for article pages
//!
//! # Example
//!
//! ```
//! use tt_content::Post;
//! use tt_renderer::MarkdownPipeline;
//!
//! let source = "---\nauthor: A\npubDatetime: 2024-01-01\ntitle: Hello World\ndescription: d\n---\nHi!\n";
//! let mut post = Post::parse("hello.md", source).unwrap();
//! let result = post.render(&MarkdownPipeline::new().with_reading_time(200));
//!
//! assert_eq!(post.slug, "hello-world");
//! assert_eq!(result.html, "<p>Hi!</p>");
//! assert_eq!(post.frontmatter.minutes_read.as_deref(), Some("1 min read"));
//! ```

mod error;
mod frontmatter;
mod post;
mod scanner;
mod slugify;
mod structured_data;

pub use error::ContentError;
pub use frontmatter::{BlogFrontmatter, parse_datetime, split_frontmatter};
pub use post::{LoadedPost, Post, load_posts, published, sort_posts};
pub use slugify::{slugify_all, slugify_post, slugify_str};
pub use structured_data::{
    ArticleAudience, ArticleAuthor, ArticleSchemaOptions, ArticleType, article_schema,
};
