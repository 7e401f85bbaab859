//! Blog posts: loading, filtering and ordering.

use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tt_renderer::{MarkdownPipeline, RenderResult};

use crate::error::ContentError;
use crate::frontmatter::{BlogFrontmatter, split_frontmatter};
use crate::scanner::Scanner;
use crate::slugify::slugify_post;

/// A blog post: frontmatter plus markdown body.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// URL slug derived from the title.
    pub slug: String,
    /// Source file path.
    pub path: PathBuf,
    pub frontmatter: BlogFrontmatter,
    /// Markdown body without the frontmatter block.
    pub body: String,
}

impl Post {
    /// Parse a post from its source text.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingFrontmatter`] if the source has no
    /// `---` block, or [`ContentError::Frontmatter`] if the block does not
    /// match the schema.
    pub fn parse(path: impl Into<PathBuf>, source: &str) -> Result<Self, ContentError> {
        let path = path.into();
        let (yaml, body) = split_frontmatter(source);
        let Some(yaml) = yaml else {
            return Err(ContentError::MissingFrontmatter(path));
        };
        let frontmatter = match BlogFrontmatter::from_yaml(yaml) {
            Ok(frontmatter) => frontmatter,
            Err(source) => return Err(ContentError::Frontmatter { path, source }),
        };

        Ok(Self {
            slug: slugify_post(&frontmatter),
            path,
            frontmatter,
            body: body.to_owned(),
        })
    }

    /// Read and parse a post from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &source)
    }

    /// Render the body and record its reading time in the frontmatter.
    pub fn render(&mut self, pipeline: &MarkdownPipeline) -> RenderResult {
        let result = pipeline.render(&self.body);
        if let Some(label) = result.minutes_read() {
            self.frontmatter.minutes_read = Some(label);
        }
        if !result.warnings.is_empty() {
            tracing::debug!(
                path = %self.path.display(),
                warnings = result.warnings.len(),
                "post has unresolved directives"
            );
        }
        result
    }

    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.frontmatter.is_draft()
    }
}

/// A post together with its rendered body.
#[derive(Clone, Debug)]
pub struct LoadedPost {
    pub post: Post,
    pub rendered: RenderResult,
}

/// Load and render every post under `dir`.
///
/// Files are discovered recursively (`.md` and `.mdx`, skipping hidden and
/// `_`-prefixed entries) and rendered in parallel. Results are in path
/// order. A missing directory yields no posts.
///
/// # Errors
///
/// Returns the first error encountered while reading or parsing a post.
pub fn load_posts(
    dir: &Path,
    pipeline: &MarkdownPipeline,
) -> Result<Vec<LoadedPost>, ContentError> {
    let paths = Scanner::new(dir.to_path_buf()).scan();
    tracing::debug!(dir = %dir.display(), count = paths.len(), "discovered posts");

    paths
        .par_iter()
        .map(|path| {
            let mut post = Post::from_file(path)?;
            let rendered = post.render(pipeline);
            Ok(LoadedPost { post, rendered })
        })
        .collect()
}

/// Drop draft posts.
#[must_use]
pub fn published(posts: Vec<Post>) -> Vec<Post> {
    posts.into_iter().filter(|p| !p.is_draft()).collect()
}

/// Order posts newest first.
///
/// Publication times are compared at whole-second precision; posts with
/// equal timestamps keep their relative order.
#[must_use]
pub fn sort_posts(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by_key(|p| Reverse(p.frontmatter.pub_timestamp()));
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn source(title: &str, date: &str, extra: &str) -> String {
        format!(
            "---\nauthor: A\npubDatetime: {date}\ntitle: {title}\ndescription: d\n{extra}---\n"
        )
    }

    fn post(title: &str, date: &str) -> Post {
        Post::parse(format!("{title}.md"), &source(title, date, "")).unwrap()
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.frontmatter.title.as_str()).collect()
    }

    #[test]
    fn test_parse_post() {
        let text = format!("{}# Hello\n\nBody text.\n", source("My First Post", "2024-03-01", ""));
        let post = Post::parse("blog/first.md", &text).unwrap();

        assert_eq!(post.slug, "my-first-post");
        assert_eq!(post.path, PathBuf::from("blog/first.md"));
        assert_eq!(post.body, "# Hello\n\nBody text.\n");
    }

    #[test]
    fn test_parse_without_frontmatter() {
        let err = Post::parse("x.md", "# No frontmatter").unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontmatter(p) if p == Path::new("x.md")));
    }

    #[test]
    fn test_parse_invalid_frontmatter() {
        let err = Post::parse("x.md", "---\ntitle: only\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::Frontmatter { .. }));
        assert!(err.to_string().starts_with("x.md: invalid frontmatter"));
    }

    #[test]
    fn test_render_sets_minutes_read() {
        let mut post = post("Words", "2024-01-01");
        post.body = "word ".repeat(402);
        let pipeline = MarkdownPipeline::new().with_reading_time(200);

        let result = post.render(&pipeline);

        assert_eq!(result.minutes_read().as_deref(), Some("3 min read"));
        assert_eq!(post.frontmatter.minutes_read.as_deref(), Some("3 min read"));
    }

    #[test]
    fn test_render_without_reading_time_keeps_frontmatter() {
        let mut post = post("Words", "2024-01-01");
        post.frontmatter.minutes_read = Some("9 min read".to_owned());
        post.render(&MarkdownPipeline::new());
        assert_eq!(post.frontmatter.minutes_read.as_deref(), Some("9 min read"));
    }

    #[test]
    fn test_render_resolves_embeds() {
        let mut post = post("Demo", "2024-01-01");
        post.body = "{% embed %}\n[Demo](https://example.com/demo)\n".to_owned();
        let result = post.render(&MarkdownPipeline::new());
        assert!(result.html.starts_with(r#"<iframe src="https://example.com/demo""#));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_published_drops_drafts() {
        let mut draft = post("Draft", "2024-01-01");
        draft.frontmatter.draft = Some(true);
        let mut explicit = post("Explicit", "2024-01-02");
        explicit.frontmatter.draft = Some(false);
        let posts = vec![post("Live", "2024-01-03"), draft, explicit];

        assert_eq!(titles(&published(posts)), vec!["Live", "Explicit"]);
    }

    #[test]
    fn test_sort_newest_first() {
        let posts = vec![
            post("Old", "2022-05-01"),
            post("New", "2024-05-01"),
            post("Mid", "2023-05-01"),
        ];
        assert_eq!(titles(&sort_posts(posts)), vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_sort_ignores_subsecond_and_is_stable() {
        let posts = vec![
            post("First", "2024-01-01T10:00:00.100Z"),
            post("Second", "2024-01-01T10:00:00.900Z"),
            post("Later", "2024-01-01T10:00:01Z"),
        ];
        assert_eq!(titles(&sort_posts(posts)), vec!["Later", "First", "Second"]);
    }

    #[test]
    fn test_load_posts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.md"),
            format!("{}Some words here.\n", source("Alpha", "2024-01-01", "")),
        )
        .unwrap();
        fs::write(
            dir.path().join("b.mdx"),
            format!("{}More words.\n", source("Beta", "2024-02-01", "draft: true\n")),
        )
        .unwrap();

        let pipeline = MarkdownPipeline::new().with_reading_time(200);
        let loaded = load_posts(dir.path(), &pipeline).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].post.slug, "alpha");
        assert_eq!(loaded[0].rendered.html, "<p>Some words here.</p>");
        assert_eq!(
            loaded[0].post.frontmatter.minutes_read.as_deref(),
            Some("1 min read")
        );
        assert!(loaded[1].post.is_draft());
    }

    #[test]
    fn test_load_posts_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.md"), "no frontmatter").unwrap();

        let err = load_posts(dir.path(), &MarkdownPipeline::new()).unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontmatter(_)));
    }

    #[test]
    fn test_load_posts_missing_dir() {
        let loaded = load_posts(Path::new("/nonexistent/blog"), &MarkdownPipeline::new()).unwrap();
        assert!(loaded.is_empty());
    }
}
