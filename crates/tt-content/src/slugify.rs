//! URL slugs for posts and tags.

use tt_renderer::slug;

use crate::frontmatter::BlogFrontmatter;

/// Slug of an arbitrary string, using the heading anchor algorithm.
#[must_use]
pub fn slugify_str(value: &str) -> String {
    slug(value)
}

/// Slug of a post, derived from its title.
#[must_use]
pub fn slugify_post(frontmatter: &BlogFrontmatter) -> String {
    slug(&frontmatter.title)
}

/// Slugs of every value, in order.
#[must_use]
pub fn slugify_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| slug(v.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify_str() {
        assert_eq!(slugify_str("Hello, World!"), "hello-world");
        assert_eq!(slugify_str("Rust & WebAssembly"), "rust--webassembly");
    }

    #[test]
    fn test_slugify_post_uses_title() {
        let fm = BlogFrontmatter::from_yaml(
            "author: A\npubDatetime: 2024-01-01\ntitle: Parsing Made Easy\ndescription: d\n",
        )
        .unwrap();
        assert_eq!(slugify_post(&fm), "parsing-made-easy");
    }

    #[test]
    fn test_slugify_all() {
        assert_eq!(
            slugify_all(&["Rust", "Type Systems", "C++"]),
            vec!["rust", "type-systems", "c"]
        );
        assert!(slugify_all::<String>(&[]).is_empty());
    }
}
