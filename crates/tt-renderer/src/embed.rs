//! Embed directives: `{% platform %}` shorthand resolved to iframe markup.
//!
//! A paragraph is a directive when the concatenation of its direct text
//! children starts with `{%` and ends with `%}`. The first token after the
//! opener selects a [`Platform`], and the URL comes from the paragraph's
//! first link:
//!
//! ```markdown
//! {% embed %}
//! [Video](https://example.com/player/123)
//! ```
//!
//! Resolved paragraphs are replaced one-for-one by a raw [`Node::Html`] node.
//! Directives that cannot be resolved are left as literal text and reported
//! as [`DirectiveError`]s.

use std::fmt;

use crate::ast::Node;
use crate::util::escape_html;

/// Directive opening marker.
pub const DIRECTIVE_START: &str = "{%";
/// Directive closing marker.
pub const DIRECTIVE_END: &str = "%}";

/// Supported embed platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Generic iframe embed (`{% embed %}`).
    Embed,
}

impl Platform {
    /// Look up a platform by its directive identifier.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "embed" => Some(Self::Embed),
            _ => None,
        }
    }

    /// The directive identifier for this platform.
    #[must_use]
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Embed => "embed",
        }
    }

    /// Render the embed markup for `url`.
    ///
    /// # Example
    ///
    /// ```
    /// use tt_renderer::embed::Platform;
    ///
    /// let html = Platform::Embed.render("https://example.com/x");
    /// assert!(html.starts_with(r#"<iframe src="https://example.com/x""#));
    /// ```
    #[must_use]
    pub fn render(self, url: &str) -> String {
        match self {
            Self::Embed => format!(
                r#"<iframe src="{}" style="width: 100%;" height="400" scrolling="no" frameborder="no" loading="lazy" allowtransparency="true" allowfullscreen="true"></iframe>"#,
                escape_html(url)
            ),
        }
    }
}

/// Why a directive could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    /// Nothing but whitespace between the markers.
    EmptyPlatform,
    /// The paragraph has no link to take the URL from.
    MissingLink,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPlatform => f.write_str("empty platform identifier"),
            Self::MissingLink => f.write_str("no link to embed"),
        }
    }
}

/// A directive that was left unresolved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("malformed directive `{directive}`: {reason}")]
    MalformedDirective {
        directive: String,
        reason: MalformedReason,
    },
    #[error("unknown embed platform `{platform}` in `{directive}`")]
    UnknownPlatform { directive: String, platform: String },
}

impl DirectiveError {
    /// The directive text as written in the paragraph.
    #[must_use]
    pub fn directive(&self) -> &str {
        match self {
            Self::MalformedDirective { directive, .. } | Self::UnknownPlatform { directive, .. } => {
                directive
            }
        }
    }
}

/// Replace every resolvable embed directive in `root` with iframe markup.
///
/// Paragraphs are visited in document order, including those nested in
/// blockquotes and list items. Unresolvable directives stay untouched and
/// are returned (and logged) in the order they were found.
///
/// # Example
///
/// ```
/// use tt_renderer::{Node, transform_embeds};
///
/// let mut root = Node::Root {
///     children: vec![Node::paragraph(vec![
///         Node::text("{% embed %}"),
///         Node::link("https://example.com/x", vec![Node::text("Demo")]),
///     ])],
/// };
/// let errors = transform_embeds(&mut root);
/// assert!(errors.is_empty());
/// assert_eq!(root.children()[0].kind(), "html");
/// ```
pub fn transform_embeds(root: &mut Node) -> Vec<DirectiveError> {
    let mut errors = Vec::new();
    if let Some(children) = root.children_mut() {
        transform_children(children, &mut errors);
    }
    errors
}

fn transform_children(children: &mut [Node], errors: &mut Vec<DirectiveError>) {
    let mut replacements = Vec::new();

    for (index, child) in children.iter_mut().enumerate() {
        match child {
            Node::Paragraph { children: inline } => match resolve_directive(inline) {
                Ok(Some(replacement)) => replacements.push((index, replacement)),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(directive = err.directive(), "{err}");
                    errors.push(err);
                }
            },
            other => {
                if let Some(nested) = other.children_mut() {
                    transform_children(nested, errors);
                }
            }
        }
    }

    // One node out, one node in: indices stay valid.
    for (index, replacement) in replacements {
        children[index] = replacement;
    }
}

/// Concatenate the values of the direct text children of a paragraph.
#[must_use]
pub fn directive_text(children: &[Node]) -> String {
    children
        .iter()
        .filter_map(|child| match child {
            Node::Text { value } => Some(value.as_str()),
            _ => None,
        })
        .collect()
}

/// Whether `text` is shaped like a directive (untrimmed marker match).
#[must_use]
pub fn is_directive(text: &str) -> bool {
    text.starts_with(DIRECTIVE_START) && text.ends_with(DIRECTIVE_END)
}

/// Extract the platform identifier from directive text.
///
/// Returns the first whitespace-delimited token between the opener and the
/// first closer that follows it, or `None` if either marker is missing or the
/// token is empty.
///
/// # Example
///
/// ```
/// use tt_renderer::embed::extract_platform;
///
/// assert_eq!(extract_platform("{%   mixed case TOKEN extra %}"), Some("mixed"));
/// assert_eq!(extract_platform("{%  %}"), None);
/// ```
#[must_use]
pub fn extract_platform(text: &str) -> Option<&str> {
    let start = text.find(DIRECTIVE_START)? + DIRECTIVE_START.len();
    let end = text[start..].find(DIRECTIVE_END)? + start;
    text[start..end].split_whitespace().next()
}

/// Resolve a paragraph's children to its replacement node.
///
/// `Ok(None)` means the paragraph is not a directive.
fn resolve_directive(children: &[Node]) -> Result<Option<Node>, DirectiveError> {
    let text = directive_text(children);
    if !is_directive(&text) {
        return Ok(None);
    }

    let Some(identifier) = extract_platform(&text) else {
        return Err(DirectiveError::MalformedDirective {
            directive: text,
            reason: MalformedReason::EmptyPlatform,
        });
    };

    let Some(url) = children.iter().find_map(|child| match child {
        Node::Link { url, .. } => Some(url),
        _ => None,
    }) else {
        return Err(DirectiveError::MalformedDirective {
            directive: text,
            reason: MalformedReason::MissingLink,
        });
    };

    let Some(platform) = Platform::from_identifier(identifier) else {
        return Err(DirectiveError::UnknownPlatform {
            platform: identifier.to_owned(),
            directive: text,
        });
    };

    Ok(Some(Node::html(platform.render(url))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IFRAME: &str = r#"<iframe src="https://example.com/x" style="width: 100%;" height="400" scrolling="no" frameborder="no" loading="lazy" allowtransparency="true" allowfullscreen="true"></iframe>"#;

    fn root(children: Vec<Node>) -> Node {
        Node::Root { children }
    }

    fn embed_paragraph(directive: &str, url: &str) -> Node {
        Node::paragraph(vec![
            Node::text(directive),
            Node::SoftBreak,
            Node::link(url, vec![Node::text("Video")]),
        ])
    }

    #[test]
    fn test_embed_replaced_with_iframe() {
        let mut tree = root(vec![embed_paragraph("{% embed %}", "https://example.com/x")]);

        let errors = transform_embeds(&mut tree);

        assert!(errors.is_empty());
        assert_eq!(tree, root(vec![Node::html(IFRAME)]));
    }

    #[test]
    fn test_link_inside_directive_markers() {
        let mut tree = root(vec![Node::paragraph(vec![
            Node::text("{% embed "),
            Node::link("https://example.com/x", vec![Node::text("Video")]),
            Node::text(" %}"),
        ])]);

        let errors = transform_embeds(&mut tree);

        assert!(errors.is_empty());
        assert_eq!(tree, root(vec![Node::html(IFRAME)]));
    }

    #[test]
    fn test_plain_paragraph_untouched() {
        let paragraph = Node::paragraph(vec![
            Node::text("Just text with a "),
            Node::link("https://example.com", vec![Node::text("link")]),
        ]);
        let mut tree = root(vec![paragraph.clone()]);

        let errors = transform_embeds(&mut tree);

        assert!(errors.is_empty());
        assert_eq!(tree, root(vec![paragraph]));
    }

    #[test]
    fn test_markers_must_be_untrimmed() {
        let leading = Node::paragraph(vec![Node::text(" {% embed %}")]);
        let trailing = Node::paragraph(vec![Node::text("{% embed %} ")]);
        let mut tree = root(vec![leading.clone(), trailing.clone()]);

        let errors = transform_embeds(&mut tree);

        assert!(errors.is_empty());
        assert_eq!(tree, root(vec![leading, trailing]));
    }

    #[test]
    fn test_missing_link_is_malformed() {
        let paragraph = Node::paragraph(vec![Node::text("{% embed %}")]);
        let mut tree = root(vec![paragraph.clone()]);

        let errors = transform_embeds(&mut tree);

        assert_eq!(tree, root(vec![paragraph]));
        assert_eq!(
            errors,
            vec![DirectiveError::MalformedDirective {
                directive: "{% embed %}".to_owned(),
                reason: MalformedReason::MissingLink,
            }]
        );
    }

    #[test]
    fn test_empty_platform_is_malformed() {
        let paragraph = embed_paragraph("{%   %}", "https://example.com/x");
        let mut tree = root(vec![paragraph.clone()]);

        let errors = transform_embeds(&mut tree);

        assert_eq!(tree, root(vec![paragraph]));
        assert!(matches!(
            errors.as_slice(),
            [DirectiveError::MalformedDirective {
                reason: MalformedReason::EmptyPlatform,
                ..
            }]
        ));
    }

    #[test]
    fn test_unknown_platform_left_unchanged() {
        let paragraph = embed_paragraph("{% unknown %}", "https://example.com/x");
        let mut tree = root(vec![paragraph.clone()]);

        let errors = transform_embeds(&mut tree);

        assert_eq!(tree, root(vec![paragraph]));
        assert!(!tree.children().iter().any(|n| n.kind() == "html"));
        assert_eq!(
            errors,
            vec![DirectiveError::UnknownPlatform {
                directive: "{% unknown %}".to_owned(),
                platform: "unknown".to_owned(),
            }]
        );
        assert_eq!(
            errors[0].to_string(),
            "unknown embed platform `unknown` in `{% unknown %}`"
        );
    }

    #[test]
    fn test_platform_is_case_sensitive() {
        let mut tree = root(vec![embed_paragraph("{% Embed %}", "https://example.com/x")]);
        let errors = transform_embeds(&mut tree);
        assert_eq!(errors.len(), 1);
        assert_eq!(tree.children()[0].kind(), "paragraph");
    }

    #[test]
    fn test_first_link_wins() {
        let mut tree = root(vec![Node::paragraph(vec![
            Node::text("{% embed "),
            Node::link("https://example.com/x", vec![]),
            Node::link("https://example.com/other", vec![]),
            Node::text(" %}"),
        ])]);

        transform_embeds(&mut tree);

        assert_eq!(tree, root(vec![Node::html(IFRAME)]));
    }

    #[test]
    fn test_nested_paragraphs_in_document_order() {
        let mut tree = root(vec![
            Node::Blockquote {
                children: vec![Node::paragraph(vec![Node::text("{% first %}")])],
            },
            embed_paragraph("{% embed %}", "https://example.com/x"),
            Node::List {
                ordered: false,
                start: None,
                spread: false,
                children: vec![Node::ListItem {
                    checked: None,
                    spread: false,
                    children: vec![embed_paragraph("{% second %}", "https://example.com/y")],
                }],
            },
        ]);

        let errors = transform_embeds(&mut tree);

        let platforms: Vec<_> = errors.iter().map(DirectiveError::directive).collect();
        assert_eq!(platforms, vec!["{% first %}", "{% second %}"]);
        assert_eq!(tree.children()[1], Node::html(IFRAME));
        assert_eq!(tree.children().len(), 3);
    }

    #[test]
    fn test_multiple_replacements_keep_positions() {
        let mut tree = root(vec![
            embed_paragraph("{% embed %}", "https://example.com/x"),
            Node::paragraph(vec![Node::text("between")]),
            embed_paragraph("{% embed %}", "https://example.com/x"),
        ]);

        transform_embeds(&mut tree);

        assert_eq!(
            tree,
            root(vec![
                Node::html(IFRAME),
                Node::paragraph(vec![Node::text("between")]),
                Node::html(IFRAME),
            ])
        );
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut tree = root(vec![
            embed_paragraph("{% embed %}", "https://example.com/x"),
            Node::paragraph(vec![Node::text("tail")]),
        ]);
        transform_embeds(&mut tree);
        let once = tree.clone();

        let errors = transform_embeds(&mut tree);

        assert!(errors.is_empty());
        assert_eq!(tree, once);
    }

    #[test]
    fn test_url_is_attribute_escaped() {
        let html = Platform::Embed.render(r#"https://example.com/?a=1&b="2""#);
        assert!(html.contains(r#"src="https://example.com/?a=1&amp;b=&quot;2&quot;""#));
    }

    #[test]
    fn test_extract_platform() {
        assert_eq!(extract_platform("{%   mixed case TOKEN extra %}"), Some("mixed"));
        assert_eq!(extract_platform("{% embed %}"), Some("embed"));
        assert_eq!(extract_platform("{%embed%}"), Some("embed"));
        assert_eq!(extract_platform("{% embed\tfoo %}"), Some("embed"));
        assert_eq!(extract_platform("{% %}"), None);
        assert_eq!(extract_platform("no markers"), None);
    }

    #[test]
    fn test_extract_platform_stops_at_first_closer() {
        assert_eq!(extract_platform("{% embed %} trailing %}"), Some("embed"));
        assert_eq!(extract_platform("{%%} embed %}"), None);
    }

    #[test]
    fn test_overlapping_markers() {
        // "{%}" starts with the opener and ends with the closer, but has no
        // closer after the opener.
        assert!(is_directive("{%}"));
        assert_eq!(extract_platform("{%}"), None);
    }

    #[test]
    fn test_directive_text_ignores_non_text_children() {
        let children = vec![
            Node::text("{% embed "),
            Node::Emphasis {
                children: vec![Node::text("ignored")],
            },
            Node::link("https://example.com", vec![Node::text("label")]),
            Node::text(" %}"),
        ];
        assert_eq!(directive_text(&children), "{% embed  %}");
    }

    #[test]
    fn test_platform_identifier_round_trip() {
        assert_eq!(
            Platform::from_identifier(Platform::Embed.identifier()),
            Some(Platform::Embed)
        );
        assert_eq!(Platform::from_identifier("youtube"), None);
    }
}
