//! Table of contents.
//!
//! [`collect_toc`] lists every heading for page navigation. [`insert_toc`]
//! generates an in-document contents list under a heading such as
//! `## Table of contents`, replacing whatever that section held before.
//!
//! Both rely on heading ids, so run [`crate::assign_heading_ids`] first.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::Node;

/// Default pattern for the heading that receives the contents list.
pub const DEFAULT_TOC_HEADING: &str = "(table[ -]of[ -])?contents?|toc";

static DEFAULT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&anchored(DEFAULT_TOC_HEADING)).unwrap());

fn anchored(pattern: &str) -> String {
    format!("(?i)^(?:{pattern})$")
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Options for [`insert_toc`].
#[derive(Clone, Debug)]
pub struct TocOptions {
    heading: Regex,
    /// Deepest heading level listed.
    pub max_depth: u8,
    /// Render list items without paragraphs spacing.
    pub tight: bool,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING_RE.clone(),
            max_depth: 6,
            tight: true,
        }
    }
}

impl TocOptions {
    /// Use a custom heading pattern (matched against the whole heading text,
    /// case-insensitively).
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn with_heading(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.heading = Regex::new(&anchored(pattern))?;
        Ok(self)
    }

    /// Set the deepest heading level listed.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set whether the generated list is tight.
    #[must_use]
    pub fn with_tight(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    /// Whether `text` names a contents section.
    #[must_use]
    pub fn matches_heading(&self, text: &str) -> bool {
        self.heading.is_match(text.trim())
    }
}

/// Collect every heading that has an id, in document order.
///
/// Titles are trimmed; ids are taken as assigned, untrimmed.
#[must_use]
pub fn collect_toc(root: &Node) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    collect(root, &mut entries);
    entries
}

fn collect(node: &Node, entries: &mut Vec<TocEntry>) {
    if let Node::Heading {
        depth,
        id: Some(id),
        ..
    } = node
    {
        entries.push(TocEntry {
            level: *depth,
            title: node.to_visible_text().trim().to_owned(),
            id: id.clone(),
        });
        return;
    }
    for child in node.children() {
        collect(child, entries);
    }
}

/// A heading as it appears in the generated list.
struct Item {
    depth: u8,
    id: String,
    children: Vec<Node>,
}

/// Insert a contents list under the first top-level heading matching the
/// configured pattern.
///
/// The section between that heading and the next heading of the same or
/// lower depth is replaced by the list. Only top-level headings after the
/// section are listed. Returns `true` if a list was inserted.
pub fn insert_toc(root: &mut Node, options: &TocOptions) -> bool {
    let Some(children) = root.children_mut() else {
        return false;
    };

    let Some((index, opening_depth)) = children.iter().enumerate().find_map(|(i, node)| {
        match node {
            Node::Heading { depth, .. } if options.matches_heading(&node.to_visible_text()) => {
                Some((i, *depth))
            }
            _ => None,
        }
    }) else {
        return false;
    };

    let end = children[index + 1..]
        .iter()
        .position(|node| matches!(node, Node::Heading { depth, .. } if *depth <= opening_depth))
        .map_or(children.len(), |offset| index + 1 + offset);

    let items: Vec<Item> = children[end..]
        .iter()
        .filter_map(|node| match node {
            Node::Heading {
                depth,
                id: Some(id),
                children,
            } if *depth <= options.max_depth && !node.to_visible_text().trim().is_empty() => {
                Some(Item {
                    depth: *depth,
                    id: id.clone(),
                    children: strip_links(children),
                })
            }
            _ => None,
        })
        .collect();

    if items.is_empty() {
        return false;
    }

    let list = Node::List {
        ordered: false,
        start: None,
        spread: !options.tight,
        children: build_items(&items, options.tight),
    };
    children.splice(index + 1..end, [list]);
    true
}

fn build_items(items: &[Item], tight: bool) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let item = &items[i];
        let nested_end = items[i + 1..]
            .iter()
            .position(|next| next.depth <= item.depth)
            .map_or(items.len(), |offset| i + 1 + offset);

        let mut children = vec![Node::paragraph(vec![Node::link(
            format!("#{}", item.id),
            item.children.clone(),
        )])];
        if nested_end > i + 1 {
            children.push(Node::List {
                ordered: false,
                start: None,
                spread: !tight,
                children: build_items(&items[i + 1..nested_end], tight),
            });
        }
        nodes.push(Node::ListItem {
            checked: None,
            spread: !tight,
            children,
        });
        i = nested_end;
    }
    nodes
}

/// Clone heading content with links unwrapped to their labels.
fn strip_links(nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .flat_map(|node| match node {
            Node::Link { children, .. } => strip_links(children),
            other => vec![other.clone()],
        })
        .collect()
}
