//! GitHub-style slugs for headings and post titles.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::ast::Node;

/// Everything that is not a letter, mark, number, connector punctuation,
/// hyphen or space.
static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\p{Pc} -]").unwrap());

/// Convert text to a GitHub-style slug.
///
/// Lowercases, strips punctuation and symbols, and turns each space into a
/// hyphen. Runs of spaces are not collapsed.
///
/// # Example
///
/// ```
/// use tt_renderer::slug;
///
/// assert_eq!(slug("Hello World!"), "hello-world");
/// assert_eq!(slug("What's new in v2.0?"), "whats-new-in-v20");
/// ```
#[must_use]
pub fn slug(text: &str) -> String {
    STRIP_RE.replace_all(&text.to_lowercase(), "").replace(' ', "-")
}

/// Stateful slug generator that keeps slugs unique within one document.
///
/// Repeated slugs get a numeric suffix: `intro`, `intro-1`, `intro-2`.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    /// Create a new slugger with no recorded slugs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a unique slug for `text`.
    pub fn slug(&mut self, text: &str) -> String {
        let original = slug(text);
        let mut result = original.clone();
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_default();
            *count += 1;
            result = format!("{original}-{count}");
        }
        self.occurrences.insert(result.clone(), 0);
        result
    }

    /// Forget all recorded slugs.
    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}

/// Assign a unique `id` to every heading in document order.
///
/// Headings that already carry an id keep it.
pub fn assign_heading_ids(root: &mut Node) {
    let mut slugger = Slugger::new();
    assign_ids(root, &mut slugger);
}

fn assign_ids(node: &mut Node, slugger: &mut Slugger) {
    if let Node::Heading { .. } = node {
        let text = node.to_visible_text();
        if let Node::Heading { id: id @ None, .. } = node {
            *id = Some(slugger.slug(&text));
        }
        return;
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            assign_ids(child, slugger);
        }
    }
}
