//! Markdown to document tree conversion.
//!
//! Builds a [`Node::Root`] from `pulldown-cmark` events using a stack of open
//! containers. Tight list items have their inline runs wrapped in paragraphs
//! so every transform sees the same shape regardless of list looseness.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::ast::{ColumnAlign, Node};
use crate::util::heading_level_to_num;

/// Default parser options: GitHub Flavored Markdown tables, strikethrough
/// and task lists.
#[must_use]
pub fn default_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Parse markdown into a document tree.
///
/// # Example
///
/// ```
/// use tt_renderer::{Node, parse_markdown, parse::default_options};
///
/// let root = parse_markdown("Hello *world*", default_options());
/// assert_eq!(root.children()[0].kind(), "paragraph");
/// ```
#[must_use]
pub fn parse_markdown(markdown: &str, options: Options) -> Node {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, options) {
        builder.event(event);
    }
    builder.finish()
}

/// An open container plus whether a paragraph was seen directly inside it
/// (only meaningful for list items).
struct Frame {
    node: Node,
    has_paragraph: bool,
}

struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame {
                node: Node::Root {
                    children: Vec::new(),
                },
                has_paragraph: false,
            }],
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.append(Node::InlineCode {
                value: code.into_string(),
            }),
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => self.append(Node::html(html.into_string())),
            Event::SoftBreak => self.append(Node::SoftBreak),
            Event::HardBreak => self.append(Node::Break),
            Event::Rule => self.append(Node::ThematicBreak),
            Event::TaskListMarker(checked) => {
                // Loose items carry the marker inside their first paragraph.
                let item = self.stack.iter_mut().rev().find_map(|frame| match &mut frame.node {
                    Node::ListItem { checked, .. } => Some(checked),
                    _ => None,
                });
                if let Some(slot) = item {
                    *slot = Some(checked);
                }
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let node = match tag {
            Tag::Paragraph => {
                if let Some(frame) = self.stack.last_mut() {
                    frame.has_paragraph = true;
                }
                Node::Paragraph {
                    children: Vec::new(),
                }
            }
            Tag::Heading { level, .. } => Node::Heading {
                depth: heading_level_to_num(level),
                id: None,
                children: Vec::new(),
            },
            Tag::BlockQuote(_) => Node::Blockquote {
                children: Vec::new(),
            },
            Tag::CodeBlock(kind) => {
                let (lang, meta) = match kind {
                    CodeBlockKind::Fenced(info) => split_fence_info(&info),
                    CodeBlockKind::Indented => (None, None),
                };
                Node::Code {
                    lang,
                    meta,
                    value: String::new(),
                }
            }
            Tag::HtmlBlock => Node::html(String::new()),
            Tag::List(start) => Node::List {
                ordered: start.is_some(),
                start,
                spread: false,
                children: Vec::new(),
            },
            Tag::Item => Node::ListItem {
                checked: None,
                spread: false,
                children: Vec::new(),
            },
            Tag::Table(align) => Node::Table {
                align: align.into_iter().map(ColumnAlign::from).collect(),
                children: Vec::new(),
            },
            Tag::TableHead | Tag::TableRow => Node::TableRow {
                children: Vec::new(),
            },
            Tag::TableCell => Node::TableCell {
                children: Vec::new(),
            },
            Tag::Emphasis => Node::Emphasis {
                children: Vec::new(),
            },
            Tag::Strong => Node::Strong {
                children: Vec::new(),
            },
            Tag::Strikethrough => Node::Delete {
                children: Vec::new(),
            },
            Tag::Link {
                dest_url, title, ..
            } => Node::Link {
                url: dest_url.into_string(),
                title: title.into_string(),
                children: Vec::new(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Node::Image {
                url: dest_url.into_string(),
                title: title.into_string(),
                alt: String::new(),
            },
            // Transparent: their content lands in the enclosing container.
            Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => return,
        };
        self.stack.push(Frame {
            node,
            has_paragraph: false,
        });
    }

    fn end(&mut self, tag: TagEnd) {
        if matches!(
            tag,
            TagEnd::FootnoteDefinition
                | TagEnd::MetadataBlock(_)
                | TagEnd::DefinitionList
                | TagEnd::DefinitionListTitle
                | TagEnd::DefinitionListDefinition
                | TagEnd::Superscript
                | TagEnd::Subscript
        ) {
            return;
        }
        // The root frame is never popped here.
        if self.stack.len() < 2 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let node = match frame.node {
            Node::ListItem {
                checked, children, ..
            } => Node::ListItem {
                checked,
                spread: frame.has_paragraph,
                // Loose items already hold their inline content in
                // paragraphs; anything left over is block-level raw markup.
                children: if frame.has_paragraph {
                    children
                } else {
                    wrap_inline_runs(children)
                },
            },
            Node::List {
                ordered,
                start,
                children,
                ..
            } => {
                let spread = children
                    .iter()
                    .any(|item| matches!(item, Node::ListItem { spread: true, .. }));
                Node::List {
                    ordered,
                    start,
                    spread,
                    children,
                }
            }
            other => other,
        };
        self.append(node);
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut().map(|frame| &mut frame.node) {
            Some(Node::Code { value, .. }) => value.push_str(text),
            Some(Node::Image { alt, .. }) => alt.push_str(text),
            _ => self.append(Node::text(text)),
        }
    }

    fn html(&mut self, html: &str) {
        if let Some(Frame {
            node: Node::Html { value },
            ..
        }) = self.stack.last_mut()
        {
            value.push_str(html);
        } else {
            self.append(Node::html(html));
        }
    }

    /// Append a node to the innermost container, merging adjacent text.
    fn append(&mut self, node: Node) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        match (&mut frame.node, node) {
            // Image alt text may contain inline markup; keep only its text.
            (Node::Image { alt, .. }, inner) => alt.push_str(&inner.to_visible_text()),
            (parent, node) => {
                let Some(children) = parent.children_mut() else {
                    return;
                };
                if let (Some(Node::Text { value: last }), Node::Text { value }) =
                    (children.last_mut(), &node)
                {
                    last.push_str(value);
                    return;
                }
                children.push(node);
            }
        }
    }

    fn finish(mut self) -> Node {
        // Unbalanced input cannot come out of pulldown-cmark, but fold any
        // leftover frames into their parents so nothing is lost.
        while self.stack.len() > 1 {
            if let Some(frame) = self.stack.pop() {
                self.append(frame.node);
            }
        }
        self.stack.pop().map_or(
            Node::Root {
                children: Vec::new(),
            },
            |frame| frame.node,
        )
    }
}

fn is_block(node: &Node) -> bool {
    matches!(
        node,
        Node::Paragraph { .. }
            | Node::Heading { .. }
            | Node::ThematicBreak
            | Node::Blockquote { .. }
            | Node::List { .. }
            | Node::Code { .. }
            | Node::Table { .. }
    )
}

/// Wrap consecutive inline children of a tight list item in paragraphs.
fn wrap_inline_runs(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    let mut run = Vec::new();
    for child in children {
        if is_block(&child) {
            if !run.is_empty() {
                out.push(Node::paragraph(std::mem::take(&mut run)));
            }
            out.push(child);
        } else {
            run.push(child);
        }
    }
    if !run.is_empty() {
        out.push(Node::paragraph(run));
    }
    out
}

/// Split a fence info string into language and meta.
fn split_fence_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => (Some(lang.to_owned()), Some(meta.trim().to_owned())),
        None if info.is_empty() => (None, None),
        None => (Some(info.to_owned()), None),
    }
}
