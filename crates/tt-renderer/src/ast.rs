//! Document tree for parsed markdown.
//!
//! The tree mirrors the mdast shape: block containers own ordered children,
//! inline leaves carry a text or URL payload. Transforms mutate it in place.

use pulldown_cmark::Alignment;

/// Column alignment of a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnAlign {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<Alignment> for ColumnAlign {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::None => Self::None,
            Alignment::Left => Self::Left,
            Alignment::Center => Self::Center,
            Alignment::Right => Self::Right,
        }
    }
}

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Document root.
    Root { children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    /// Heading with depth 1-6. `id` is filled in by [`crate::assign_heading_ids`].
    Heading {
        depth: u8,
        id: Option<String>,
        children: Vec<Node>,
    },
    ThematicBreak,
    Blockquote { children: Vec<Node> },
    List {
        ordered: bool,
        start: Option<u64>,
        /// Loose list (items separated by blank lines).
        spread: bool,
        children: Vec<Node>,
    },
    ListItem {
        /// Task list state, `None` for plain items.
        checked: Option<bool>,
        spread: bool,
        children: Vec<Node>,
    },
    Code {
        lang: Option<String>,
        meta: Option<String>,
        value: String,
    },
    /// Raw markup emitted verbatim.
    Html { value: String },
    Text { value: String },
    Emphasis { children: Vec<Node> },
    Strong { children: Vec<Node> },
    Delete { children: Vec<Node> },
    InlineCode { value: String },
    /// Hard line break.
    Break,
    /// Soft line break inside a paragraph.
    SoftBreak,
    Link {
        url: String,
        title: String,
        children: Vec<Node>,
    },
    Image {
        url: String,
        title: String,
        alt: String,
    },
    Table {
        align: Vec<ColumnAlign>,
        children: Vec<Node>,
    },
    TableRow { children: Vec<Node> },
    TableCell { children: Vec<Node> },
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Create a raw markup node.
    #[must_use]
    pub fn html(value: impl Into<String>) -> Self {
        Self::Html {
            value: value.into(),
        }
    }

    /// Create a paragraph node.
    #[must_use]
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::Paragraph { children }
    }

    /// Create a link node.
    #[must_use]
    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Link {
            url: url.into(),
            title: String::new(),
            children,
        }
    }

    /// The mdast type name of this node (e.g. `"paragraph"`, `"html"`).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Root { .. } => "root",
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::ThematicBreak => "thematicBreak",
            Self::Blockquote { .. } => "blockquote",
            Self::List { .. } => "list",
            Self::ListItem { .. } => "listItem",
            Self::Code { .. } => "code",
            Self::Html { .. } => "html",
            Self::Text { .. } => "text",
            Self::Emphasis { .. } => "emphasis",
            Self::Strong { .. } => "strong",
            Self::Delete { .. } => "delete",
            Self::InlineCode { .. } => "inlineCode",
            Self::Break => "break",
            Self::SoftBreak => "softBreak",
            Self::Link { .. } => "link",
            Self::Image { .. } => "image",
            Self::Table { .. } => "table",
            Self::TableRow { .. } => "tableRow",
            Self::TableCell { .. } => "tableCell",
        }
    }

    /// Child nodes, or an empty slice for leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Root { children }
            | Self::Paragraph { children }
            | Self::Heading { children, .. }
            | Self::Blockquote { children }
            | Self::List { children, .. }
            | Self::ListItem { children, .. }
            | Self::Emphasis { children }
            | Self::Strong { children }
            | Self::Delete { children }
            | Self::Link { children, .. }
            | Self::Table { children, .. }
            | Self::TableRow { children }
            | Self::TableCell { children } => children,
            _ => &[],
        }
    }

    /// Mutable child list, or `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Root { children }
            | Self::Paragraph { children }
            | Self::Heading { children, .. }
            | Self::Blockquote { children }
            | Self::List { children, .. }
            | Self::ListItem { children, .. }
            | Self::Emphasis { children }
            | Self::Strong { children }
            | Self::Delete { children }
            | Self::Link { children, .. }
            | Self::Table { children, .. }
            | Self::TableRow { children }
            | Self::TableCell { children } => Some(children),
            _ => None,
        }
    }

    /// Concatenated textual content of this node and its descendants.
    ///
    /// Text, inline code, code blocks, raw markup and image alt text
    /// contribute. Breaks contribute a single space and adjacent blocks are
    /// separated by a newline.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out, true);
        out
    }

    /// Like [`Node::to_plain_text`] but without raw markup: the text a reader
    /// sees. Used for heading slugs and contents titles.
    #[must_use]
    pub fn to_visible_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out, false);
        out
    }

    fn push_text(&self, out: &mut String, markup: bool) {
        // Keep words in adjacent blocks apart.
        let is_block = match self {
            Self::Paragraph { .. } | Self::Heading { .. } | Self::Code { .. } | Self::TableCell { .. } => true,
            // Raw markup blocks keep their trailing newline; inline markup has none.
            Self::Html { value } => markup && value.ends_with('\n'),
            _ => false,
        };
        if is_block && !out.is_empty() && !out.ends_with(char::is_whitespace) {
            out.push('\n');
        }
        match self {
            Self::Text { value } | Self::InlineCode { value } | Self::Code { value, .. } => {
                out.push_str(value);
            }
            Self::Html { value } => {
                if markup {
                    out.push_str(value);
                }
            }
            Self::Image { alt, .. } => out.push_str(alt),
            Self::Break | Self::SoftBreak => out.push(' '),
            _ => {
                for child in self.children() {
                    child.push_text(out, markup);
                }
            }
        }
    }
}
