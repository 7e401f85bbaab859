//! HTML serialization of the document tree.
//!
//! Produces semantic HTML5 fragments. Text is escaped, raw markup nodes are
//! emitted verbatim, headings carry their ids, and absolute links can be
//! marked as external.

use std::fmt::Write;

use crate::ast::{ColumnAlign, Node};
use crate::util::escape_html;

/// Anchor prepended to headings when autolinking is enabled.
const AUTOLINK_ICON: &str = r#"<span class="icon icon-link"></span>"#;

/// Attributes added to links that leave the site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalLinks {
    /// Values for the `rel` attribute.
    pub rel: Vec<String>,
    /// Value for the `target` attribute, if any.
    pub target: Option<String>,
}

impl Default for ExternalLinks {
    fn default() -> Self {
        Self {
            rel: vec!["noopener".to_owned(), "noreferrer".to_owned()],
            target: Some("_blank".to_owned()),
        }
    }
}

/// HTML serialization options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Prepend a self-link anchor to every heading that has an id.
    pub autolink_headings: bool,
    /// Mark absolute `http(s)` links as external.
    pub external_links: Option<ExternalLinks>,
}

/// Serialize a document tree to HTML.
///
/// # Example
///
/// ```
/// use tt_renderer::{HtmlOptions, Node, render_html};
///
/// let root = Node::Root {
///     children: vec![Node::paragraph(vec![Node::text("a < b")])],
/// };
/// assert_eq!(render_html(&root, &HtmlOptions::default()), "<p>a &lt; b</p>");
/// ```
#[must_use]
pub fn render_html(root: &Node, options: &HtmlOptions) -> String {
    let mut writer = HtmlWriter {
        output: String::with_capacity(4096),
        options,
    };
    writer.node(root, false);
    writer.output
}

struct HtmlWriter<'a> {
    output: String,
    options: &'a HtmlOptions,
}

impl HtmlWriter<'_> {
    fn children(&mut self, nodes: &[Node], tight: bool) {
        for node in nodes {
            self.node(node, tight);
        }
    }

    /// `tight` is set for the direct children of a non-spread list item,
    /// whose paragraphs render without `<p>`.
    fn node(&mut self, node: &Node, tight: bool) {
        match node {
            Node::Root { children } => self.children(children, false),
            Node::Paragraph { children } => {
                if tight {
                    self.children(children, false);
                } else {
                    self.output.push_str("<p>");
                    self.children(children, false);
                    self.output.push_str("</p>");
                }
            }
            Node::Heading {
                depth,
                id,
                children,
            } => self.heading(*depth, id.as_deref(), children),
            Node::ThematicBreak => self.output.push_str("<hr>"),
            Node::Blockquote { children } => {
                self.output.push_str("<blockquote>");
                self.children(children, false);
                self.output.push_str("</blockquote>");
            }
            Node::List {
                ordered,
                start,
                children,
                ..
            } => {
                match (*ordered, *start) {
                    (true, Some(1) | None) => self.output.push_str("<ol>"),
                    (true, Some(n)) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                    (false, _) => self.output.push_str("<ul>"),
                }
                self.children(children, false);
                self.output
                    .push_str(if *ordered { "</ol>" } else { "</ul>" });
            }
            Node::ListItem {
                checked,
                spread,
                children,
            } => {
                self.output.push_str("<li>");
                match checked {
                    Some(true) => self
                        .output
                        .push_str(r#"<input type="checkbox" disabled checked> "#),
                    Some(false) => self.output.push_str(r#"<input type="checkbox" disabled> "#),
                    None => {}
                }
                self.children(children, !spread);
                self.output.push_str("</li>");
            }
            Node::Code { lang, value, .. } => {
                match lang {
                    Some(lang) => write!(
                        self.output,
                        r#"<pre><code class="language-{}">"#,
                        escape_html(lang)
                    )
                    .unwrap(),
                    None => self.output.push_str("<pre><code>"),
                }
                self.output.push_str(&escape_html(value));
                self.output.push_str("</code></pre>");
            }
            Node::Html { value } => self.output.push_str(value),
            Node::Text { value } => self.output.push_str(&escape_html(value)),
            Node::Emphasis { children } => self.wrap("em", children),
            Node::Strong { children } => self.wrap("strong", children),
            Node::Delete { children } => self.wrap("del", children),
            Node::InlineCode { value } => {
                write!(self.output, "<code>{}</code>", escape_html(value)).unwrap();
            }
            Node::Break => self.output.push_str("<br>"),
            Node::SoftBreak => self.output.push('\n'),
            Node::Link {
                url,
                title,
                children,
            } => self.link(url, title, children),
            Node::Image { url, title, alt } => {
                write!(
                    self.output,
                    r#"<img src="{}" alt="{}""#,
                    escape_html(url),
                    escape_html(alt)
                )
                .unwrap();
                if !title.is_empty() {
                    write!(self.output, r#" title="{}""#, escape_html(title)).unwrap();
                }
                self.output.push('>');
            }
            Node::Table { align, children } => self.table(align, children),
            // Rows and cells are written by `table`; a detached one still renders.
            Node::TableRow { children } => self.wrap("tr", children),
            Node::TableCell { children } => self.wrap("td", children),
        }
    }

    fn wrap(&mut self, tag: &str, children: &[Node]) {
        write!(self.output, "<{tag}>").unwrap();
        self.children(children, false);
        write!(self.output, "</{tag}>").unwrap();
    }

    fn heading(&mut self, depth: u8, id: Option<&str>, children: &[Node]) {
        match id {
            Some(id) => {
                let id = escape_html(id);
                write!(self.output, r#"<h{depth} id="{id}">"#).unwrap();
                if self.options.autolink_headings {
                    write!(
                        self.output,
                        r##"<a aria-hidden="true" tabindex="-1" href="#{id}">{AUTOLINK_ICON}</a>"##
                    )
                    .unwrap();
                }
            }
            None => write!(self.output, "<h{depth}>").unwrap(),
        }
        self.children(children, false);
        write!(self.output, "</h{depth}>").unwrap();
    }

    fn link(&mut self, url: &str, title: &str, children: &[Node]) {
        write!(self.output, r#"<a href="{}""#, escape_html(url)).unwrap();
        if !title.is_empty() {
            write!(self.output, r#" title="{}""#, escape_html(title)).unwrap();
        }
        if let Some(external) = &self.options.external_links
            && is_external(url)
        {
            if !external.rel.is_empty() {
                write!(
                    self.output,
                    r#" rel="{}""#,
                    escape_html(&external.rel.join(" "))
                )
                .unwrap();
            }
            if let Some(target) = &external.target {
                write!(self.output, r#" target="{}""#, escape_html(target)).unwrap();
            }
        }
        self.output.push('>');
        self.children(children, false);
        self.output.push_str("</a>");
    }

    fn table(&mut self, align: &[ColumnAlign], rows: &[Node]) {
        self.output.push_str("<table>");
        for (index, row) in rows.iter().enumerate() {
            let (tag, section_start) = if index == 0 {
                ("th", "<thead>")
            } else {
                ("td", if index == 1 { "<tbody>" } else { "" })
            };
            self.output.push_str(section_start);
            self.output.push_str("<tr>");
            for (column, cell) in row.children().iter().enumerate() {
                let style = alignment_style(align.get(column).copied());
                write!(self.output, "<{tag}{style}>").unwrap();
                self.children(cell.children(), false);
                write!(self.output, "</{tag}>").unwrap();
            }
            self.output.push_str("</tr>");
            if index == 0 {
                self.output.push_str("</thead>");
            }
        }
        if rows.len() > 1 {
            self.output.push_str("</tbody>");
        }
        self.output.push_str("</table>");
    }
}

fn alignment_style(alignment: Option<ColumnAlign>) -> &'static str {
    match alignment {
        Some(ColumnAlign::Left) => r#" style="text-align: left""#,
        Some(ColumnAlign::Center) => r#" style="text-align: center""#,
        Some(ColumnAlign::Right) => r#" style="text-align: right""#,
        Some(ColumnAlign::None) | None => "",
    }
}

/// Whether a link leaves the site.
fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
