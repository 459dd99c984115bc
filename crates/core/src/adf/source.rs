//! Parse-tree boundary for the ADF converter
//!
//! The converter never touches comrak types directly. It walks anything that
//! implements [`SourceNode`]: a node kind with its per-kind accessors, plus
//! ordered children. The comrak implementation lives at the bottom of this
//! file.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};

/// The part of a CommonMark + GFM parse tree the converter consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    // Blocks
    Paragraph,
    Heading { level: u8 },
    FencedCode { info: String, body: String },
    IndentedCode { body: String },
    BlockQuote,
    List { ordered: bool },
    ListItem,
    ThematicBreak,

    // Inlines
    Text(String),
    SoftBreak,
    HardBreak,
    /// Level 1 is `*em*`, level 2 is `**strong**`
    Emphasis { level: u8 },
    Strikethrough,
    CodeSpan(String),
    Link { destination: String },
    /// `<url>` or `<email>`: `text` is the literal label, `url` the destination
    AutoLink { text: String, url: String },
    Image { destination: String, alt: String },

    /// Anything else; the converter descends into its children
    Other,
}

/// A node of a parsed markdown document
pub trait SourceNode: Sized {
    fn kind(&self) -> SourceKind;

    /// Direct children in source order
    fn child_nodes(&self) -> Vec<Self>;
}

/// comrak options matching the supported markdown subset: CommonMark plus GFM
/// strikethrough. Bare-URL autolinking and tables stay off.
pub fn parser_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options
}

/// Parse `markdown` with comrak and hand the root to `f`.
///
/// The comrak arena only lives for the duration of the call.
pub fn with_parsed<R>(markdown: &str, f: impl for<'a> FnOnce(&'a AstNode<'a>) -> R) -> R {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &parser_options());
    f(root)
}

impl<'a> SourceNode for &'a AstNode<'a> {
    fn kind(&self) -> SourceKind {
        let node = *self;
        let data = node.data.borrow();

        match &data.value {
            NodeValue::Paragraph => SourceKind::Paragraph,
            NodeValue::Heading(heading) => SourceKind::Heading {
                level: heading.level,
            },
            NodeValue::CodeBlock(code) if code.fenced => SourceKind::FencedCode {
                info: code.info.clone(),
                body: code.literal.clone(),
            },
            NodeValue::CodeBlock(code) => SourceKind::IndentedCode {
                body: code.literal.clone(),
            },
            NodeValue::BlockQuote => SourceKind::BlockQuote,
            NodeValue::List(list) => SourceKind::List {
                ordered: matches!(list.list_type, ListType::Ordered),
            },
            NodeValue::Item(_) => SourceKind::ListItem,
            NodeValue::ThematicBreak => SourceKind::ThematicBreak,
            NodeValue::Text(text) => SourceKind::Text(text.clone()),
            NodeValue::SoftBreak => SourceKind::SoftBreak,
            NodeValue::LineBreak => SourceKind::HardBreak,
            NodeValue::Emph => SourceKind::Emphasis { level: 1 },
            NodeValue::Strong => SourceKind::Emphasis { level: 2 },
            NodeValue::Strikethrough => SourceKind::Strikethrough,
            NodeValue::Code(code) => SourceKind::CodeSpan(code.literal.clone()),
            NodeValue::Link(link) => match autolink_label(node, &link.url) {
                Some(text) => SourceKind::AutoLink {
                    text,
                    url: link.url.clone(),
                },
                None => SourceKind::Link {
                    destination: link.url.clone(),
                },
            },
            NodeValue::Image(link) => SourceKind::Image {
                destination: link.url.clone(),
                alt: collect_text(node),
            },
            _ => SourceKind::Other,
        }
    }

    fn child_nodes(&self) -> Vec<Self> {
        let node = *self;
        node.children().collect()
    }
}

/// comrak parses `<https://example.com>` into an ordinary link whose only
/// child is the URL text. Returns that literal when `node` has this shape.
fn autolink_label<'a>(node: &'a AstNode<'a>, url: &str) -> Option<String> {
    let mut children = node.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    let data = only.data.borrow();
    match &data.value {
        NodeValue::Text(text)
            if text == url || url.strip_prefix("mailto:") == Some(text.as_str()) =>
        {
            Some(text.clone())
        }
        _ => None,
    }
}

/// Plain text of all descendants, used for image alt text
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut output = String::new();
    for child in node.children() {
        collect_text_into(child, &mut output);
    }
    output
}

fn collect_text_into<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_into(child, output);
            }
        }
    }
}
