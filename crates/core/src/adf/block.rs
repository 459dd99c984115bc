use super::inline::render_inline_children;
use super::marks::MarkStack;
use super::model::{Block, CodeBlockAttrs, HeadingAttrs, Inline, ListItem};
use super::source::{SourceKind, SourceNode};

/// Convert one block-level node into an ADF block.
///
/// Returns `None` for nodes that produce nothing, such as a paragraph without
/// inline content. Unknown block kinds are treated as paragraphs.
pub fn convert_block<N: SourceNode>(node: &N) -> Option<Block> {
    match node.kind() {
        SourceKind::Heading { level } => Some(Block::Heading {
            attrs: HeadingAttrs { level },
            content: render_inline_children(node, &MarkStack::new()),
        }),
        SourceKind::FencedCode { info, body } => Some(code_block(language(&info), body)),
        SourceKind::IndentedCode { body } => Some(code_block(None, body)),
        SourceKind::BlockQuote => Some(Block::Blockquote {
            content: convert_children(node),
        }),
        SourceKind::List { ordered } => {
            let content = list_items(node);
            if ordered {
                Some(Block::OrderedList { content })
            } else {
                Some(Block::BulletList { content })
            }
        }
        SourceKind::ThematicBreak => Some(Block::Rule),
        _ => paragraph(node),
    }
}

/// Convert every child of `node`, dropping the ones that produce nothing
pub fn convert_children<N: SourceNode>(node: &N) -> Vec<Block> {
    node.child_nodes().iter().filter_map(convert_block).collect()
}

fn paragraph<N: SourceNode>(node: &N) -> Option<Block> {
    let content = render_inline_children(node, &MarkStack::new());
    if content.is_empty() {
        None
    } else {
        Some(Block::Paragraph { content })
    }
}

fn list_items<N: SourceNode>(node: &N) -> Vec<ListItem> {
    node.child_nodes()
        .iter()
        .filter(|child| child.kind() == SourceKind::ListItem)
        .map(|item| ListItem {
            content: convert_children(item),
        })
        .collect()
}

fn code_block(language: Option<String>, body: String) -> Block {
    Block::CodeBlock {
        attrs: language.map(|language| CodeBlockAttrs { language }),
        content: Inline::text(body, Vec::new()).into_iter().collect(),
    }
}

/// Language of a fenced block: the first word of its info string
fn language(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_string)
}
