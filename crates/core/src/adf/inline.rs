use super::marks::MarkStack;
use super::model::{Inline, Mark};
use super::source::{SourceKind, SourceNode};

/// Render the inline children of `node` into flat ADF inline nodes
pub fn render_inline_children<N: SourceNode>(node: &N, marks: &MarkStack) -> Vec<Inline> {
    node.child_nodes()
        .iter()
        .flat_map(|child| render_inline(child, marks))
        .collect()
}

/// Render a single inline node, threading the marks inherited from its
/// ancestors. Every mark added here goes onto a fresh stack.
pub fn render_inline<N: SourceNode>(node: &N, marks: &MarkStack) -> Vec<Inline> {
    match node.kind() {
        SourceKind::Text(text) => Inline::text(text, marks.to_vec()).into_iter().collect(),

        // Soft breaks are emitted as hard breaks, same as explicit ones.
        SourceKind::SoftBreak | SourceKind::HardBreak => vec![Inline::HardBreak],

        SourceKind::Emphasis { level } => {
            let mark = if level == 2 { Mark::Strong } else { Mark::Em };
            render_inline_children(node, &marks.with(mark))
        }

        SourceKind::Strikethrough => render_inline_children(node, &marks.with(Mark::Strike)),

        SourceKind::CodeSpan(code) => Inline::text(code, marks.with(Mark::Code).to_vec())
            .into_iter()
            .collect(),

        SourceKind::Link { destination } => {
            render_inline_children(node, &marks.with(Mark::link(destination)))
        }

        SourceKind::AutoLink { text, url } => {
            let marks = marks.with(Mark::link(url));
            Inline::text(text, marks.to_vec()).into_iter().collect()
        }

        SourceKind::Image { destination, alt } => {
            let alt = alt.trim();
            let text = if alt.is_empty() {
                destination.clone()
            } else {
                alt.to_string()
            };
            let marks = marks.with(Mark::link(destination));
            Inline::text(text, marks.to_vec()).into_iter().collect()
        }

        _ => render_inline_children(node, marks),
    }
}
