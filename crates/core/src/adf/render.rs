//! Render ADF (Atlassian Document Format) to readable text
//!
//! Works on raw JSON rather than the typed model: documents fetched from Jira
//! contain node types (mentions, emoji, panels, ...) the converter never
//! produces. Unknown nodes degrade to the text of their children.

use serde_json::Value;

/// Helper function to convert description (which can be a string or ADF JSON) to a plain string
///
/// # Arguments
/// * `value` - The description or comment body field from the Jira API
///
/// # Returns
/// * `Option<String>` - Extracted text, or None if empty/invalid
pub fn extract_description(value: Option<Value>) -> Option<String> {
    value.and_then(|v| match &v {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => {
            // Check if this is an ADF (Atlassian Document Format) object
            if v.get("type").and_then(|t| t.as_str()) == Some("doc") {
                render_adf(&v)
            } else {
                None
            }
        }
        _ => None,
    })
}

/// Render an ADF document to readable text
///
/// # Returns
/// * `Option<String>` - Rendered text, or None if the document holds no text
pub fn render_adf(value: &Value) -> Option<String> {
    let mut output = String::new();

    for node in children(value) {
        if let Some(rendered) = render_block(node, 0) {
            output.push_str(&rendered);
            if !rendered.ends_with('\n') {
                output.push('\n');
            }
        }
    }

    let output = output.trim();
    if output.is_empty() {
        None
    } else {
        Some(output.to_string())
    }
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(|c| c.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn attr<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
    node.get("attrs").and_then(|a| a.get(name))
}

/// Render a block node recursively
fn render_block(node: &Value, depth: usize) -> Option<String> {
    let node_type = node.get("type")?.as_str()?;

    match node_type {
        "paragraph" => Some(format!("{}\n", render_inline(node))),
        "heading" => {
            let level = attr(node, "level")
                .and_then(|l| l.as_u64())
                .unwrap_or(1)
                .clamp(1, 6) as usize;
            Some(format!("{} {}\n", "#".repeat(level), render_inline(node).trim()))
        }
        "bulletList" => Some(render_list(node, depth, false)),
        "orderedList" => Some(render_list(node, depth, true)),
        "codeBlock" => {
            let language = attr(node, "language")
                .and_then(|l| l.as_str())
                .unwrap_or_default();
            Some(format!(
                "```{}\n{}\n```\n",
                language,
                render_inline(node).trim_end_matches('\n')
            ))
        }
        "blockquote" => {
            let inner: String = children(node)
                .iter()
                .filter_map(|child| render_block(child, 0))
                .collect();
            let quoted: Vec<String> = inner
                .trim_end()
                .lines()
                .map(|line| format!("> {line}").trim_end().to_string())
                .collect();
            Some(format!("{}\n", quoted.join("\n")))
        }
        "rule" => Some("---\n".to_string()),
        _ => {
            // Unknown block: keep whatever text it carries
            let text: String = children(node)
                .iter()
                .filter_map(|child| render_block(child, depth).or_else(|| render_leaf(child)))
                .collect();
            if text.is_empty() {
                render_leaf(node)
            } else {
                Some(text)
            }
        }
    }
}

fn render_list(node: &Value, depth: usize, ordered: bool) -> String {
    let indent = "  ".repeat(depth);
    let mut text = String::new();

    for (index, item) in children(node).iter().enumerate() {
        let marker = if ordered {
            format!("{}. ", index + 1)
        } else {
            "• ".to_string()
        };

        let body: String = children(item)
            .iter()
            .filter_map(|child| render_block(child, depth + 1))
            .collect();

        text.push_str(&indent);
        text.push_str(&marker);
        text.push_str(body.trim_start());
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }

    text
}

/// Concatenate the inline children of a block
fn render_inline(node: &Value) -> String {
    children(node).iter().filter_map(render_leaf).collect()
}

fn render_leaf(node: &Value) -> Option<String> {
    let node_type = node.get("type")?.as_str()?;

    match node_type {
        "text" => node
            .get("text")
            .and_then(|t| t.as_str())
            .map(|text| text.to_string()),
        "hardBreak" => Some("\n".to_string()),
        "mention" => attr(node, "text")
            .and_then(|t| t.as_str())
            .map(|name| format!("@{}", name.trim_start_matches('@'))),
        "emoji" => attr(node, "shortName")
            .and_then(|t| t.as_str())
            .map(|name| name.to_string()),
        "inlineCard" => attr(node, "url")
            .and_then(|t| t.as_str())
            .map(|url| url.to_string()),
        _ => {
            let text = render_inline(node);
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
    }
}
