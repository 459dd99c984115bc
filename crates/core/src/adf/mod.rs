//! Markdown to Atlassian Document Format (ADF) conversion
//!
//! Jira only accepts comment and description bodies as ADF, a JSON tree of
//! typed block and inline nodes. [`markdown_to_adf`] turns CommonMark (plus
//! GFM strikethrough) into that tree:
//!
//! - [`source`]: the parse-tree surface the converter walks, backed by comrak
//! - [`block`]: maps block nodes (paragraphs, headings, code, quotes, lists, rules)
//! - [`inline`]: flattens inline content into text and hard breaks, stacking marks
//! - [`marks`]: the copy-on-extend mark stack
//! - [`model`]: the typed ADF nodes and their wire format
//! - [`render`]: the reverse direction, ADF to readable text
//!
//! Conversion is total: any input yields a valid document with at least one
//! block.

pub mod block;
pub mod inline;
pub mod marks;
pub mod model;
pub mod render;
pub mod source;

pub use model::{Block, Document, Inline, ListItem, Mark};
pub use render::{extract_description, render_adf};

use source::SourceNode;

/// Convert a markdown string to an ADF document
///
/// # Arguments
/// * `markdown` - CommonMark text, optionally using `~~strikethrough~~`
///
/// # Returns
/// * `Document` - The ADF tree; never empty
pub fn markdown_to_adf(markdown: &str) -> Document {
    source::with_parsed(markdown, |root| assemble(&root))
}

/// Build a document from the top-level children of a parsed tree
pub fn assemble<N: SourceNode>(root: &N) -> Document {
    Document::new(block::convert_children(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn convert(markdown: &str) -> Value {
        markdown_to_adf(markdown).to_value()
    }

    /// Every text node of `value`, depth first, as (text, mark types)
    fn text_nodes(value: &Value) -> Vec<(String, Vec<String>)> {
        let mut found = Vec::new();
        collect_text_nodes(value, &mut found);
        found
    }

    fn collect_text_nodes(value: &Value, found: &mut Vec<(String, Vec<String>)>) {
        if value["type"] == "text" {
            let marks = value["marks"]
                .as_array()
                .map(|marks| {
                    marks
                        .iter()
                        .map(|m| m["type"].as_str().unwrap_or_default().to_string())
                        .collect()
                })
                .unwrap_or_default();
            found.push((value["text"].as_str().unwrap_or_default().to_string(), marks));
        }
        if let Some(content) = value["content"].as_array() {
            for child in content {
                collect_text_nodes(child, found);
            }
        }
    }

    #[test]
    fn test_empty_input_yields_single_empty_paragraph() {
        assert_eq!(
            convert(""),
            json!({"version": 1, "type": "doc", "content": [{"type": "paragraph"}]})
        );
    }

    #[test]
    fn test_whitespace_only_input_yields_single_empty_paragraph() {
        assert_eq!(
            convert("   \n\n\t\n"),
            json!({"version": 1, "type": "doc", "content": [{"type": "paragraph"}]})
        );
    }

    #[test]
    fn test_headings() {
        let doc = convert("# Heading 1\n\n## Heading 2\n\n### Heading 3\n");

        let content = doc["content"].as_array().unwrap();
        assert_eq!(content.len(), 3);
        for (block, level) in content.iter().zip([1, 2, 3]) {
            assert_eq!(block["type"], "heading");
            assert_eq!(block["attrs"]["level"], level);
        }
        assert_eq!(content[0]["content"][0]["text"], "Heading 1");
    }

    #[test]
    fn test_bold_italic_code() {
        let doc = convert("This is **bold** and *italic* and `code`.\n");

        assert_eq!(doc["content"].as_array().unwrap().len(), 1);
        assert_eq!(doc["content"][0]["type"], "paragraph");

        let nodes = text_nodes(&doc);
        let with_mark = |mark: &str| -> Vec<String> {
            nodes
                .iter()
                .filter(|(_, marks)| marks.iter().any(|m| m == mark))
                .map(|(text, _)| text.clone())
                .collect()
        };
        assert_eq!(with_mark("strong"), vec!["bold"]);
        assert_eq!(with_mark("em"), vec!["italic"]);
        assert_eq!(with_mark("code"), vec!["code"]);
    }

    #[test]
    fn test_bullet_list() {
        let doc = convert("- item one\n- item two\n- item three\n");

        let list = &doc["content"][0];
        assert_eq!(doc["content"].as_array().unwrap().len(), 1);
        assert_eq!(list["type"], "bulletList");
        let items = list["content"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| item["type"] == "listItem"));
        assert_eq!(items[1]["content"][0]["content"][0]["text"], "item two");
    }

    #[test]
    fn test_ordered_list() {
        let doc = convert("1. first\n2. second\n3. third\n");

        let list = &doc["content"][0];
        assert_eq!(list["type"], "orderedList");
        assert_eq!(list["content"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_nested_list_inside_item() {
        let doc = convert("- outer\n  - inner\n");

        let item = &doc["content"][0]["content"][0];
        assert_eq!(item["content"][0]["type"], "paragraph");
        assert_eq!(item["content"][1]["type"], "bulletList");
        assert_eq!(
            item["content"][1]["content"][0]["content"][0]["content"][0]["text"],
            "inner"
        );
    }

    #[test]
    fn test_fenced_code_block() {
        let doc = convert("```sql\nSELECT * FROM users;\n```\n");

        assert_eq!(
            doc["content"],
            json!([{
                "type": "codeBlock",
                "attrs": {"language": "sql"},
                "content": [{"type": "text", "text": "SELECT * FROM users;\n"}]
            }])
        );
    }

    #[test]
    fn test_fenced_code_block_without_language() {
        let doc = convert("```\nhello world\n```\n");

        let block = &doc["content"][0];
        assert_eq!(block["type"], "codeBlock");
        assert!(block.get("attrs").is_none());
        assert_eq!(block["content"][0]["text"], "hello world\n");
    }

    #[test]
    fn test_empty_fenced_code_block() {
        let doc = convert("```python\n```\n");

        assert_eq!(
            doc["content"],
            json!([{"type": "codeBlock", "attrs": {"language": "python"}}])
        );
    }

    #[test]
    fn test_code_block_keeps_inner_newlines() {
        let doc = convert("```\nline 1\n\nline 3\n```\n");

        assert_eq!(doc["content"][0]["content"][0]["text"], "line 1\n\nline 3\n");
    }

    #[test]
    fn test_indented_code_block() {
        let doc = convert("Intro\n\n    let x = 1;\n    let y = 2;\n");

        let block = &doc["content"][1];
        assert_eq!(block["type"], "codeBlock");
        assert!(block.get("attrs").is_none());
        assert_eq!(block["content"][0]["text"], "let x = 1;\nlet y = 2;\n");
    }

    #[test]
    fn test_horizontal_rule() {
        let doc = convert("Above\n\n---\n\nBelow\n");

        let rules: Vec<&Value> = doc["content"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|block| block["type"] == "rule")
            .collect();
        assert_eq!(rules, vec![&json!({"type": "rule"})]);
        assert_eq!(doc["content"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_link() {
        let doc = convert("[Google](https://google.com)");

        assert_eq!(
            doc["content"][0]["content"],
            json!([{
                "type": "text",
                "text": "Google",
                "marks": [{"type": "link", "attrs": {"href": "https://google.com"}}]
            }])
        );
    }

    #[test]
    fn test_bold_inside_link() {
        let doc = convert("[**Docs**](https://example.com/docs)");

        assert_eq!(
            doc["content"][0]["content"][0]["marks"],
            json!([
                {"type": "link", "attrs": {"href": "https://example.com/docs"}},
                {"type": "strong"}
            ])
        );
    }

    #[test]
    fn test_autolink() {
        let doc = convert("See <https://example.com/a?b=c>");

        assert_eq!(
            doc["content"][0]["content"],
            json!([
                {"type": "text", "text": "See "},
                {
                    "type": "text",
                    "text": "https://example.com/a?b=c",
                    "marks": [{"type": "link", "attrs": {"href": "https://example.com/a?b=c"}}]
                }
            ])
        );
    }

    #[test]
    fn test_email_links_keep_mailto_href() {
        let autolink = convert("<foo@bar.com>");
        let explicit = convert("[foo@bar.com](mailto:foo@bar.com)");

        let expected = json!([{
            "type": "text",
            "text": "foo@bar.com",
            "marks": [{"type": "link", "attrs": {"href": "mailto:foo@bar.com"}}]
        }]);
        assert_eq!(autolink["content"][0]["content"], expected);
        assert_eq!(explicit["content"][0]["content"], expected);
    }

    #[test]
    fn test_image_becomes_linked_text() {
        let doc = convert("![Architecture](https://example.com/arch.png) and ![](https://example.com/x.png)");

        let nodes = &doc["content"][0]["content"];
        assert_eq!(nodes[0]["text"], "Architecture");
        assert_eq!(nodes[0]["marks"][0]["attrs"]["href"], "https://example.com/arch.png");
        assert_eq!(nodes[2]["text"], "https://example.com/x.png");
        assert_eq!(nodes[2]["marks"][0]["attrs"]["href"], "https://example.com/x.png");
    }

    #[test]
    fn test_strikethrough() {
        let doc = convert("~~deprecated~~ api");

        assert_eq!(
            doc["content"][0]["content"][0],
            json!({"type": "text", "text": "deprecated", "marks": [{"type": "strike"}]})
        );
    }

    #[test]
    fn test_soft_break_becomes_hard_break() {
        let doc = convert("line one\nline two");

        assert_eq!(
            doc["content"][0]["content"],
            json!([
                {"type": "text", "text": "line one"},
                {"type": "hardBreak"},
                {"type": "text", "text": "line two"}
            ])
        );
    }

    #[test]
    fn test_hard_break() {
        let doc = convert("line one  \nline two");

        assert_eq!(doc["content"][0]["content"][1], json!({"type": "hardBreak"}));
        assert_eq!(doc["content"][0]["content"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_blockquote() {
        let doc = convert("> quoted *text*\n>\n> - with a list\n");

        let quote = &doc["content"][0];
        assert_eq!(quote["type"], "blockquote");
        assert_eq!(quote["content"][0]["type"], "paragraph");
        assert_eq!(quote["content"][1]["type"], "bulletList");
    }

    #[test]
    fn test_html_block_is_dropped() {
        let doc = convert("<div>\nraw\n</div>\n\nafter\n");

        assert_eq!(doc["content"].as_array().unwrap().len(), 1);
        assert_eq!(doc["content"][0]["content"][0]["text"], "after");
    }

    #[test]
    fn test_sibling_emphasis_marks_are_isolated() {
        let doc = convert("**a** *b* ~~c~~");

        let nodes = text_nodes(&doc);
        assert_eq!(nodes[0], ("a".to_string(), vec!["strong".to_string()]));
        assert_eq!(nodes[2], ("b".to_string(), vec!["em".to_string()]));
        assert_eq!(nodes[4], ("c".to_string(), vec!["strike".to_string()]));
        assert!(nodes[1].1.is_empty());
    }

    #[test]
    fn test_converted_document_renders_back_to_text() {
        let doc = convert("## Plan\n\n1. ship\n2. celebrate\n");

        assert_eq!(
            render_adf(&doc),
            Some("## Plan\n1. ship\n2. celebrate".to_string())
        );
    }

    proptest! {
        #[test]
        fn prop_document_is_never_empty(input in ".*") {
            let doc = convert(&input);

            prop_assert_eq!(doc["type"].as_str(), Some("doc"));
            prop_assert_eq!(doc["version"].as_u64(), Some(1));
            prop_assert!(!doc["content"].as_array().unwrap().is_empty());
        }

        #[test]
        fn prop_conversion_is_deterministic(input in "[-*_`~#>\\[\\]()a-z0-9 \n]{0,64}") {
            prop_assert_eq!(markdown_to_adf(&input), markdown_to_adf(&input));
        }

        #[test]
        fn prop_sibling_spans_do_not_leak_marks(
            left in "[a-z]{1,8}",
            right in "[a-z]{1,8}",
        ) {
            let doc = convert(&format!("**{left}** then *{right}*"));
            let nodes = text_nodes(&doc);

            let left_marks = &nodes.iter().find(|(t, _)| t == &left).unwrap().1;
            let right_marks = &nodes.iter().rev().find(|(t, _)| t == &right).unwrap().1;
            prop_assert_eq!(left_marks, &vec!["strong".to_string()]);
            prop_assert_eq!(right_marks, &vec!["em".to_string()]);
        }

        #[test]
        fn prop_text_nodes_are_never_empty(input in "[-*_`~#>\\[\\]()a-z \n]{0,64}") {
            let doc = convert(&input);

            for (text, _) in text_nodes(&doc) {
                prop_assert!(!text.is_empty());
            }
        }
    }
}
