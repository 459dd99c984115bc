//! Atlassian Document Format (ADF) node types
//!
//! A closed set of typed nodes covering what the markdown converter produces.
//! Serialization follows the Jira wire format: a `type` tag on every node,
//! attributes under `attrs`, children under `content`, styles under `marks`.
//! Empty `content`/`marks` lists and missing `attrs` are left out of the JSON
//! entirely, since Jira treats an absent field differently from an empty one.

use serde::{Deserialize, Serialize};

/// ADF schema version emitted on every document
pub const ADF_VERSION: u32 = 1;

/// Root of an ADF tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "doc")]
pub struct Document {
    pub version: u32,
    pub content: Vec<Block>,
}

impl Document {
    /// Build a document, substituting a single empty paragraph when `content`
    /// is empty so the tree is always accepted by Jira.
    pub fn new(content: Vec<Block>) -> Self {
        let content = if content.is_empty() {
            vec![Block::empty_paragraph()]
        } else {
            content
        };

        Self {
            version: ADF_VERSION,
            content,
        }
    }

    /// Serialize into a JSON value ready to be embedded in a Jira payload
    pub fn to_value(&self) -> serde_json::Value {
        // Every field is a string, integer, or nested node: serialization is infallible.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Block-level ADF node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<CodeBlockAttrs>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    Blockquote {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    BulletList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<ListItem>,
    },
    OrderedList {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<ListItem>,
    },
    Rule,
}

impl Block {
    /// Paragraph without inline content, used as the empty-document fallback
    pub fn empty_paragraph() -> Self {
        Block::Paragraph {
            content: Vec::new(),
        }
    }

    /// Wire name of the node (`"paragraph"`, `"codeBlock"`, ...)
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading { .. } => "heading",
            Block::CodeBlock { .. } => "codeBlock",
            Block::Blockquote { .. } => "blockquote",
            Block::BulletList { .. } => "bulletList",
            Block::OrderedList { .. } => "orderedList",
            Block::Rule => "rule",
        }
    }
}

/// A single entry of a bullet or ordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "listItem")]
pub struct ListItem {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    pub language: String,
}

/// Inline-level ADF node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
}

impl Inline {
    /// Text node with the given marks, or `None` when `text` is empty
    pub fn text(text: impl Into<String>, marks: Vec<Mark>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Inline::Text { text, marks })
        }
    }
}

/// Style annotation attached to a text node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Strike,
    Link { attrs: LinkAttrs },
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            attrs: LinkAttrs { href: href.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}
