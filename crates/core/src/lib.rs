//! Core library for jiramcp
//!
//! This crate implements the **Functional Core** of the jiramcp application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`jiramcp_core`** (this crate): Pure transformation functions with zero I/O
//! - **`jiramcp`**: HTTP calls, the MCP server and the CLI (the Imperative Shell)
//!
//! Everything here is deterministic and tested with fixture data, no mocking
//! required.
//!
//! # Module Organization
//!
//! - [`adf`]: Markdown to Atlassian Document Format conversion, and ADF back to text
//! - [`atlassian`]: Jira API models, response transforms and request payloads
//!
//! # Example Usage
//!
//! ```rust
//! use jiramcp_core::adf::markdown_to_adf;
//!
//! let doc = markdown_to_adf("Hello **world**").to_value();
//!
//! assert_eq!(doc["type"], "doc");
//! assert_eq!(doc["content"][0]["content"][1]["marks"][0]["type"], "strong");
//! ```

pub mod adf;
pub mod atlassian;
