//! # closest-symbol — fuzzy in-function navigation
//!
//! Given a fuzzy pattern, finds the line in the function around the cursor
//! whose token best matches it (ties go to the line nearest the cursor) and
//! asks the editor to jump there. Numeric input jumps to that line instead.
//!
//! ## Architecture
//!
//! - **[`matcher`]** — Tokenizer, bigram similarity, closest-match tracker
//! - **[`locator`]** — Enclosing function lookup in a document symbol tree
//! - **[`navigator`]** — Input dispatch and navigation requests
//! - **[`host`]** — Editor ports (`EditorHost`) and a file-backed host
//! - **[`symbols`]** — Symbol trees built with Tree-sitter
//! - **[`document`]** — Positions, ranges and text lines
//! - **[`config`]** — Configuration loading and validation
//! - **[`mcp`]** — MCP server exposing the navigator as tools (stdio via rmcp)

pub mod config;
pub mod document;
pub mod host;
pub mod locator;
pub mod matcher;
pub mod mcp;
pub mod navigator;
pub mod symbols;
