/// Host editor ports: prompt, active document, symbols and navigation.
pub mod file;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::NavigationMode;
use crate::document::{Position, Range, TextDocument};
use crate::symbols::{SymbolError, SymbolNode};

pub use file::FileHost;

#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Symbols(#[from] SymbolError),

    #[error("document is not open: {0}")]
    DocumentNotOpen(String),

    #[error("navigation rejected: {0}")]
    NavigationRejected(String),
}

/// One-based line range handed to the host's "go to locations" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRange {
    pub start_line_number: u32,
    pub start_column: u32,
    pub end_line_number: u32,
    pub end_column: u32,
}

impl LineRange {
    /// A single one-based line.
    #[must_use]
    pub fn line(line_number: u32) -> Self {
        Self {
            start_line_number: line_number,
            start_column: 0,
            end_line_number: line_number,
            end_column: 0,
        }
    }

    /// The lines spanned by a zero-based document range.
    #[must_use]
    pub fn from_range(range: Range) -> Self {
        Self {
            start_line_number: range.start.line + 1,
            start_column: 0,
            end_line_number: range.end.line + 1,
            end_column: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub uri: String,
    pub range: LineRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    /// Document the request originates from.
    pub uri: String,
    /// Cursor position at the time of the request.
    pub position: Position,
    pub locations: Vec<Location>,
    pub mode: NavigationMode,
    pub no_result_message: String,
}

/// Everything the navigator needs from the editor.
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Ask the user for one line of text; `None` when cancelled.
    async fn prompt_for_text(&self) -> Option<String>;

    fn active_document(&self) -> Option<&TextDocument>;

    fn cursor_position(&self) -> Position;

    async fn document_symbols(&self, document: &TextDocument) -> Result<Vec<SymbolNode>, HostError>;

    async fn navigate_to(&self, request: NavigationRequest) -> Result<(), HostError>;
}
