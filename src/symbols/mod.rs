/// Document symbol trees and the tree-sitter provider that builds them.
pub mod languages;
pub mod parser;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Range;

pub use parser::SymbolParser;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("invalid symbol query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    #[error("incompatible grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to parse source")]
    ParseFailed,

    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

/// What a symbol is, as far as block location is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Container { children: Vec<SymbolNode> },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolNode {
    pub name: String,
    pub range: Range,
    #[serde(flatten)]
    pub kind: SymbolKind,
}

impl SymbolNode {
    pub fn function(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            range,
            kind: SymbolKind::Function,
        }
    }

    pub fn container(name: impl Into<String>, range: Range, children: Vec<SymbolNode>) -> Self {
        Self {
            name: name.into(),
            range,
            kind: SymbolKind::Container { children },
        }
    }

    pub fn other(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            range,
            kind: SymbolKind::Other,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[SymbolNode] {
        match &self.kind {
            SymbolKind::Container { children } => children,
            _ => &[],
        }
    }
}
