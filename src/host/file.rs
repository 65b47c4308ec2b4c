/// Host backed by a file on disk.
///
/// The prompt answer and cursor are fixed up front; navigation requests are
/// recorded instead of moving a real editor.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex as TokioMutex;
use tracing::info;

use super::{EditorHost, HostError, NavigationRequest};
use crate::document::{Position, TextDocument};
use crate::symbols::{SymbolNode, SymbolParser};

pub struct FileHost {
    path: PathBuf,
    document: TextDocument,
    cursor: Position,
    input: Option<String>,
    parser: Arc<SymbolParser>,
    navigations: TokioMutex<Vec<NavigationRequest>>,
}

impl FileHost {
    /// Open `path` with the cursor at the zero-based `cursor` position.
    pub fn open<P: AsRef<Path>>(
        path: P,
        cursor: Position,
        input: Option<String>,
        parser: Arc<SymbolParser>,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = TextDocument::open(&path)?;
        Ok(Self {
            path,
            document,
            cursor,
            input,
            parser,
            navigations: TokioMutex::new(Vec::new()),
        })
    }

    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    /// Navigation requests received so far, oldest first.
    pub async fn navigations(&self) -> Vec<NavigationRequest> {
        self.navigations.lock().await.clone()
    }

    pub async fn last_navigation(&self) -> Option<NavigationRequest> {
        self.navigations.lock().await.last().cloned()
    }
}

#[async_trait]
impl EditorHost for FileHost {
    async fn prompt_for_text(&self) -> Option<String> {
        self.input.clone()
    }

    fn active_document(&self) -> Option<&TextDocument> {
        Some(&self.document)
    }

    fn cursor_position(&self) -> Position {
        self.cursor
    }

    async fn document_symbols(&self, document: &TextDocument) -> Result<Vec<SymbolNode>, HostError> {
        if document.uri != self.document.uri {
            return Err(HostError::DocumentNotOpen(document.uri.clone()));
        }
        let lang = self.parser.language_for_path(&self.path)?;
        Ok(self.parser.parse_source(&document.text(), lang)?)
    }

    async fn navigate_to(&self, request: NavigationRequest) -> Result<(), HostError> {
        if let Some(foreign) = request
            .locations
            .iter()
            .find(|loc| loc.uri != self.document.uri)
        {
            return Err(HostError::DocumentNotOpen(foreign.uri.clone()));
        }
        let line_count = self.document.line_count();
        if let Some(beyond) = request
            .locations
            .iter()
            .find(|loc| loc.range.start_line_number > line_count || loc.range.end_line_number > line_count)
        {
            return Err(HostError::NavigationRejected(format!(
                "line {} is beyond the end of {} ({line_count} lines)",
                beyond.range.start_line_number.max(beyond.range.end_line_number),
                self.document.uri
            )));
        }
        for loc in &request.locations {
            info!(
                uri = %loc.uri,
                line = loc.range.start_line_number,
                "navigating"
            );
        }
        self.navigations.lock().await.push(request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavigationMode;
    use crate::host::{LineRange, Location};
    use tempfile::tempdir;

    fn open_host(content: &str) -> (tempfile::TempDir, FileHost) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.rs");
        std::fs::write(&path, content).unwrap();
        let parser = Arc::new(SymbolParser::new().unwrap());
        let host = FileHost::open(&path, Position::new(0, 0), None, parser).unwrap();
        (dir, host)
    }

    fn request(host: &FileHost, uri: &str, line: u32) -> NavigationRequest {
        NavigationRequest {
            uri: host.document().uri.clone(),
            position: Position::new(0, 0),
            locations: vec![Location {
                uri: uri.to_string(),
                range: LineRange::line(line),
            }],
            mode: NavigationMode::Goto,
            no_result_message: "none".to_string(),
        }
    }

    #[tokio::test]
    async fn test_navigation_within_document_recorded() {
        let (_dir, host) = open_host("fn a() {}\nfn b() {}\n");
        let uri = host.document().uri.clone();
        host.navigate_to(request(&host, &uri, 3)).await.unwrap();
        assert_eq!(host.navigations().await.len(), 1);
    }

    #[tokio::test]
    async fn test_navigation_beyond_last_line_rejected() {
        let (_dir, host) = open_host("fn a() {}\nfn b() {}\n");
        let uri = host.document().uri.clone();
        let err = host.navigate_to(request(&host, &uri, 4)).await.unwrap_err();
        assert!(matches!(err, HostError::NavigationRejected(_)));
        assert!(host.navigations().await.is_empty());
    }

    #[tokio::test]
    async fn test_navigation_to_other_document_rejected() {
        let (_dir, host) = open_host("fn a() {}\n");
        let err = host
            .navigate_to(request(&host, "file:///elsewhere.rs", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::DocumentNotOpen(_)));
    }
}
