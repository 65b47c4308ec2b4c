/// MCP Tool handlers for closest-symbol.
///
/// 1. closest_symbol   – jump to a line number or the closest matching line
/// 2. document_symbols – symbol tree of a source file
use crate::document::TextDocument;
use crate::host::FileHost;
use crate::mcp::server::McpContext;
use crate::navigator::{Navigator, cursor_from_one_based};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{ErrorData as McpError, handler::server::tool::ToolRouter, model::*, tool, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::Path;

// ── Parameter structs ────────────────────────────────────────────────

#[derive(Deserialize, JsonSchema)]
struct ClosestSymbolParams {
    /// Path to the source file
    filepath: String,
    /// Cursor line (1-based)
    line: u32,
    /// Cursor column (1-based, default: 1)
    column: Option<u32>,
    /// Fuzzy pattern to look for, or a line number to jump to
    input: String,
}

#[derive(Deserialize, JsonSchema)]
struct FilepathParam {
    /// Path to the source file
    filepath: String,
}

// ── Response helpers ─────────────────────────────────────────────────

fn json_result(value: serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&value).unwrap_or_default(),
    )]))
}

fn error_result(msg: &str) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.to_string())]))
}

// ── Tool implementations ─────────────────────────────────────────────

#[derive(Clone)]
pub struct AppTools {
    pub ctx: McpContext,
    pub tool_router: ToolRouter<Self>,
}

impl ServerHandler for AppTools {}

#[tool_router]
impl AppTools {
    pub fn new(ctx: McpContext) -> Self {
        Self {
            ctx,
            tool_router: Self::tool_router(),
        }
    }

    // ── Tool 1: closest_symbol ──────────────────────────────────────

    #[tool(
        description = "Find the line in the function around the cursor whose token best matches a fuzzy pattern (ties go to the line nearest the cursor). A numeric input jumps to that line instead. Returns the outcome and the navigation request."
    )]
    async fn closest_symbol(
        &self,
        params: Parameters<ClosestSymbolParams>,
    ) -> Result<CallToolResult, McpError> {
        let p = params.0;
        if p.filepath.is_empty() {
            return error_result("filepath is required");
        }
        if p.line == 0 {
            return error_result("line is 1-based and must be positive");
        }

        let path = Path::new(&p.filepath);
        if !path.exists() {
            return error_result(&format!("file not found: {}", p.filepath));
        }

        let cursor = cursor_from_one_based(p.line, p.column.unwrap_or(1));
        let host = FileHost::open(path, cursor, Some(p.input), self.ctx.parser.clone())
            .map_err(|e| McpError::internal_error(format!("open failed: {e}"), None))?;

        let outcome = Navigator::new(&host, self.ctx.config.navigation.clone())
            .run()
            .await
            .map_err(|e| McpError::internal_error(format!("{e}"), None))?;

        json_result(serde_json::json!({
            "result": outcome,
            "navigation": host.last_navigation().await,
        }))
    }

    // ── Tool 2: document_symbols ────────────────────────────────────

    #[tool(
        description = "List the symbol tree (functions, containers, other declarations) of a source file. Languages: Go, Python, TypeScript, JavaScript, Rust"
    )]
    async fn document_symbols(
        &self,
        params: Parameters<FilepathParam>,
    ) -> Result<CallToolResult, McpError> {
        let filepath = &params.0.filepath;
        if filepath.is_empty() {
            return error_result("filepath is required");
        }

        let path = Path::new(filepath);
        if !path.exists() {
            return error_result(&format!("file not found: {filepath}"));
        }

        let symbols = self
            .ctx
            .parser
            .parse_file(path)
            .map_err(|e| McpError::internal_error(format!("parse failed: {e}"), None))?;
        let document = TextDocument::open(path)
            .map_err(|e| McpError::internal_error(format!("{e}"), None))?;

        json_result(serde_json::json!({
            "uri": document.uri,
            "line_count": document.line_count(),
            "symbols": symbols,
        }))
    }
}
