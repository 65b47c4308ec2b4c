/// Entry point: prompt, then jump to a line number or to the closest
/// matching line in the enclosing function.
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::NavigationConfig;
use crate::document::{Position, Range, TextDocument};
use crate::host::{EditorHost, HostError, LineRange, Location, NavigationRequest};
use crate::locator::enclosing_block;
use crate::matcher::{CandidateMatch, MatchTracker};

#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("no active document")]
    NoActiveDocument,

    #[error("document symbol query failed: {0}")]
    Symbols(#[source] HostError),

    #[error("navigation failed: {0}")]
    Navigation(#[source] HostError),
}

/// How an invocation ended. Only the jump variants navigate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Cancelled,
    LineJump { line: u32 },
    SymbolJump { candidate: CandidateMatch },
    NoEnclosingBlock,
    NoMatch,
}

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)$").expect("valid regex")
});
static RADIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0(?:[xX][0-9a-fA-F]+|[oO][0-7]+|[bB][01]+)$").expect("valid regex"));

/// Numeric value of `input` under JavaScript `Number()` coercion, or `None`
/// when that would be NaN. Empty input is never numeric.
#[must_use]
pub fn parse_number(input: &str) -> Option<f64> {
    if input.is_empty() {
        return None;
    }
    let trimmed = input.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if RADIX.is_match(trimmed) {
        let radix = match trimmed.as_bytes()[1] {
            b'x' | b'X' => 16,
            b'o' | b'O' => 8,
            _ => 2,
        };
        return Some(trimmed[2..].chars().fold(0.0, |acc, c| {
            acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
        }));
    }
    if DECIMAL.is_match(trimmed) {
        return trimmed.parse::<f64>().ok();
    }
    None
}

/// Scan every non-blank line of `block` and return the best match for
/// `pattern`. The tracker lives only for this scan.
#[must_use]
pub fn scan_block(
    document: &TextDocument,
    block: Range,
    pattern: &str,
    cursor_line: u32,
) -> Option<CandidateMatch> {
    let mut tracker = MatchTracker::new();
    for line_number in block.start.line..=block.end.line {
        let Some(line) = document.line_at(line_number) else {
            break;
        };
        if !line.is_empty_or_whitespace() {
            tracker.update(pattern, line, cursor_line);
        }
    }
    tracker.into_best()
}

pub struct Navigator<'a, H: EditorHost + ?Sized> {
    host: &'a H,
    navigation: NavigationConfig,
}

impl<'a, H: EditorHost + ?Sized> Navigator<'a, H> {
    pub fn new(host: &'a H, navigation: NavigationConfig) -> Self {
        Self { host, navigation }
    }

    /// Prompt the user and act on the answer.
    pub async fn run(&self) -> Result<Outcome, NavigatorError> {
        match self.host.prompt_for_text().await {
            Some(input) if !input.is_empty() => self.navigate(&input).await,
            _ => {
                debug!("prompt cancelled");
                Ok(Outcome::Cancelled)
            }
        }
    }

    /// Act on already collected input: numbers jump to that line, anything
    /// else is a fuzzy pattern.
    pub async fn navigate(&self, input: &str) -> Result<Outcome, NavigatorError> {
        if input.is_empty() {
            return Ok(Outcome::Cancelled);
        }
        if let Some(number) = parse_number(input) {
            // Saturating: negatives land on 0, fractions truncate.
            let line = number as u32;
            self.goto_line(line).await?;
            return Ok(Outcome::LineJump { line });
        }
        self.goto_closest_symbol(input).await
    }

    /// Jump straight to the one-based `line`.
    pub async fn goto_line(&self, line: u32) -> Result<(), NavigatorError> {
        let document = self
            .host
            .active_document()
            .ok_or(NavigatorError::NoActiveDocument)?;
        self.send(document, LineRange::line(line)).await
    }

    pub async fn goto_closest_symbol(&self, pattern: &str) -> Result<Outcome, NavigatorError> {
        let document = self
            .host
            .active_document()
            .ok_or(NavigatorError::NoActiveDocument)?;
        let cursor = self.host.cursor_position();

        let symbols = self
            .host
            .document_symbols(document)
            .await
            .map_err(NavigatorError::Symbols)?;

        let Some(block) = enclosing_block(cursor, &symbols) else {
            debug!(line = cursor.line, "cursor is not inside a function");
            return Ok(Outcome::NoEnclosingBlock);
        };

        let Some(best) = scan_block(document, block, pattern, cursor.line) else {
            debug!(pattern, "no line in block matched");
            return Ok(Outcome::NoMatch);
        };

        info!(
            pattern,
            symbol = %best.symbol,
            rating = best.rating,
            line = best.range.start.line + 1,
            "closest symbol found"
        );
        self.send(document, LineRange::from_range(best.range)).await?;
        Ok(Outcome::SymbolJump { candidate: best })
    }

    async fn send(&self, document: &TextDocument, range: LineRange) -> Result<(), NavigatorError> {
        let request = NavigationRequest {
            uri: document.uri.clone(),
            position: self.host.cursor_position(),
            locations: vec![Location {
                uri: document.uri.clone(),
                range,
            }],
            mode: self.navigation.mode,
            no_result_message: self.navigation.no_result_message.clone(),
        };
        self.host
            .navigate_to(request)
            .await
            .map_err(NavigatorError::Navigation)
    }
}

/// Cursor position as seen by the navigator, for callers that only have
/// one-based coordinates.
#[must_use]
pub fn cursor_from_one_based(line: u32, column: u32) -> Position {
    Position::new(line.saturating_sub(1), column.saturating_sub(1))
}
