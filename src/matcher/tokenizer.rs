/// Splits a line of source text into candidate tokens.
///
/// Tokens are separated by single spaces, so runs of spaces produce empty
/// tokens. Common declaration/flow keywords are discarded since they never
/// name the thing the user is looking for.
pub const KEYWORDS: [&str; 6] = ["let", "var", "to", "const", "await", "return"];

#[must_use]
pub fn is_keyword(token: &str) -> bool {
    KEYWORDS.contains(&token)
}

/// Trim `line` and split it into non-keyword tokens, preserving order.
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    line.split(' ').filter(|token| !is_keyword(token)).collect()
}
