/// Fuzzy line matching: tokenizing, scoring and closest-match tracking.
pub mod similarity;
pub mod tokenizer;
pub mod tracker;

pub use tracker::{CandidateMatch, MatchTracker};

/// Best-scoring token of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMatch<'a> {
    pub token: &'a str,
    pub rating: f64,
}

/// Pick the token most similar to `pattern`. The earliest token wins among
/// equal ratings; an empty token list has no match.
#[must_use]
pub fn best_token<'a>(pattern: &str, tokens: &[&'a str]) -> Option<TokenMatch<'a>> {
    let mut best: Option<TokenMatch<'a>> = None;
    for &token in tokens {
        let rating = similarity::compare(pattern, token);
        if best.as_ref().is_none_or(|b| rating > b.rating) {
            best = Some(TokenMatch { token, rating });
        }
    }
    best
}

/// Tokenize `line` and score it against `pattern`.
#[must_use]
pub fn score_line<'a>(pattern: &str, line: &'a str) -> Option<TokenMatch<'a>> {
    best_token(pattern, &tokenizer::tokenize(line))
}
