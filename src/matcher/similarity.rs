//! Bigram (Sørensen–Dice) string similarity, backed by `strsim`.

/// Similarity of `first` and `second` in `[0.0, 1.0]`.
///
/// Whitespace is ignored. Equal strings score `1.0`; otherwise strings shorter
/// than two bytes score `0.0`. Each bigram occurrence on one side can be
/// matched by at most one occurrence on the other.
#[must_use]
pub fn compare(first: &str, second: &str) -> f64 {
    strsim::sorensen_dice(first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(compare("computeScore", "computeScore"), 1.0);
    }

    #[test]
    fn test_disjoint() {
        assert_eq!(compare("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_single_characters() {
        assert_eq!(compare("a", "a"), 1.0);
        assert_eq!(compare("a", "b"), 0.0);
        assert_eq!(compare("a", "ab"), 0.0);
        assert_eq!(compare("", "ab"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // "night" {ni, ig, gh, ht} vs "nacht" {na, ac, ch, ht}: one shared bigram
        assert!((compare("night", "nacht") - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_bigram_used_once_per_side() {
        // "aaaa" has three "aa" bigrams, "aa" has one
        assert!((compare("aaaa", "aa") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_whitespace_ignored() {
        assert_eq!(compare("total score", "totalscore"), 1.0);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(compare("score", "computeScore(x)"), compare("computeScore(x)", "score"));
    }
}
