/// Locates the function-like block enclosing the cursor.
use crate::document::{Position, Range};
use crate::symbols::{SymbolKind, SymbolNode};

/// Range of the first function-like symbol containing `cursor`, searched
/// depth-first in document order.
///
/// Only containers are descended into, so a function nested directly inside
/// another function is never preferred over its parent.
#[must_use]
pub fn enclosing_block(cursor: Position, symbols: &[SymbolNode]) -> Option<Range> {
    symbols.iter().find_map(|symbol| symbol_block(cursor, symbol))
}

fn symbol_block(cursor: Position, symbol: &SymbolNode) -> Option<Range> {
    match &symbol.kind {
        SymbolKind::Function => symbol.range.contains(cursor).then_some(symbol.range),
        SymbolKind::Container { children } => enclosing_block(cursor, children),
        SymbolKind::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> Range {
        Range::new(Position::new(start, 0), Position::new(end, 1))
    }

    #[test]
    fn test_function_in_container() {
        let symbols = vec![
            SymbolNode::other("Config", range(0, 3)),
            SymbolNode::container(
                "Service",
                range(5, 30),
                vec![
                    SymbolNode::function("start", range(6, 12)),
                    SymbolNode::function("stop", range(14, 20)),
                ],
            ),
        ];

        assert_eq!(enclosing_block(Position::new(16, 2), &symbols), Some(range(14, 20)));
    }

    #[test]
    fn test_outside_all_functions() {
        let symbols = vec![
            SymbolNode::function("a", range(0, 4)),
            SymbolNode::container("B", range(6, 20), vec![SymbolNode::function("b", range(7, 9))]),
        ];

        // Inside the container but between its functions
        assert_eq!(enclosing_block(Position::new(15, 0), &symbols), None);
        assert_eq!(enclosing_block(Position::new(40, 0), &symbols), None);
        assert_eq!(enclosing_block(Position::new(0, 0), &[]), None);
    }

    #[test]
    fn test_boundaries_inclusive() {
        let symbols = vec![SymbolNode::function("a", range(2, 4))];
        assert!(enclosing_block(Position::new(2, 0), &symbols).is_some());
        assert!(enclosing_block(Position::new(4, 1), &symbols).is_some());
        assert!(enclosing_block(Position::new(4, 2), &symbols).is_none());
    }

    #[test]
    fn test_first_match_in_order_wins() {
        // Overlapping siblings: document order decides, not size
        let symbols = vec![
            SymbolNode::function("outer", range(0, 50)),
            SymbolNode::function("inner", range(10, 12)),
        ];
        assert_eq!(enclosing_block(Position::new(11, 0), &symbols), Some(range(0, 50)));
    }

    #[test]
    fn test_other_kind_not_descended() {
        let symbols = vec![SymbolNode::other("Thing", range(0, 10))];
        assert_eq!(enclosing_block(Position::new(5, 0), &symbols), None);
    }

    #[test]
    fn test_nested_containers() {
        let symbols = vec![SymbolNode::container(
            "outer",
            range(0, 40),
            vec![SymbolNode::container(
                "inner",
                range(1, 30),
                vec![SymbolNode::function("deep", range(2, 8))],
            )],
        )];
        assert_eq!(enclosing_block(Position::new(3, 0), &symbols), Some(range(2, 8)));
    }
}
