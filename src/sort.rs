use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{MoveClassification, Outcome};

/// Classified moves split by outcome, each group in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortedMoveGroups {
    pub winning: Vec<MoveClassification>,
    pub drawing: Vec<MoveClassification>,
    pub losing: Vec<MoveClassification>,
}

impl SortedMoveGroups {
    pub fn new(moves: impl IntoIterator<Item = MoveClassification>) -> Self {
        let mut groups = Self::default();
        for m in moves {
            match m.outcome() {
                Outcome::Winning => groups.winning.push(m),
                Outcome::Drawing => groups.drawing.push(m),
                Outcome::Losing => groups.losing.push(m),
            }
        }

        groups.winning.sort_by(winning_order);
        groups.drawing.sort_by(drawing_order);
        groups.losing.sort_by(losing_order);
        groups
    }

    pub fn len(&self) -> usize {
        self.winning.len() + self.drawing.len() + self.losing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All moves, winning first, then drawing, then losing.
    pub fn iter(&self) -> impl Iterator<Item = &MoveClassification> {
        self.winning
            .iter()
            .chain(self.drawing.iter())
            .chain(self.losing.iter())
    }
}

// Descending dtz: `None` sorts below every `Some`, so unknown comes last.

/// Checkmates, then zeroing wins, then by descending dtz (closest to
/// zero is the fastest conversion), then alphabetical.
fn winning_order(a: &MoveClassification, b: &MoveClassification) -> Ordering {
    b.checkmate
        .cmp(&a.checkmate)
        .then(b.zeroing.cmp(&a.zeroing))
        .then(b.dtz.cmp(&a.dtz))
        .then_with(|| a.uci.cmp(&b.uci))
}

/// Stalemates, then insufficient material, then everything else.
fn drawing_order(a: &MoveClassification, b: &MoveClassification) -> Ordering {
    b.stalemate
        .cmp(&a.stalemate)
        .then(b.insufficient_material.cmp(&a.insufficient_material))
        .then_with(|| a.uci.cmp(&b.uci))
}

/// Slowest loss first, unknown last.
fn losing_order(a: &MoveClassification, b: &MoveClassification) -> Ordering {
    b.dtz.cmp(&a.dtz).then_with(|| a.uci.cmp(&b.uci))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluator::synthetic, terminal::TerminalFlags, types::WdlCode};

    fn ucis(moves: &[MoveClassification]) -> Vec<&str> {
        moves.iter().map(|m| m.uci.as_str()).collect()
    }

    fn plain(uci: &str, dtz: Option<i32>) -> MoveClassification {
        synthetic(uci, dtz, false, TerminalFlags::default(), None)
    }

    #[test]
    fn winning_group_order() {
        let mate = TerminalFlags {
            checkmate: true,
            ..TerminalFlags::default()
        };
        let groups = SortedMoveGroups::new([
            plain("h1h2", Some(-7)),
            plain("g1f2", Some(-3)),
            synthetic("b2b4", Some(-15), true, TerminalFlags::default(), None),
            plain("a1a3", Some(-3)),
            synthetic("a1a8", None, false, mate, None),
            synthetic("a7a8q", Some(-1), true, TerminalFlags::default(), None),
        ]);

        assert_eq!(
            ucis(&groups.winning),
            ["a1a8", "a7a8q", "b2b4", "a1a3", "g1f2", "h1h2"]
        );
        assert!(groups.drawing.is_empty() && groups.losing.is_empty());
    }

    #[test]
    fn drawing_group_order() {
        let stalemate = TerminalFlags {
            stalemate: true,
            ..TerminalFlags::default()
        };
        let insufficient = TerminalFlags {
            insufficient_material: true,
            ..TerminalFlags::default()
        };
        let groups = SortedMoveGroups::new([
            plain("h1g1", Some(0)),
            synthetic("g2g1", None, true, insufficient, None),
            synthetic("c5c7", None, false, stalemate, None),
            plain("a1b1", Some(0)),
            synthetic("c5b6", None, false, stalemate, None),
            synthetic("d1d2", None, false, TerminalFlags::default(), Some(WdlCode::Loss)),
        ]);

        assert_eq!(
            ucis(&groups.drawing),
            ["c5b6", "c5c7", "g2g1", "a1b1", "d1d2", "h1g1"]
        );
    }

    #[test]
    fn losing_group_order_puts_unknown_last() {
        let groups = SortedMoveGroups::new([
            plain("e2e3", None),
            plain("a1a4", Some(4)),
            plain("b1b2", Some(40)),
            plain("a1a2", None),
            plain("c1c2", Some(4)),
        ]);

        assert_eq!(ucis(&groups.losing), ["b1b2", "a1a4", "c1c2", "a1a2", "e2e3"]);
    }

    #[test]
    fn partition_is_complete() {
        let moves = vec![
            plain("a1a2", Some(-1)),
            plain("a1a3", Some(0)),
            plain("a1a4", Some(1)),
            plain("a1a5", None),
        ];
        let groups = SortedMoveGroups::new(moves.clone());

        assert_eq!(groups.len(), moves.len());
        assert_eq!(
            ucis(&groups.iter().cloned().collect::<Vec<_>>()),
            ["a1a2", "a1a3", "a1a4", "a1a5"]
        );
    }
}
