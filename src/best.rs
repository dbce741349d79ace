use crate::types::MoveClassification;

/// Pick the canonical best move out of classified moves.
///
/// The first non-empty level wins, scanning in the given order:
///
/// 1. a checkmate,
/// 2. a zeroing tablebase win,
/// 3. the tablebase win with the greatest child dtz (fastest conversion),
/// 4. a stalemate,
/// 5. a move to insufficient material,
/// 6. a tablebase draw,
/// 7. the move with the greatest child dtz, unknown dtz ranking last.
///
/// Ties keep the earliest move. `None` only if there are no moves.
pub fn select_best(moves: &[MoveClassification]) -> Option<&MoveClassification> {
    moves
        .iter()
        .find(|m| m.checkmate)
        .or_else(|| moves.iter().find(|m| m.zeroing && m.is_tablebase_win()))
        .or_else(|| greatest_dtz(moves.iter().filter(|m| m.is_tablebase_win())))
        .or_else(|| moves.iter().find(|m| m.stalemate))
        .or_else(|| moves.iter().find(|m| m.insufficient_material))
        .or_else(|| moves.iter().find(|m| m.dtz == Some(0)))
        .or_else(|| greatest_dtz(moves.iter()))
}

// `Option` orders `None` below every `Some`, which puts unknown dtz last.
fn greatest_dtz<'a>(
    moves: impl Iterator<Item = &'a MoveClassification>,
) -> Option<&'a MoveClassification> {
    moves.reduce(|best, m| if m.dtz > best.dtz { m } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluator::synthetic, terminal::TerminalFlags};

    fn plain(uci: &str, dtz: Option<i32>) -> MoveClassification {
        synthetic(uci, dtz, false, TerminalFlags::default(), None)
    }

    fn zeroing(uci: &str, dtz: Option<i32>) -> MoveClassification {
        synthetic(uci, dtz, true, TerminalFlags::default(), None)
    }

    fn flagged(uci: &str, flags: TerminalFlags) -> MoveClassification {
        synthetic(uci, None, false, flags, None)
    }

    fn best(moves: &[MoveClassification]) -> Option<&str> {
        select_best(moves).map(|m| m.uci.as_str())
    }

    const MATE: TerminalFlags = TerminalFlags {
        checkmate: true,
        stalemate: false,
        insufficient_material: false,
    };

    const STALEMATE: TerminalFlags = TerminalFlags {
        checkmate: false,
        stalemate: true,
        insufficient_material: false,
    };

    const INSUFFICIENT: TerminalFlags = TerminalFlags {
        checkmate: false,
        stalemate: false,
        insufficient_material: true,
    };

    #[test]
    fn no_moves() {
        assert_eq!(best(&[]), None);
    }

    #[test]
    fn checkmate_first() {
        let moves = [
            zeroing("e7e8q", Some(-1)),
            plain("a1a2", Some(-1)),
            flagged("a1a8", MATE),
            flagged("h1h8", MATE),
        ];
        assert_eq!(best(&moves), Some("a1a8"));
    }

    #[test]
    fn zeroing_win_before_faster_win() {
        let moves = [plain("a1a2", Some(-1)), zeroing("b2b4", Some(-20)), zeroing("c2c4", Some(-2))];
        assert_eq!(best(&moves), Some("b2b4"));
    }

    #[test]
    fn zeroing_non_win_is_ignored() {
        let moves = [zeroing("b2b4", Some(3)), plain("a1a2", Some(-9))];
        assert_eq!(best(&moves), Some("a1a2"));
    }

    #[test]
    fn fastest_win() {
        let moves = [
            plain("a1a2", Some(-9)),
            plain("a1a3", Some(-3)),
            plain("a1a4", Some(-3)),
            plain("a1a5", Some(0)),
        ];
        assert_eq!(best(&moves), Some("a1a3"));
    }

    #[test]
    fn draws_in_order() {
        let moves = [plain("a1a5", Some(0)), flagged("c5c7", INSUFFICIENT), flagged("c5b6", STALEMATE)];
        assert_eq!(best(&moves), Some("c5b6"));

        let moves = [plain("a1a5", Some(0)), flagged("c5c7", INSUFFICIENT)];
        assert_eq!(best(&moves), Some("c5c7"));

        let moves = [plain("a1a4", Some(2)), plain("a1a5", Some(0))];
        assert_eq!(best(&moves), Some("a1a5"));
    }

    #[test]
    fn slowest_loss() {
        let moves = [plain("a1a2", None), plain("a1a3", Some(2)), plain("a1a4", Some(30))];
        assert_eq!(best(&moves), Some("a1a4"));
    }

    #[test]
    fn all_unknown_still_picks_a_move() {
        let moves = [plain("g1h1", None), plain("a1a2", None)];
        assert_eq!(best(&moves), Some("g1h1"));
    }
}
