use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position, san::SanPlus};
use tracing::debug;

use crate::{
    best::select_best,
    oracle::Oracle,
    position::{DEFAULT_FEN, fen_of, reset_clocks_fen},
    sort::SortedMoveGroups,
    terminal::{Terminal, TerminalFlags},
    types::{Badge, Dtz, MoveClassification, Status, Verdict, WdlCode},
};

/// Evaluates positions against a tablebase oracle.
///
/// The prober holds no state besides the oracle, so a single instance
/// (or many instances sharing one oracle through a reference or an
/// `Arc`) can serve concurrent evaluations.
#[derive(Debug, Clone)]
pub struct Prober<O> {
    oracle: O,
}

/// Verdict of a position plus one classification per legal move, in the
/// rules engine's move order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub moves: Vec<MoveClassification>,
}

impl Evaluation {
    /// Moves split into winning, drawing and losing, in display order.
    pub fn groups(&self) -> SortedMoveGroups {
        SortedMoveGroups::new(self.moves.iter().cloned())
    }

    pub fn best_move(&self) -> Option<&MoveClassification> {
        select_best(&self.moves)
    }
}

impl<O: Oracle> Prober<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Classify the position and every legal move.
    pub fn evaluate(&self, pos: &Chess) -> Evaluation {
        let verdict = self.verdict(pos);
        let moves = self.classify_moves(pos, verdict.wdl);

        debug!(
            fen = %fen_of(pos),
            status = %verdict.status,
            moves = moves.len(),
            "Evaluated position"
        );
        Evaluation { verdict, moves }
    }

    /// UCI of the canonical best move, `None` without legal moves.
    pub fn select_best(&self, pos: &Chess) -> Option<String> {
        self.evaluate(pos).best_move().map(|m| m.uci.clone())
    }

    /// Whole-position verdict.
    ///
    /// The bare kings position is a draw without asking the oracle, then
    /// the rules decide terminal positions, then the oracle decides.
    pub fn verdict(&self, pos: &Chess) -> Verdict {
        if fen_of(pos) == DEFAULT_FEN {
            return Verdict::new(Status::InsufficientMaterial, Some(WdlCode::Draw));
        }

        match Terminal::of(pos) {
            Terminal::Checkmate => {
                let winner = !pos.turn();
                Verdict::new(Status::Checkmate { winner }, Some(WdlCode::Loss)).with_sides(winner)
            }
            Terminal::Stalemate => Verdict::new(Status::Stalemate, Some(WdlCode::Draw)),
            Terminal::InsufficientMaterial => {
                Verdict::new(Status::InsufficientMaterial, Some(WdlCode::Draw))
            }
            Terminal::Ongoing => self.tablebase_verdict(pos),
        }
    }

    fn tablebase_verdict(&self, pos: &Chess) -> Verdict {
        let wdl = self.oracle.probe_wdl(pos);
        let dtz = self.oracle.probe_dtz(pos);
        let turn = pos.turn();

        let mut verdict = match dtz {
            None => Verdict::new(Status::NotFound, wdl),
            Some(0) => Verdict::new(Status::TablebaseDraw, wdl),
            Some(plies) if plies > 0 => Verdict::new(
                Status::Winning {
                    side: turn,
                    dtz: plies.unsigned_abs(),
                },
                wdl,
            )
            .with_sides(turn),
            Some(plies) => Verdict::new(
                Status::Losing {
                    side: turn,
                    dtz: plies.unsigned_abs(),
                },
                wdl,
            )
            .with_sides(!turn),
        };
        verdict.dtz = dtz;
        verdict
    }

    /// One classification per legal move, in enumeration order.
    ///
    /// `ambient` is the WDL of `pos` itself, used to classify moves into
    /// unknown positions.
    pub fn classify_moves(&self, pos: &Chess, ambient: Option<WdlCode>) -> Vec<MoveClassification> {
        pos.legal_moves()
            .iter()
            .map(|m| self.classify_move(pos, m, ambient))
            .collect()
    }

    fn classify_move(&self, pos: &Chess, m: &Move, ambient: Option<WdlCode>) -> MoveClassification {
        // The child is a copy, `pos` itself is never touched.
        let mut child = pos.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut child, m.clone()).to_string();

        let flags = TerminalFlags::of(&child);
        let dtz = self.oracle.probe_dtz(&child);
        let wdl = if flags.checkmate {
            Some(WdlCode::Loss)
        } else if flags.any() {
            Some(WdlCode::Draw)
        } else {
            self.oracle.probe_wdl(&child)
        };

        classify(
            MoveFacts {
                uci: m.to_uci(CastlingMode::Standard).to_string(),
                san,
                fen: reset_clocks_fen(child.to_setup(EnPassantMode::Legal)),
                dtz,
                wdl,
                zeroing: child.halfmoves() == 0,
                flags,
            },
            ambient,
        )
    }
}

/// Raw observations about the position after a move.
pub(crate) struct MoveFacts {
    pub uci: String,
    pub san: String,
    pub fen: String,
    pub dtz: Option<Dtz>,
    pub wdl: Option<WdlCode>,
    pub zeroing: bool,
    pub flags: TerminalFlags,
}

/// Bucket and badge a move.
///
/// A move into a position the oracle does not know counts as drawing
/// when the mover's own position is known to be lost. This is a
/// heuristic: with no better data such a move is assumed to be at least
/// as good as the root. Everything else unknown lands in the losing
/// bucket.
pub(crate) fn classify(facts: MoveFacts, ambient: Option<WdlCode>) -> MoveClassification {
    let MoveFacts {
        uci,
        san,
        fen,
        dtz,
        wdl,
        zeroing,
        flags,
    } = facts;

    let winning = flags.checkmate || dtz.is_some_and(|plies| plies < 0);
    let drawing = !winning
        && (flags.stalemate
            || flags.insufficient_material
            || dtz == Some(0)
            || (dtz.is_none() && ambient.is_some_and(|wdl| wdl < WdlCode::Draw)));

    let badge = if winning {
        match dtz {
            _ if flags.checkmate => Badge::Checkmate,
            _ if zeroing => Badge::Zeroing,
            Some(plies) => Badge::WinWithDtz(plies.unsigned_abs()),
            None => Badge::Unknown,
        }
    } else if drawing {
        if flags.stalemate {
            Badge::Stalemate
        } else if flags.insufficient_material {
            Badge::InsufficientMaterial
        } else if dtz == Some(0) {
            Badge::Draw
        } else {
            Badge::Unknown
        }
    } else {
        match dtz {
            Some(plies) => Badge::LossWithDtz(plies.unsigned_abs()),
            None => Badge::Unknown,
        }
    };

    MoveClassification {
        uci,
        san,
        fen,
        dtz,
        wdl,
        zeroing,
        checkmate: flags.checkmate,
        stalemate: flags.stalemate,
        insufficient_material: flags.insufficient_material,
        winning,
        drawing,
        badge,
    }
}

/// Build a classification from bare facts. Shared by the unit tests of
/// the selector and the sorter.
#[cfg(test)]
pub(crate) fn synthetic(
    uci: &str,
    dtz: Option<Dtz>,
    zeroing: bool,
    flags: TerminalFlags,
    ambient: Option<WdlCode>,
) -> MoveClassification {
    classify(
        MoveFacts {
            uci: uci.to_string(),
            san: String::new(),
            fen: String::new(),
            dtz,
            wdl: None,
            zeroing,
            flags,
        },
        ambient,
    )
}
