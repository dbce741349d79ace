//! Presentation payloads built on top of an [`crate::Evaluation`].
//!
//! [`ProbeSummary`] is the compact machine-readable answer for a
//! position. [`PositionReport`] carries everything a page about the
//! position needs: the verdict, grouped moves, and navigation views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position, Setup};
use tracing::{debug, warn};

use crate::{
    best::select_best,
    canonical::CanonicalViews,
    error::ProbeError,
    evaluator::Prober,
    material::material_signature,
    oracle::Oracle,
    position::{
        DEFAULT_FEN, STARTING_FEN, fen_of, parse_position, parse_setup, reset_clocks_fen, setup_fen,
    },
    sort::SortedMoveGroups,
    types::{Dtz, Status, Verdict, WdlCode, side_name},
};

/// Raw probe results of a position and each of its moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSummary {
    pub dtz: Option<Dtz>,
    pub wdl: Option<WdlCode>,
    pub bestmove: Option<String>,
    /// Child dtz per legal move, keyed by UCI.
    pub moves: BTreeMap<String, Option<Dtz>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionReport {
    pub fen: String,
    /// Echo for the input box, empty for the default position.
    pub fen_input: String,
    pub verdict: Verdict,
    pub moves: SortedMoveGroups,
    pub material: String,
    #[serde(serialize_with = "serialize_turn")]
    pub turn: Color,
    pub views: CanonicalViews,
    pub insufficient_material: bool,
    pub blessed_loss: bool,
    pub cursed_win: bool,
    pub illegal: bool,
    pub not_yet_solved: bool,
    pub unknown: bool,
}

impl<O: Oracle> Prober<O> {
    /// Probe the position and its moves without verdict or badges.
    pub fn probe(&self, pos: &Chess) -> ProbeSummary {
        let dtz = self.oracle().probe_dtz(pos);
        let wdl = self.oracle().probe_wdl(pos);
        let moves = self.classify_moves(pos, wdl);

        let summary = ProbeSummary {
            dtz,
            wdl,
            bestmove: select_best(&moves).map(|m| m.uci.clone()),
            moves: moves.into_iter().map(|m| (m.uci, m.dtz)).collect(),
        };

        debug!(fen = %fen_of(pos), bestmove = ?summary.bestmove, "Probed position");
        summary
    }

    /// Like [`Prober::probe`], for a position given as FEN or EPD.
    pub fn probe_text(&self, text: &str) -> Result<ProbeSummary, ProbeError> {
        let pos = parse_position(text)?;
        Ok(self.probe(&pos))
    }

    /// Build the report for a FEN or EPD.
    ///
    /// Unparsable text falls back to [`DEFAULT_FEN`]. A parsable but
    /// illegal position is reported as invalid, with no moves.
    pub fn report(&self, text: &str) -> Result<PositionReport, ProbeError> {
        let setup = match parse_setup(text) {
            Ok(setup) => setup,
            Err(e) => {
                warn!(input = text, error = %e, "Unparsable position, showing default");
                parse_setup(DEFAULT_FEN)?
            }
        };

        let position: Result<Chess, _> = setup.clone().position(CastlingMode::Standard);
        let report = match position {
            Ok(pos) => self.valid_report(&pos),
            Err(e) => {
                debug!(input = text, error = %e, "Illegal position");
                invalid_report(setup)
            }
        };
        Ok(report)
    }

    fn valid_report(&self, pos: &Chess) -> PositionReport {
        let evaluation = self.evaluate(pos);
        let setup = pos.to_setup(EnPassantMode::Legal);
        let epd = reset_clocks_fen(setup.clone());
        let wdl = evaluation.verdict.wdl;

        PositionReport {
            fen: fen_of(pos),
            fen_input: if epd == DEFAULT_FEN { String::new() } else { epd.clone() },
            moves: evaluation.groups(),
            material: material_signature(&setup.board),
            turn: pos.turn(),
            views: CanonicalViews::of(&setup),
            insufficient_material: pos.is_insufficient_material(),
            blessed_loss: wdl.is_some_and(WdlCode::is_blessed_loss),
            cursed_win: wdl.is_some_and(WdlCode::is_cursed_win),
            illegal: false,
            not_yet_solved: epd == STARTING_FEN,
            unknown: wdl.is_none(),
            verdict: evaluation.verdict,
        }
    }
}

fn invalid_report(setup: Setup) -> PositionReport {
    let epd = reset_clocks_fen(setup.clone());

    PositionReport {
        fen: setup_fen(setup.clone()),
        fen_input: if epd == DEFAULT_FEN { String::new() } else { epd },
        verdict: Verdict::new(Status::Invalid, None),
        moves: SortedMoveGroups::default(),
        material: material_signature(&setup.board),
        turn: setup.turn,
        views: CanonicalViews::of(&setup),
        insufficient_material: false,
        blessed_loss: false,
        cursed_win: false,
        illegal: true,
        not_yet_solved: false,
        unknown: true,
    }
}

fn serialize_turn<S: Serializer>(turn: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(side_name(*turn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::TableOracle;

    const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

    #[test]
    fn summary_of_mate_in_one() {
        let prober = Prober::new(TableOracle::new());
        let summary = prober.probe_text(MATE_IN_ONE).unwrap();

        assert_eq!(summary.bestmove.as_deref(), Some("a1a8"));
        assert_eq!(summary.dtz, None);
        assert_eq!(summary.moves.len(), 17);
        assert!(summary.moves.values().all(Option::is_none));
    }

    #[test]
    fn summary_json_shape() {
        let mut table = TableOracle::new();
        table.insert_fen(MATE_IN_ONE, Some(WdlCode::Win), Some(1)).unwrap();
        let prober = Prober::new(table);

        let json = serde_json::to_value(prober.probe_text(MATE_IN_ONE).unwrap()).unwrap();
        assert_eq!(json["dtz"], 1);
        assert_eq!(json["wdl"], 2);
        assert_eq!(json["bestmove"], "a1a8");
        assert!(json["moves"]["a1a8"].is_null());
    }

    #[test]
    fn summary_rejects_illegal_input() {
        let prober = Prober::new(TableOracle::new());
        assert!(prober.probe_text("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(prober.probe_text("garbage").is_err());
    }

    #[test]
    fn default_report() {
        let prober = Prober::new(TableOracle::new());
        let report = prober.report(DEFAULT_FEN).unwrap();

        assert_eq!(report.fen_input, "");
        assert_eq!(report.verdict.status, Status::InsufficientMaterial);
        assert_eq!(report.verdict.wdl, Some(WdlCode::Draw));
        assert_eq!(report.material, "KvK");
        assert!(report.insufficient_material);
        assert!(!report.unknown && !report.illegal);
    }

    #[test]
    fn unparsable_input_falls_back_to_default() {
        let prober = Prober::new(TableOracle::new());
        let report = prober.report("definitely not fen").unwrap();

        assert_eq!(report.fen, DEFAULT_FEN);
    }

    #[test]
    fn illegal_input_is_reported() {
        let prober = Prober::new(TableOracle::new());
        // Pawn on the back rank.
        let report = prober.report("4k3/8/8/8/8/8/8/P3K3 w - - 0 1").unwrap();

        assert!(report.illegal);
        assert!(report.moves.is_empty());
        assert_eq!(report.verdict.status.to_string(), "Invalid position");
        assert_eq!(report.material, "KPvK");
        assert_eq!(report.fen, "4k3/8/8/8/8/8/8/P3K3 w - - 0 1");
    }

    #[test]
    fn starting_position_is_not_solved() {
        let prober = Prober::new(TableOracle::new());
        let report = prober.report(STARTING_FEN).unwrap();

        assert!(report.not_yet_solved);
        assert!(report.unknown);
        assert_eq!(report.verdict.status, Status::NotFound);
        assert_eq!(report.moves.len(), 20);
    }

    #[test]
    fn cursed_and_blessed_flags() {
        let fen = "4k3/8/4K3/8/8/8/8/5Q2 b - - 0 1";
        let mut table = TableOracle::new();
        table.insert_fen(fen, Some(WdlCode::BlessedLoss), Some(-101)).unwrap();
        let prober = Prober::new(table);

        let report = prober.report(fen).unwrap();
        assert!(report.blessed_loss && !report.cursed_win);
        assert_eq!(report.turn, Color::Black);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["turn"], "black");
        assert_eq!(json["verdict"]["status"], "Black is losing with DTZ 101");
    }
}
