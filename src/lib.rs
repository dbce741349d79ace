//! Endgame tablebase verdicts for chess positions.
//!
//!
//! This crate answers "how does this position resolve under perfect
//! endgame play, and how does each legal move rank?" given an oracle
//! that reports WDL and DTZ values. It produces a verdict for the
//! position itself, one classification per legal move, a canonical best
//! move, and a deterministic display order of winning, drawing and
//! losing moves.
//!
//! The principal type is [`Prober`], generic over an [`Oracle`]. The
//! crate ships an in-memory [`TableOracle`] that can be persisted as a
//! JSON snapshot, and a [`RemoteOracle`] for an HTTP tablebase server.
//!
//! The library re‑exports `shakmaty` to make position construction easy.

mod best;
mod canonical;
mod config;
mod error;
mod evaluator;
mod material;
mod oracle;
mod position;
mod report;
mod sort;
mod terminal;
mod types;

/// Main evaluation entry point.
pub use evaluator::{Evaluation, Prober};

/// Error type produced by library operations.
pub use error::ProbeError;

/// Tablebase backends.
pub use oracle::{AnyOracle, Oracle, RemoteOracle, SnapshotEntry, TableOracle};

pub use config::OracleConfig;

/// Output data structures returned by evaluations.
pub use report::{PositionReport, ProbeSummary};
pub use sort::SortedMoveGroups;
pub use types::{Badge, Dtz, MoveClassification, Outcome, Status, Verdict, WdlCode};

pub use best::select_best;
pub use canonical::{CanonicalViews, mirror_horizontal, mirror_vertical, swap_colors};
pub use material::material_signature;
pub use position::{
    DEFAULT_FEN, STARTING_FEN, fen_of, parse_position, parse_setup, position_key,
};
pub use terminal::Terminal;

/// Re-export of `shakmaty` for convenience when building positions.
pub use shakmaty;
