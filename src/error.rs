//! Error types for the tablebase verdict library.
//!
//! Most "failures" of a probe are modelled as data: a position that no
//! table covers simply yields `None`. The variants here cover what is
//! left, namely bad input text, illegal positions, and the plumbing used
//! to build an oracle (snapshot files, remote servers, configuration).

use shakmaty::Chess;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// The provided text is neither a FEN nor an EPD.
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    /// A parsed position is invalid from the perspective of `shakmaty`.
    #[error("Invalid Chess Position: {0}")]
    InvalidPosition(#[from] shakmaty::PositionError<Chess>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot or remote response could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wraps an error returned by the HTTP client of a remote oracle.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
