use shakmaty::{
    CastlingMode, Chess, EnPassantMode, Position, Setup,
    fen::{Epd, Fen},
};

use crate::error::ProbeError;

/// Bare kings, the page shown when no position is given.
pub const DEFAULT_FEN: &str = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";

/// Standard starting position. Far outside any tablebase.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN, falling back to an EPD (a FEN without clocks).
pub fn parse_setup(text: &str) -> Result<Setup, ProbeError> {
    let text = text.trim();
    match text.parse::<Fen>() {
        Ok(fen) => Ok(fen.into_setup()),
        Err(fen_err) => match text.parse::<Epd>() {
            Ok(epd) => Ok(epd.into_setup()),
            // Report the FEN error, it is the primary format.
            Err(_) => Err(fen_err.into()),
        },
    }
}

/// Parse text and build a legal position from it.
pub fn parse_position(text: &str) -> Result<Chess, ProbeError> {
    let setup = parse_setup(text)?;
    let position: Chess = setup.position(CastlingMode::Standard)?;
    Ok(position)
}

/// Full FEN of a position, en passant square only when capturable.
pub fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// FEN of a bare setup. Fields a FEN cannot express are dropped.
pub(crate) fn setup_fen(setup: Setup) -> String {
    Fen::try_from_setup(setup)
        .unwrap_or_else(|e| e.ignore())
        .to_string()
}

/// FEN of a setup with the clocks reset, i.e. `"{epd} 0 1"`.
pub fn reset_clocks_fen(mut setup: Setup) -> String {
    setup.halfmoves = 0;
    setup.fullmoves = std::num::NonZeroU32::MIN;
    setup_fen(setup)
}

/// Position key: the first four FEN fields. Clocks do not change a
/// tablebase result.
pub fn position_key(pos: &Chess) -> String {
    epd_fields(&fen_of(pos))
}

pub(crate) fn epd_fields(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
