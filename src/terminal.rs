use shakmaty::{Chess, Position};

/// How a position has ended, if it has, judged by the rules alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    Ongoing,
}

impl Terminal {
    /// Classify without consulting any tablebase.
    ///
    /// Checkmate and stalemate exclude each other. Insufficient material
    /// can coincide with a stalemate, in which case the stalemate wins.
    pub fn of(pos: &Chess) -> Terminal {
        if pos.is_checkmate() {
            Terminal::Checkmate
        } else if pos.is_stalemate() {
            Terminal::Stalemate
        } else if pos.is_insufficient_material() {
            Terminal::InsufficientMaterial
        } else {
            Terminal::Ongoing
        }
    }
}

/// Terminal predicates evaluated independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TerminalFlags {
    pub checkmate: bool,
    pub stalemate: bool,
    pub insufficient_material: bool,
}

impl TerminalFlags {
    pub fn of(pos: &Chess) -> TerminalFlags {
        TerminalFlags {
            checkmate: pos.is_checkmate(),
            stalemate: pos.is_stalemate(),
            insufficient_material: pos.is_insufficient_material(),
        }
    }

    pub fn any(self) -> bool {
        self.checkmate || self.stalemate || self.insufficient_material
    }
}
