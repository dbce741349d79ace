use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use shakmaty::Color;

/// Signed distance to the next zeroing move, in plies, from the
/// perspective of the side to move. Positive is winning, negative is
/// losing, zero is a tablebase draw.
pub type Dtz = i32;

/// Five-valued tablebase outcome for the side to move.
///
/// Serialized as its signed integer, `-2..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum WdlCode {
    Loss,
    /// Loss that the 50-move rule turns into a draw.
    BlessedLoss,
    Draw,
    /// Win that the 50-move rule turns into a draw.
    CursedWin,
    Win,
}

impl WdlCode {
    pub fn from_i8(value: i8) -> Option<WdlCode> {
        Some(match value {
            -2 => WdlCode::Loss,
            -1 => WdlCode::BlessedLoss,
            0 => WdlCode::Draw,
            1 => WdlCode::CursedWin,
            2 => WdlCode::Win,
            _ => return None,
        })
    }

    pub fn to_i8(self) -> i8 {
        match self {
            WdlCode::Loss => -2,
            WdlCode::BlessedLoss => -1,
            WdlCode::Draw => 0,
            WdlCode::CursedWin => 1,
            WdlCode::Win => 2,
        }
    }

    pub fn is_cursed_win(self) -> bool {
        self == WdlCode::CursedWin
    }

    pub fn is_blessed_loss(self) -> bool {
        self == WdlCode::BlessedLoss
    }
}

impl From<WdlCode> for i8 {
    fn from(wdl: WdlCode) -> i8 {
        wdl.to_i8()
    }
}

impl TryFrom<i8> for WdlCode {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        WdlCode::from_i8(value).ok_or_else(|| format!("wdl out of range: {value}"))
    }
}

/// Display label attached to every classified move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Checkmate,
    Zeroing,
    WinWithDtz(u32),
    Stalemate,
    InsufficientMaterial,
    Draw,
    Unknown,
    LossWithDtz(u32),
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Checkmate => f.write_str("Checkmate"),
            Badge::Zeroing => f.write_str("Zeroing"),
            Badge::WinWithDtz(dtz) => write!(f, "Win with DTZ {dtz}"),
            Badge::Stalemate => f.write_str("Stalemate"),
            Badge::InsufficientMaterial => f.write_str("Insufficient material"),
            Badge::Draw => f.write_str("Draw"),
            Badge::Unknown => f.write_str("Unknown"),
            Badge::LossWithDtz(dtz) => write!(f, "Loss with DTZ {dtz}"),
        }
    }
}

impl Serialize for Badge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Bucket a move falls into, from the mover's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winning,
    Drawing,
    Losing,
}

/// Everything known about one legal move after playing it.
///
/// `dtz` and `wdl` describe the child position, so they are from the
/// opponent's perspective: a negative `dtz` means the mover is winning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveClassification {
    pub uci: String,
    pub san: String,
    /// Child position with reset clocks, `"{epd} 0 1"`.
    pub fen: String,
    pub dtz: Option<Dtz>,
    pub wdl: Option<WdlCode>,
    pub zeroing: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub insufficient_material: bool,
    pub winning: bool,
    pub drawing: bool,
    pub badge: Badge,
}

impl MoveClassification {
    pub fn outcome(&self) -> Outcome {
        if self.winning {
            Outcome::Winning
        } else if self.drawing {
            Outcome::Drawing
        } else {
            Outcome::Losing
        }
    }

    /// Tablebase win for the mover: the child's dtz is known and negative.
    pub fn is_tablebase_win(&self) -> bool {
        self.dtz.is_some_and(|dtz| dtz < 0)
    }
}

/// Whole-position status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Invalid,
    InsufficientMaterial,
    Stalemate,
    Checkmate { winner: Color },
    Winning { side: Color, dtz: u32 },
    Losing { side: Color, dtz: u32 },
    TablebaseDraw,
    NotFound,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Status::Invalid => f.write_str("Invalid position"),
            Status::InsufficientMaterial => f.write_str("Draw by insufficient material"),
            Status::Stalemate => f.write_str("Draw by stalemate"),
            Status::Checkmate { winner } => write!(f, "{} won by checkmate", side_title(winner)),
            Status::Winning { side, dtz } => {
                write!(f, "{} is winning with DTZ {dtz}", side_title(side))
            }
            Status::Losing { side, dtz } => {
                write!(f, "{} is losing with DTZ {dtz}", side_title(side))
            }
            Status::TablebaseDraw => f.write_str("Tablebase draw"),
            Status::NotFound => f.write_str("Position not found in tablebases"),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classification of the position itself, independent of any move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: Status,
    pub wdl: Option<WdlCode>,
    pub dtz: Option<Dtz>,
    #[serde(serialize_with = "serialize_side")]
    pub winning_side: Option<Color>,
    #[serde(serialize_with = "serialize_side")]
    pub losing_side: Option<Color>,
}

impl Verdict {
    pub(crate) fn new(status: Status, wdl: Option<WdlCode>) -> Verdict {
        Verdict {
            status,
            wdl,
            dtz: None,
            winning_side: None,
            losing_side: None,
        }
    }

    pub(crate) fn with_sides(mut self, winner: Color) -> Verdict {
        self.winning_side = Some(winner);
        self.losing_side = Some(!winner);
        self
    }
}

fn side_title(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Lowercase side name, as used in report payloads.
pub(crate) fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

pub(crate) fn serialize_side<S: Serializer>(
    side: &Option<Color>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match side {
        Some(color) => serializer.serialize_some(side_name(*color)),
        None => serializer.serialize_none(),
    }
}
