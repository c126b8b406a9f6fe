use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Number of rows on the physical board. Row 1 is the home row.
pub const ROW_COUNT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Hand {
    Left,
    Right,
}

/// The eight typing fingers, ordered from the left pinky to the right pinky.
/// The declaration order is the finger ordinal used by the movement classifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Finger {
    LeftPinky,
    LeftRing,
    LeftMiddle,
    LeftIndex,
    RightIndex,
    RightMiddle,
    RightRing,
    RightPinky,
}

impl Finger {
    pub const COUNT: usize = 8;

    pub const ALL: [Finger; Finger::COUNT] = [
        Finger::LeftPinky,
        Finger::LeftRing,
        Finger::LeftMiddle,
        Finger::LeftIndex,
        Finger::RightIndex,
        Finger::RightMiddle,
        Finger::RightRing,
        Finger::RightPinky,
    ];

    #[inline(always)]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub fn hand(self) -> Hand {
        if self.ordinal() < 4 {
            Hand::Left
        } else {
            Hand::Right
        }
    }

    /// 0 = pinky, 3 = index, identical on both hands.
    pub fn strength_rank(self) -> u8 {
        match self {
            Finger::LeftPinky | Finger::RightPinky => 0,
            Finger::LeftRing | Finger::RightRing => 1,
            Finger::LeftMiddle | Finger::RightMiddle => 2,
            Finger::LeftIndex | Finger::RightIndex => 3,
        }
    }

    /// The next finger toward the edge of the board on the same hand
    /// (index -> middle -> ring -> pinky).
    pub fn outward_neighbor(self) -> Option<Finger> {
        match self {
            Finger::LeftIndex => Some(Finger::LeftMiddle),
            Finger::LeftMiddle => Some(Finger::LeftRing),
            Finger::LeftRing => Some(Finger::LeftPinky),
            Finger::RightIndex => Some(Finger::RightMiddle),
            Finger::RightMiddle => Some(Finger::RightRing),
            Finger::RightRing => Some(Finger::RightPinky),
            Finger::LeftPinky | Finger::RightPinky => None,
        }
    }

    /// Standard touch-typing assignment for a 10-column board.
    pub fn for_column(column: u8) -> Finger {
        match column {
            0 => Finger::LeftPinky,
            1 => Finger::LeftRing,
            2 => Finger::LeftMiddle,
            3 | 4 => Finger::LeftIndex,
            5 | 6 => Finger::RightIndex,
            7 => Finger::RightMiddle,
            8 => Finger::RightRing,
            _ => Finger::RightPinky,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Finger::LeftPinky => "LP",
            Finger::LeftRing => "LR",
            Finger::LeftMiddle => "LM",
            Finger::LeftIndex => "LI",
            Finger::RightIndex => "RI",
            Finger::RightMiddle => "RM",
            Finger::RightRing => "RR",
            Finger::RightPinky => "RP",
        }
    }
}

/// One key of the board.
///
/// Row, column and finger describe where the key sits. The shift and AltGr
/// overlays describe what else the character's key produces, so they move
/// with the character when the optimizer moves it to another position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    pub row: u8,
    pub column: u8,
    pub finger: Finger,
    #[serde(default, alias = "shiftProduces", skip_serializing_if = "Option::is_none")]
    pub shift_produces: Option<char>,
    #[serde(default, alias = "altgrProduces", skip_serializing_if = "Option::is_none")]
    pub altgr_produces: Option<char>,
}

impl Key {
    pub fn new(row: u8, column: u8, finger: Finger) -> Self {
        Self {
            row,
            column,
            finger,
            shift_produces: None,
            altgr_produces: None,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> (u8, u8) {
        (self.row, self.column)
    }

    #[inline(always)]
    pub fn hand(&self) -> Hand {
        self.finger.hand()
    }

    /// This key's position and finger carrying `other`'s overlays.
    pub fn with_overlays_of(self, other: &Key) -> Key {
        Key {
            shift_produces: other.shift_produces,
            altgr_produces: other.altgr_produces,
            ..self
        }
    }

    /// The characters produced by the shift and AltGr layers.
    pub fn overlays(&self) -> impl Iterator<Item = char> {
        self.shift_produces.into_iter().chain(self.altgr_produces)
    }
}
