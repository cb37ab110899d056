//! Icon definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Icon placed on a reel stop, classified by weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Icon {
    /// Blank/empty position
    Blank = 0,
    /// Jackpot symbol
    Jackpot = 1,
}

impl Icon {
    /// Weight that marks a jackpot icon
    pub const JACKPOT_WEIGHT: u8 = 1;

    /// Match-testing weight (blank = 0, jackpot = 1)
    pub fn weight(self) -> u8 {
        self as u8
    }

    /// Presentation glyph
    pub fn display_char(self) -> char {
        match self {
            Icon::Blank => '☒',
            Icon::Jackpot => '✔',
        }
    }

    /// Check if this is a jackpot icon
    pub fn is_jackpot(self) -> bool {
        self.weight() == Self::JACKPOT_WEIGHT
    }

    /// Jackpot test that tolerates a missing icon (absent counts as no match)
    pub fn matches_jackpot(icon: Option<&Icon>) -> bool {
        icon.is_some_and(|icon| icon.is_jackpot())
    }

    /// Parse a strip glyph: `J`/`✔` for jackpot, `B`/`.`/`☒` for blank
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            'J' | 'j' | '✔' => Some(Icon::Jackpot),
            'B' | 'b' | '.' | '☒' => Some(Icon::Blank),
            _ => None,
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_char())
    }
}
