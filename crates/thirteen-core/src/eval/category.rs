use core::fmt;
use serde::{Deserialize, Serialize};

/// Poker categories from weakest to strongest. The discriminant is the
/// ordinal used by scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    pub const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::Pair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Categories a three-card top hand can realise.
    pub const fn reachable_with_three(self) -> bool {
        matches!(
            self,
            HandCategory::HighCard | HandCategory::Pair | HandCategory::ThreeOfAKind
        )
    }

    /// Pair, two pair and trips earn a leading-rank bonus when scoring.
    pub const fn is_grouped_bonus(self) -> bool {
        matches!(
            self,
            HandCategory::Pair | HandCategory::TwoPair | HandCategory::ThreeOfAKind
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
