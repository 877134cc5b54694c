use core::cmp::Ordering;
use core::fmt;

use super::category::HandCategory;
use crate::error::EngineError;
use crate::model::card::Card;
use crate::model::hand::ensure_distinct;
use crate::model::rank::Rank;

const WHEEL: [u8; 5] = [14, 5, 4, 3, 2];

/// Rank values compared within one category, most significant first.
/// Holds at most five entries; unused slots stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TieBreak {
    ranks: [u8; 5],
    len: u8,
}

impl TieBreak {
    pub fn from_slice(values: &[u8]) -> Self {
        let mut tie = TieBreak::default();
        for &value in values.iter().take(5) {
            tie.push(value);
        }
        tie
    }

    fn push(&mut self, value: u8) {
        self.ranks[self.len as usize] = value;
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.ranks[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn leading(&self) -> Option<u8> {
        self.as_slice().first().copied()
    }
}

impl Ord for TieBreak {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl PartialOrd for TieBreak {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Classification of a 3- or 5-card sub-hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evaluation {
    pub category: HandCategory,
    pub tie_break: TieBreak,
    size: u8,
}

impl Evaluation {
    /// Number of cards the evaluation was computed from (3 or 5).
    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn label(&self) -> String {
        let ranks = self.tie_break.as_slice();
        let name = |idx: usize| rank_at(ranks, idx).map(Rank::name).unwrap_or("?");
        let plural = |idx: usize| rank_at(ranks, idx).map(Rank::plural).unwrap_or("?");
        match self.category {
            HandCategory::HighCard => format!("{} High", name(0)),
            HandCategory::Pair => format!("Pair of {}", plural(0)),
            HandCategory::TwoPair => format!("Two Pair, {} and {}", plural(0), plural(1)),
            HandCategory::ThreeOfAKind => format!("Three {}", plural(0)),
            HandCategory::Straight => format!("Straight to {}", name(0)),
            HandCategory::Flush => format!("{}-high Flush", name(0)),
            HandCategory::FullHouse => {
                format!("Full House, {} over {}", plural(0), plural(1))
            }
            HandCategory::FourOfAKind => format!("Four {}", plural(0)),
            HandCategory::StraightFlush if ranks.first() == Some(&Rank::Ace.value()) => {
                "Royal Flush".to_string()
            }
            HandCategory::StraightFlush => format!("Straight Flush to {}", name(0)),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn rank_at(ranks: &[u8], idx: usize) -> Option<Rank> {
    ranks.get(idx).and_then(|&value| Rank::from_value(value))
}

/// Classifies exactly 3 or 5 distinct cards.
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EngineError> {
    match cards.len() {
        3 | 5 => {}
        found => return Err(EngineError::SubHandSize { found }),
    }
    ensure_distinct(cards)?;
    Ok(classify(cards))
}

/// Classification without input validation; the enumerator only hands in
/// slices of a validated deal.
pub(crate) fn classify(cards: &[Card]) -> Evaluation {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.rank.value() as usize] += 1;
    }

    // (count, rank) with larger groups first, then higher ranks.
    let mut groups = [(0u8, 0u8); 5];
    let mut distinct = 0usize;
    for value in (2..=14u8).rev() {
        let count = counts[value as usize];
        if count > 0 {
            groups[distinct] = (count, value);
            distinct += 1;
        }
    }
    let groups = &mut groups[..distinct];
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut grouped = TieBreak::default();
    for &(_, value) in groups.iter() {
        grouped.push(value);
    }

    let size = cards.len() as u8;
    let largest = groups[0].0;
    let second = groups.get(1).map(|g| g.0).unwrap_or(0);

    if cards.len() == 3 {
        let category = match largest {
            3 => HandCategory::ThreeOfAKind,
            2 => HandCategory::Pair,
            _ => HandCategory::HighCard,
        };
        return Evaluation {
            category,
            tie_break: grouped,
            size,
        };
    }

    let flush = cards.iter().all(|card| card.suit == cards[0].suit);
    let straight = straight_ranks(grouped.as_slice());

    let (category, tie_break) = match (straight, flush, largest, second) {
        (Some(run), true, _, _) => (HandCategory::StraightFlush, run),
        (_, _, 4, _) => (HandCategory::FourOfAKind, grouped),
        (_, _, 3, 2) => (HandCategory::FullHouse, grouped),
        (_, true, _, _) => (HandCategory::Flush, grouped),
        (Some(run), false, _, _) => (HandCategory::Straight, run),
        (_, _, 3, _) => (HandCategory::ThreeOfAKind, grouped),
        (_, _, 2, 2) => (HandCategory::TwoPair, grouped),
        (_, _, 2, _) => (HandCategory::Pair, grouped),
        _ => (HandCategory::HighCard, grouped),
    };

    Evaluation {
        category,
        tie_break,
        size,
    }
}

/// `descending` holds distinct rank values, highest first. Returns the
/// straight's tie-break with the wheel's ace moved below the two.
fn straight_ranks(descending: &[u8]) -> Option<TieBreak> {
    if descending.len() != 5 {
        return None;
    }
    if descending == WHEEL {
        return Some(TieBreak::from_slice(&[5, 4, 3, 2, Rank::ACE_LOW]));
    }
    if descending[0] - descending[4] == 4 {
        return Some(TieBreak::from_slice(descending));
    }
    None
}
