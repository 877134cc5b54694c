//! Whole-hand patterns checked before any arrangement search. A match means
//! the hand is shown as dealt and the search never runs.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::arrange::combinations::Combinations;
use crate::model::hand::{DealtHand, HAND_SIZE};
use crate::model::rank::Rank;

/// Weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialHand {
    ThreeFlushes,
    ThreeStraights,
    SixPairs,
    Dragon,
}

impl SpecialHand {
    pub const fn label(self) -> &'static str {
        match self {
            SpecialHand::ThreeFlushes => "Three Flushes",
            SpecialHand::ThreeStraights => "Three Straights",
            SpecialHand::SixPairs => "Six Pairs",
            SpecialHand::Dragon => "Dragon",
        }
    }
}

impl fmt::Display for SpecialHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub trait SpecialDetector {
    fn detect(&self, hand: &DealtHand) -> Option<SpecialHand>;
}

/// Detector that never fires; every hand goes through the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpecials;

impl SpecialDetector for NoSpecials {
    fn detect(&self, _hand: &DealtHand) -> Option<SpecialHand> {
        None
    }
}

/// The widely played patterns, strongest checked first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonSpecials;

impl SpecialDetector for CommonSpecials {
    fn detect(&self, hand: &DealtHand) -> Option<SpecialHand> {
        let counts = hand.rank_counts();
        if is_dragon(&counts) {
            return Some(SpecialHand::Dragon);
        }
        if is_six_pairs(&counts) {
            return Some(SpecialHand::SixPairs);
        }
        if is_three_straights(hand) {
            return Some(SpecialHand::ThreeStraights);
        }
        if is_three_flushes(&hand.suit_counts()) {
            return Some(SpecialHand::ThreeFlushes);
        }
        None
    }
}

fn is_dragon(counts: &[u8; 15]) -> bool {
    Rank::ORDERED
        .iter()
        .all(|rank| counts[rank.value() as usize] == 1)
}

/// Quads count as two pairs and trips as one pair plus a single.
fn is_six_pairs(counts: &[u8; 15]) -> bool {
    counts.iter().map(|&c| c / 2).sum::<u8>() == 6
}

/// Each sub-hand takes one suit; several sub-hands may share a suit.
fn is_three_flushes(suit_counts: &[u8; 4]) -> bool {
    const SIZES: [u8; 3] = [3, 5, 5];
    for assignment in 0..64usize {
        let mut filled = [0u8; 4];
        for (slot, size) in SIZES.iter().enumerate() {
            let suit = (assignment >> (slot * 2)) & 0b11;
            filled[suit] += *size;
        }
        if filled == *suit_counts {
            return true;
        }
    }
    false
}

fn is_three_straights(hand: &DealtHand) -> bool {
    let ranks: Vec<u8> = hand.iter().map(|card| card.rank.value()).collect();
    let mut tops = Combinations::new(HAND_SIZE, 3);
    while let Some(top) = tops.advance() {
        let top_ranks = [ranks[top[0]], ranks[top[1]], ranks[top[2]]];
        if !is_run(&top_ranks) {
            continue;
        }
        let rest: Vec<u8> = (0..HAND_SIZE)
            .filter(|i| !top.contains(i))
            .map(|i| ranks[i])
            .collect();
        let mut middles = Combinations::new(rest.len(), 5);
        while let Some(middle) = middles.advance() {
            let middle_ranks: Vec<u8> = middle.iter().map(|&i| rest[i]).collect();
            let bottom_ranks: Vec<u8> = (0..rest.len())
                .filter(|i| !middle.contains(i))
                .map(|i| rest[i])
                .collect();
            if is_run(&middle_ranks) && is_run(&bottom_ranks) {
                return true;
            }
        }
    }
    false
}

/// Consecutive distinct ranks, with the ace allowed at either end.
fn is_run(values: &[u8]) -> bool {
    let consecutive = |sorted: &[u8]| sorted.windows(2).all(|w| w[1] == w[0] + 1);
    let mut high: Vec<u8> = values.to_vec();
    high.sort_unstable();
    if consecutive(&high) {
        return true;
    }
    let mut low: Vec<u8> = values
        .iter()
        .map(|&v| if v == Rank::Ace.value() { Rank::ACE_LOW } else { v })
        .collect();
    low.sort_unstable();
    consecutive(&low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::parse_cards;

    fn hand(text: &str) -> DealtHand {
        DealtHand::new(&parse_cards(text).unwrap()).unwrap()
    }

    #[test]
    fn dragon_needs_every_rank() {
        let dragon = hand("2C 3D 4H 5S 6C 7D 8H 9S 10C JD QH KS AC");
        assert_eq!(CommonSpecials.detect(&dragon), Some(SpecialHand::Dragon));
    }

    #[test]
    fn six_pairs_counts_quads_twice() {
        let pairs = hand("2C 2D 4H 4S 6C 6D 8H 8S 10C 10D QH QS AC");
        assert_eq!(CommonSpecials.detect(&pairs), Some(SpecialHand::SixPairs));
        let with_quads = hand("2C 2D 2H 2S 6C 6D 8H 8S 10C 10D QH QS AC");
        assert_eq!(CommonSpecials.detect(&with_quads), Some(SpecialHand::SixPairs));
    }

    #[test]
    fn three_straights_allows_ace_low_top() {
        let straights = hand("AC 2D 3H 4S 5C 6D 7H 8S 6C 7D 8H 9S 10C");
        assert_eq!(
            CommonSpecials.detect(&straights),
            Some(SpecialHand::ThreeStraights)
        );
    }

    #[test]
    fn three_flushes_splits_suits() {
        let flushes = hand("2H 5H 9H 3S 6S 8S JS KS 3D 7D 10D QD AD");
        assert_eq!(
            CommonSpecials.detect(&flushes),
            Some(SpecialHand::ThreeFlushes)
        );
        let eight_and_five = hand("2H 5H 9H 3H 6H 8H JH KH 3D 7D 10D QD AD");
        assert_eq!(
            CommonSpecials.detect(&eight_and_five),
            Some(SpecialHand::ThreeFlushes)
        );
    }

    #[test]
    fn ordinary_hand_has_no_special() {
        let plain = hand("3D 3C 3S 4D 4C 7D 7C 7S 7H 9H JH QS KD");
        assert_eq!(CommonSpecials.detect(&plain), None);
        assert_eq!(NoSpecials.detect(&plain), None);
    }

    #[test]
    fn runs_accept_ace_at_either_end() {
        assert!(is_run(&[14, 2, 3]));
        assert!(is_run(&[12, 13, 14]));
        assert!(!is_run(&[13, 14, 2]));
        assert!(!is_run(&[5, 5, 6]));
    }

    #[test]
    fn specials_are_ordered_by_rarity() {
        assert!(SpecialHand::Dragon > SpecialHand::SixPairs);
        assert!(SpecialHand::ThreeStraights > SpecialHand::ThreeFlushes);
    }
}
