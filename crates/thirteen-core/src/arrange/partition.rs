use super::arrangement::Arrangement;
use super::combinations::{Combinations, binomial};
use super::scoring::ScoreWeights;
use crate::error::EngineError;
use crate::eval::evaluator::{Evaluation, classify};
use crate::eval::ordering::is_foul;
use crate::model::card::Card;
use crate::model::hand::{DealtHand, HAND_SIZE};

/// Top/middle/bottom splits of a thirteen-card hand before foul filtering.
pub const RAW_PARTITIONS: usize = binomial(13, 3) * binomial(10, 5);

/// Validates the hand and streams its non-foul arrangements.
pub fn enumerate(cards: &[Card]) -> Result<Partitions, EngineError> {
    let hand = DealtHand::new(cards)?;
    Ok(Partitions::new(&hand))
}

/// Like `enumerate` but keeps fouled splits, yielding all 72,072.
pub fn enumerate_raw(cards: &[Card]) -> Result<Partitions, EngineError> {
    let hand = DealtHand::new(cards)?;
    Ok(Partitions::new(&hand).including_fouls())
}

struct TopChoice {
    cards: [Card; 3],
    eval: Evaluation,
    rest: [Card; 10],
}

/// Lazy walk over every choice of top three, then middle five from the
/// remaining ten; the bottom is whatever is left.
pub struct Partitions {
    cards: [Card; HAND_SIZE],
    tops: Combinations,
    middles: Combinations,
    current: Option<TopChoice>,
    weights: ScoreWeights,
    skip_fouls: bool,
    examined: usize,
}

impl Partitions {
    pub fn new(hand: &DealtHand) -> Self {
        Self {
            cards: *hand.cards(),
            tops: Combinations::new(HAND_SIZE, 3),
            middles: Combinations::new(10, 5),
            current: None,
            weights: ScoreWeights::default(),
            skip_fouls: true,
            examined: 0,
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn including_fouls(mut self) -> Self {
        self.skip_fouls = false;
        self
    }

    /// Raw splits visited so far, fouled or not.
    pub fn examined(&self) -> usize {
        self.examined
    }

    fn next_top(&mut self) -> bool {
        let Some(indices) = self.tops.advance() else {
            return false;
        };
        let chosen = [indices[0], indices[1], indices[2]];
        let top = chosen.map(|i| self.cards[i]);
        let mut rest = [self.cards[0]; 10];
        let mut filled = 0;
        for (i, card) in self.cards.iter().enumerate() {
            if !chosen.contains(&i) {
                rest[filled] = *card;
                filled += 1;
            }
        }
        self.current = Some(TopChoice {
            cards: top,
            eval: classify(&top),
            rest,
        });
        self.middles.reset();
        true
    }
}

impl Iterator for Partitions {
    type Item = Arrangement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() && !self.next_top() {
                return None;
            }
            let Some(picked) = self
                .middles
                .advance()
                .map(|m| [m[0], m[1], m[2], m[3], m[4]])
            else {
                self.current = None;
                continue;
            };
            let Some(top) = self.current.as_ref() else {
                continue;
            };

            let middle = picked.map(|i| top.rest[i]);
            let mut bottom = [top.rest[0]; 5];
            let mut filled = 0;
            for (i, card) in top.rest.iter().enumerate() {
                if !picked.contains(&i) {
                    bottom[filled] = *card;
                    filled += 1;
                }
            }
            self.examined += 1;

            let arrangement =
                Arrangement::assemble(top.cards, middle, bottom, top.eval, &self.weights);
            if self.skip_fouls
                && is_foul(
                    &arrangement.top_eval,
                    &arrangement.middle_eval,
                    &arrangement.bottom_eval,
                )
            {
                continue;
            }
            return Some(arrangement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::category::HandCategory;
    use crate::model::card::parse_cards;
    use crate::model::deck::Deck;
    use std::collections::HashSet;

    fn partition_key(arrangement: &Arrangement) -> (u64, u64, u64) {
        let mask = |cards: &[Card]| cards.iter().fold(0u64, |acc, c| acc | 1 << c.index());
        (
            mask(&arrangement.top),
            mask(&arrangement.middle),
            mask(&arrangement.bottom),
        )
    }

    #[test]
    fn raw_enumeration_covers_every_split_once() {
        let deck = Deck::shuffled_with_seed(11);
        let cards = &deck.cards()[..13];
        let full: u64 = cards.iter().fold(0, |acc, c| acc | 1 << c.index());

        let mut seen = HashSet::new();
        let mut raw = enumerate_raw(cards).unwrap();
        for arrangement in raw.by_ref() {
            let (top, middle, bottom) = partition_key(&arrangement);
            assert_eq!(top & middle, 0);
            assert_eq!(top & bottom, 0);
            assert_eq!(middle & bottom, 0);
            assert_eq!(top | middle | bottom, full);
            assert!(seen.insert((top, middle, bottom)));
        }
        assert_eq!(seen.len(), RAW_PARTITIONS);
        assert_eq!(raw.examined(), 72_072);
    }

    #[test]
    fn filtered_enumeration_only_yields_legal_splits() {
        let deck = Deck::shuffled_with_seed(5);
        let cards = &deck.cards()[13..26];
        let mut partitions = enumerate(cards).unwrap();
        let mut yielded = 0;
        for arrangement in partitions.by_ref() {
            assert!(!arrangement.is_foul());
            yielded += 1;
        }
        assert!(yielded > 0);
        assert!(yielded < RAW_PARTITIONS);
        assert_eq!(partitions.examined(), RAW_PARTITIONS);
    }

    #[test]
    fn filtered_is_subset_of_raw() {
        let deck = Deck::shuffled_with_seed(3);
        let cards = &deck.cards()[..13];
        let raw: HashSet<_> = enumerate_raw(cards)
            .unwrap()
            .filter(|a| !a.is_foul())
            .map(|a| partition_key(&a))
            .collect();
        let valid: HashSet<_> = enumerate(cards).unwrap().map(|a| partition_key(&a)).collect();
        assert_eq!(raw, valid);
    }

    #[test]
    fn top_never_holds_a_five_card_category() {
        let cards = parse_cards("7C 7D 7H 7S 3D 3C 3S 4D 4C 9H JH QS KD").unwrap();
        for arrangement in enumerate(&cards).unwrap().take(5_000) {
            assert!(arrangement.top_eval.category.reachable_with_three());
            assert_ne!(arrangement.top_eval.category, HandCategory::FourOfAKind);
        }
    }

    #[test]
    fn rejects_malformed_hands() {
        let cards = parse_cards("2C 3C 4C 5C 6C 7C 8C 9C 10C JC QC KC AC").unwrap();
        assert!(matches!(
            enumerate(&cards[..12]),
            Err(EngineError::HandSize { found: 12, .. })
        ));
        let mut dup = cards.clone();
        dup[5] = dup[6];
        assert!(matches!(
            enumerate(&dup),
            Err(EngineError::DuplicateCard { .. })
        ));
    }
}
