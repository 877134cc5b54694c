use crate::model::card::Card;
use crate::model::hand::{DealtHand, HAND_SIZE};
use crate::model::rank::Rank;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Splits the deck into four consecutive thirteen-card hands, North first.
    pub fn deal(&self) -> [DealtHand; 4] {
        Seat::LOOP.map(|seat| self.hand_for(seat))
    }

    pub fn hand_for(&self, seat: Seat) -> DealtHand {
        let start = seat.index() * HAND_SIZE;
        let mut cards = [self.cards[start]; HAND_SIZE];
        cards.copy_from_slice(&self.cards[start..start + HAND_SIZE]);
        DealtHand::from_array(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use crate::model::seat::Seat;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.cards().len(), 52);
        let unique: HashSet<_> = deck.cards().iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn deal_partitions_the_deck() {
        let deck = Deck::shuffled_with_seed(7);
        let hands = deck.deal();
        let mut seen = HashSet::new();
        for hand in &hands {
            for card in hand.iter() {
                assert!(seen.insert(*card));
            }
        }
        assert_eq!(seen.len(), 52);
        assert_eq!(hands[Seat::South.index()], deck.hand_for(Seat::South));
    }
}
