use crate::error::EngineError;
use crate::model::card::Card;
use serde::{Deserialize, Serialize};

pub const HAND_SIZE: usize = 13;

/// Thirteen distinct cards dealt to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct DealtHand {
    cards: [Card; HAND_SIZE],
}

impl DealtHand {
    pub fn new(cards: &[Card]) -> Result<Self, EngineError> {
        if cards.len() != HAND_SIZE {
            return Err(EngineError::HandSize {
                expected: HAND_SIZE,
                found: cards.len(),
            });
        }
        ensure_distinct(cards)?;
        let mut owned = [cards[0]; HAND_SIZE];
        owned.copy_from_slice(cards);
        Ok(Self { cards: owned })
    }

    /// Caller guarantees the cards are distinct (e.g. a slice of one deck).
    pub(crate) fn from_array(cards: [Card; HAND_SIZE]) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Cards sorted strongest first (rank, then suit).
    pub fn sorted_desc(&self) -> [Card; HAND_SIZE] {
        let mut sorted = self.cards;
        sorted.sort_by(|a, b| b.cmp(a));
        sorted
    }

    /// Occurrences of each rank value, indexed by `Rank::value()`.
    pub fn rank_counts(&self) -> [u8; 15] {
        let mut counts = [0u8; 15];
        for card in &self.cards {
            counts[card.rank.value() as usize] += 1;
        }
        counts
    }

    pub fn suit_counts(&self) -> [u8; 4] {
        let mut counts = [0u8; 4];
        for card in &self.cards {
            counts[card.suit.index()] += 1;
        }
        counts
    }
}

impl TryFrom<Vec<Card>> for DealtHand {
    type Error = EngineError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        DealtHand::new(&cards)
    }
}

impl From<DealtHand> for Vec<Card> {
    fn from(hand: DealtHand) -> Self {
        hand.cards.to_vec()
    }
}

/// Fails with the first card that appears twice.
pub fn ensure_distinct(cards: &[Card]) -> Result<(), EngineError> {
    let mut seen = 0u64;
    for card in cards {
        let bit = 1u64 << card.index();
        if seen & bit != 0 {
            return Err(EngineError::DuplicateCard { card: *card });
        }
        seen |= bit;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{DealtHand, HAND_SIZE, ensure_distinct};
    use crate::error::EngineError;
    use crate::model::card::{Card, parse_cards};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn thirteen() -> Vec<Card> {
        parse_cards("2C 3C 4C 5C 6C 7C 8C 9C 10C JC QC KC AC").unwrap()
    }

    #[test]
    fn accepts_thirteen_distinct_cards() {
        let hand = DealtHand::new(&thirteen()).expect("valid hand");
        assert_eq!(hand.cards().len(), HAND_SIZE);
        assert!(hand.contains(Card::new(Rank::Ace, Suit::Clubs)));
        assert_eq!(hand.suit_counts(), [13, 0, 0, 0]);
    }

    #[test]
    fn rejects_wrong_length() {
        let mut cards = thirteen();
        cards.pop();
        assert!(matches!(
            DealtHand::new(&cards),
            Err(EngineError::HandSize { expected: 13, found: 12 })
        ));
    }

    #[test]
    fn rejects_duplicates() {
        let mut cards = thirteen();
        cards[12] = cards[0];
        let err = DealtHand::new(&cards).expect_err("duplicate should fail");
        assert!(err.is_invalid_input());
        assert!(ensure_distinct(&cards[..12]).is_ok());
    }

    #[test]
    fn sorted_desc_puts_aces_first() {
        let hand = DealtHand::new(&thirteen()).unwrap();
        let sorted = hand.sorted_desc();
        assert_eq!(sorted[0].rank, Rank::Ace);
        assert_eq!(sorted[12].rank, Rank::Two);
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let hand = DealtHand::new(&thirteen()).unwrap();
        let json = serde_json::to_string(&hand).unwrap();
        let back: DealtHand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hand);

        let short = serde_json::to_string(&thirteen()[..5]).unwrap();
        assert!(serde_json::from_str::<DealtHand>(&short).is_err());
    }
}
