use crate::error::ParseCardError;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Cards order by rank first; suit only separates otherwise equal ranks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense index in `0..52`, suit-major.
    pub const fn index(self) -> usize {
        self.suit.index() * 13 + (self.rank.value() as usize - 2)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        let suit = Suit::from_index(index / 13)?;
        let rank = Rank::from_value((index % 13) as u8 + 2)?;
        Some(Self::new(rank, suit))
    }

    /// Rank followed by the suit glyph, e.g. `10♥`.
    pub fn pretty(self) -> String {
        format!("{}{}", self.rank, self.suit.glyph())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let mut chars = token.chars();
        let suit_char = chars
            .next_back()
            .ok_or_else(|| ParseCardError::new(token, "empty card token"))?;
        let suit = Suit::from_symbol(suit_char)
            .ok_or_else(|| ParseCardError::new(token, "unknown suit"))?;
        let rank = Rank::from_symbol(chars.as_str())
            .ok_or_else(|| ParseCardError::new(token, "unknown rank"))?;
        Ok(Card::new(rank, suit))
    }
}

/// Parses a whitespace or comma separated list such as `"AS KD 10h 2♣"`.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, ParseCardError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit, parse_cards};

    #[test]
    fn parses_ascii_and_glyph_tokens() {
        assert_eq!("AS".parse::<Card>().unwrap(), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!("10h".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!("Td".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!("7♦".parse::<Card>().unwrap(), Card::new(Rank::Seven, Suit::Diamonds));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!("".parse::<Card>().is_err());
        assert!("ZS".parse::<Card>().is_err());
        assert!("AX".parse::<Card>().is_err());
        assert!("S".parse::<Card>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let card = Card::new(Rank::Queen, Suit::Clubs);
        assert_eq!(card.to_string(), "QC");
        assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
        assert_eq!(card.pretty(), "Q♣");
    }

    #[test]
    fn index_covers_the_deck() {
        for index in 0..52 {
            let card = Card::from_index(index).expect("valid index");
            assert_eq!(card.index(), index);
        }
        assert!(Card::from_index(52).is_none());
    }

    #[test]
    fn parse_cards_splits_on_spaces_and_commas() {
        let cards = parse_cards("AS, KD 10h  2♣").unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[3], Card::new(Rank::Two, Suit::Clubs));
        assert!(parse_cards("AS QQ").is_err());
    }

    #[test]
    fn ordering_is_rank_first() {
        let low_spade = Card::new(Rank::Three, Suit::Spades);
        let high_club = Card::new(Rank::Four, Suit::Clubs);
        assert!(high_club > low_spade);
    }
}
