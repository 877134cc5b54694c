use super::selector::{Selection, top_n_arrangements};
use crate::error::EngineError;
use crate::model::card::Card;

/// Hint list owned by one player's session, read through a cursor that
/// wraps around instead of running dry.
#[derive(Debug, Clone, Default)]
pub struct SuggestionSet {
    entries: Vec<Selection>,
    cursor: usize,
}

impl SuggestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the top-N search for `cards` and starts reading from the best.
    pub fn generate(cards: &[Card], count: usize) -> Result<Self, EngineError> {
        let mut set = Self::new();
        set.replace(top_n_arrangements(cards, count)?);
        Ok(set)
    }

    pub fn replace(&mut self, entries: Vec<Selection>) {
        self.entries = entries;
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Current suggestion; the cursor then moves on, modulo the list length.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Selection> {
        if self.entries.is_empty() {
            return None;
        }
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.entries.len();
        self.entries.get(index)
    }

    pub fn peek(&self) -> Option<&Selection> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Selection] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::SuggestionSet;
    use crate::model::deck::Deck;

    #[test]
    fn cursor_cycles_through_every_entry() {
        let deck = Deck::shuffled_with_seed(13);
        let mut set = SuggestionSet::generate(&deck.cards()[..13], 3).unwrap();
        let len = set.len();
        assert!(len >= 1 && len <= 3);

        let first_pass: Vec<f64> = (0..len).map(|_| set.next().unwrap().score()).collect();
        let second_pass: Vec<f64> = (0..len).map(|_| set.next().unwrap().score()).collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(set.cursor(), 0);
        assert_eq!(set.peek().map(|s| s.score()), Some(first_pass[0]));
    }

    #[test]
    fn empty_set_yields_nothing() {
        let mut set = SuggestionSet::new();
        assert!(set.next().is_none());
        assert!(set.peek().is_none());
    }

    #[test]
    fn replace_resets_the_cursor() {
        let deck = Deck::shuffled_with_seed(2);
        let mut set = SuggestionSet::generate(&deck.cards()[..13], 4).unwrap();
        set.next();
        let fresh = SuggestionSet::generate(&deck.cards()[13..26], 2).unwrap();
        set.replace(fresh.as_slice().to_vec());
        assert_eq!(set.cursor(), 0);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn malformed_hand_is_rejected() {
        let deck = Deck::standard();
        assert!(SuggestionSet::generate(&deck.cards()[..12], 3).is_err());
    }
}
