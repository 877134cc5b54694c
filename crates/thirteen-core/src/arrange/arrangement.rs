use core::fmt;

use serde::{Deserialize, Serialize};

use super::scoring::ScoreWeights;
use crate::error::EngineError;
use crate::eval::category::HandCategory;
use crate::eval::evaluator::{Evaluation, classify, evaluate};
use crate::eval::ordering::{FoulKind, foul_kind};
use crate::model::card::Card;
use crate::model::hand::{HAND_SIZE, ensure_distinct};

/// A split of thirteen cards into top (3), middle (5) and bottom (5).
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    pub top: [Card; 3],
    pub middle: [Card; 5],
    pub bottom: [Card; 5],
    pub top_eval: Evaluation,
    pub middle_eval: Evaluation,
    pub bottom_eval: Evaluation,
    pub score: f64,
}

impl Arrangement {
    /// Builds and scores a manual arrangement. Fouled arrangements are
    /// accepted; check `foul_kind` before presenting one as legal.
    pub fn from_parts(top: &[Card], middle: &[Card], bottom: &[Card]) -> Result<Self, EngineError> {
        Self::from_parts_weighted(top, middle, bottom, &ScoreWeights::default())
    }

    pub fn from_parts_weighted(
        top: &[Card],
        middle: &[Card],
        bottom: &[Card],
        weights: &ScoreWeights,
    ) -> Result<Self, EngineError> {
        if top.len() != 3 {
            return Err(EngineError::SubHandSize { found: top.len() });
        }
        for part in [middle, bottom] {
            if part.len() != 5 {
                return Err(EngineError::SubHandSize { found: part.len() });
            }
        }
        let all: Vec<Card> = top.iter().chain(middle).chain(bottom).copied().collect();
        debug_assert_eq!(all.len(), HAND_SIZE);
        ensure_distinct(&all)?;

        let top_eval = evaluate(top)?;
        let middle_eval = evaluate(middle)?;
        let bottom_eval = evaluate(bottom)?;
        let mut arrangement = Self {
            top: [top[0], top[1], top[2]],
            middle: [middle[0], middle[1], middle[2], middle[3], middle[4]],
            bottom: [bottom[0], bottom[1], bottom[2], bottom[3], bottom[4]],
            top_eval,
            middle_eval,
            bottom_eval,
            score: 0.0,
        };
        arrangement.score = weights.score(&top_eval, &middle_eval, &bottom_eval);
        Ok(arrangement)
    }

    /// Assembly for the enumerator, whose inputs are already validated.
    pub(crate) fn assemble(
        top: [Card; 3],
        middle: [Card; 5],
        bottom: [Card; 5],
        top_eval: Evaluation,
        weights: &ScoreWeights,
    ) -> Self {
        let middle_eval = classify(&middle);
        let bottom_eval = classify(&bottom);
        Self {
            top,
            middle,
            bottom,
            top_eval,
            middle_eval,
            bottom_eval,
            score: weights.score(&top_eval, &middle_eval, &bottom_eval),
        }
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.top
            .iter()
            .chain(self.middle.iter())
            .chain(self.bottom.iter())
            .copied()
    }

    pub fn categories(&self) -> [HandCategory; 3] {
        [
            self.top_eval.category,
            self.middle_eval.category,
            self.bottom_eval.category,
        ]
    }

    pub fn foul_kind(&self) -> Option<FoulKind> {
        foul_kind(&self.top_eval, &self.middle_eval, &self.bottom_eval)
    }

    pub fn is_foul(&self) -> bool {
        self.foul_kind().is_some()
    }

    /// Same partition regardless of card order inside each sub-hand.
    pub fn same_partition(&self, other: &Arrangement) -> bool {
        fn mask(cards: &[Card]) -> u64 {
            cards.iter().fold(0, |acc, card| acc | 1u64 << card.index())
        }
        mask(&self.top) == mask(&other.top)
            && mask(&self.middle) == mask(&other.middle)
            && mask(&self.bottom) == mask(&other.bottom)
    }

    pub fn snapshot(&self) -> ArrangementSnapshot {
        ArrangementSnapshot::capture(self)
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn row(f: &mut fmt::Formatter<'_>, name: &str, cards: &[Card], eval: &Evaluation) -> fmt::Result {
            let mut sorted = cards.to_vec();
            sorted.sort_by(|a, b| b.cmp(a));
            let text: Vec<String> = sorted.iter().map(|card| card.pretty()).collect();
            writeln!(f, "{name:<6} {:<24} {}", text.join(" "), eval.label())
        }
        row(f, "top", &self.top, &self.top_eval)?;
        row(f, "middle", &self.middle, &self.middle_eval)?;
        row(f, "bottom", &self.bottom, &self.bottom_eval)?;
        write!(f, "score  {:.2}", self.score)
    }
}

/// Serializable view of one sub-hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubHandSnapshot {
    pub cards: Vec<String>,
    pub category: HandCategory,
    pub tie_break: Vec<u8>,
    pub label: String,
}

impl SubHandSnapshot {
    fn capture(cards: &[Card], eval: &Evaluation) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));
        Self {
            cards: sorted.iter().map(Card::to_string).collect(),
            category: eval.category,
            tie_break: eval.tie_break.as_slice().to_vec(),
            label: eval.label(),
        }
    }
}

/// Serializable view of an arrangement for logs and reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrangementSnapshot {
    pub top: SubHandSnapshot,
    pub middle: SubHandSnapshot,
    pub bottom: SubHandSnapshot,
    pub score: f64,
    pub foul: bool,
}

impl ArrangementSnapshot {
    pub fn capture(arrangement: &Arrangement) -> Self {
        Self {
            top: SubHandSnapshot::capture(&arrangement.top, &arrangement.top_eval),
            middle: SubHandSnapshot::capture(&arrangement.middle, &arrangement.middle_eval),
            bottom: SubHandSnapshot::capture(&arrangement.bottom, &arrangement.bottom_eval),
            score: arrangement.score,
            foul: arrangement.is_foul(),
        }
    }

    /// Rebuilds the arrangement, re-validating and re-evaluating every card.
    pub fn restore(&self) -> Result<Arrangement, SnapshotError> {
        let parse = |cards: &[String]| -> Result<Vec<Card>, SnapshotError> {
            cards
                .iter()
                .map(|token| token.parse::<Card>().map_err(SnapshotError::from))
                .collect()
        };
        let top = parse(&self.top.cards)?;
        let middle = parse(&self.middle.cards)?;
        let bottom = parse(&self.bottom.cards)?;
        Ok(Arrangement::from_parts(&top, &middle, &bottom)?)
    }

    pub fn to_json(arrangement: &Arrangement) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(arrangement))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Card(#[from] crate::error::ParseCardError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::parse_cards;

    fn parts(top: &str, middle: &str, bottom: &str) -> Result<Arrangement, EngineError> {
        Arrangement::from_parts(
            &parse_cards(top).unwrap(),
            &parse_cards(middle).unwrap(),
            &parse_cards(bottom).unwrap(),
        )
    }

    #[test]
    fn manual_arrangement_is_scored_and_checked() {
        let arrangement = parts("2C 3D 4H", "9C 9D KH QS 5C", "AS KS QH JD 10C").unwrap();
        assert!(!arrangement.is_foul());
        assert_eq!(
            arrangement.categories(),
            [HandCategory::HighCard, HandCategory::Pair, HandCategory::Straight]
        );
        assert!((arrangement.score - (2.0 + 12.0 + 0.09)).abs() < 1e-9);
        assert_eq!(arrangement.cards().count(), 13);
    }

    #[test]
    fn fouled_manual_arrangement_reports_the_side() {
        let arrangement = parts("AC AD 4H", "9C 8D KH QS 5C", "2S 3S 6H JD 10C").unwrap();
        assert_eq!(arrangement.foul_kind(), Some(FoulKind::TopOverMiddle));
    }

    #[test]
    fn rejects_bad_sizes_and_overlaps() {
        assert_eq!(
            parts("2C 3D", "9C 9D KH QS 5C", "AS KS QH JD 10C"),
            Err(EngineError::SubHandSize { found: 2 })
        );
        assert!(matches!(
            parts("2C 3D 4H", "9C 9D KH QS 2C", "AS KS QH JD 10C"),
            Err(EngineError::DuplicateCard { .. })
        ));
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let arrangement = parts("2C 3D 4H", "9C 9D KH QS 5C", "AS KS QH JD 10C").unwrap();
        let json = ArrangementSnapshot::to_json(&arrangement).unwrap();
        assert!(json.contains("\"label\": \"Pair of Nines\""));
        assert!(json.contains("\"category\": \"straight\""));
        let restored = ArrangementSnapshot::from_json(&json).unwrap().restore().unwrap();
        assert!(restored.same_partition(&arrangement));
        assert_eq!(restored.score, arrangement.score);
    }

    #[test]
    fn display_lists_each_row() {
        let arrangement = parts("2C 3D 4H", "9C 9D KH QS 5C", "AS KS QH JD 10C").unwrap();
        let text = arrangement.to_string();
        assert!(text.contains("Pair of Nines"));
        assert!(text.contains("A♠ K♠ Q♥ J♦ 10♣"));
        assert!(text.ends_with("score  14.09"));
    }
}
