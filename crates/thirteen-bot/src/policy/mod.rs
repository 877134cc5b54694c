mod heuristic;
mod naive;

pub use heuristic::HeuristicPolicy;
pub use naive::NaivePolicy;

use thirteen_core::arrange::{Arrangement, Selection};
use thirteen_core::model::hand::DealtHand;
use thirteen_core::model::seat::Seat;
use thirteen_core::special::{SpecialDetector, SpecialHand};

/// Context provided to policies for arranging one dealt hand
pub struct ArrangeContext<'a> {
    pub seat: Seat,
    pub hand: &'a DealtHand,
    pub detector: &'a dyn SpecialDetector,
}

/// What a policy settled on for a hand
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// The whole hand matched a special pattern; it is shown as dealt.
    Special(SpecialHand),
    Arranged(Selection),
}

impl Decision {
    pub fn arrangement(&self) -> Option<&Arrangement> {
        match self {
            Decision::Special(_) => None,
            Decision::Arranged(selection) => Some(&selection.arrangement),
        }
    }

    pub fn special(&self) -> Option<SpecialHand> {
        match self {
            Decision::Special(special) => Some(*special),
            Decision::Arranged(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decision::Arranged(selection) if selection.is_fallback())
    }
}

/// Unified interface for arranging a dealt hand
pub trait Policy: Send {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Split the hand into top/middle/bottom, or report a special hand.
    fn arrange(&mut self, ctx: &ArrangeContext) -> Decision;
}

pub(crate) fn decision_logging_enabled() -> bool {
    flag_enabled(std::env::var("THIRTEEN_DECISION_DETAILS").ok().as_deref())
}

fn flag_enabled(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
}

pub(crate) fn cards_label(cards: &[thirteen_core::model::card::Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirteen_core::model::deck::Deck;

    #[test]
    fn decision_accessors_match_variant() {
        let special = Decision::Special(SpecialHand::Dragon);
        assert_eq!(special.special(), Some(SpecialHand::Dragon));
        assert!(special.arrangement().is_none());
        assert!(!special.is_fallback());

        let hand = Deck::shuffled_with_seed(3).hand_for(Seat::East);
        let fallback = Decision::Arranged(thirteen_core::arrange::fallback(&hand));
        assert!(fallback.is_fallback());
        assert!(fallback.arrangement().is_some());
    }

    #[test]
    fn detail_flag_accepts_common_truthy_spellings() {
        for raw in ["1", "true", "TRUE", "on", " ON "] {
            assert!(flag_enabled(Some(raw)), "{raw:?} should enable details");
        }
        for raw in ["", "0", "off", "yes please"] {
            assert!(!flag_enabled(Some(raw)), "{raw:?} should not enable details");
        }
        assert!(!flag_enabled(None));
    }
}
