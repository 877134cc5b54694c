//! Per-player session state: the dealt hand, its special pattern if any, and
//! a cycling list of arrangement hints.

use crate::policy::{Decision, cards_label, decision_logging_enabled};
use thirteen_core::arrange::{
    Arrangement, Partitions, ScoreWeights, Selection, SuggestionSet, select_best, select_top_n,
};
use thirteen_core::error::EngineError;
use thirteen_core::model::card::Card;
use thirteen_core::model::hand::DealtHand;
use thirteen_core::model::seat::Seat;
use thirteen_core::special::{CommonSpecials, SpecialDetector, SpecialHand};
use tracing::{Level, event};

pub const DEFAULT_SUGGESTIONS: usize = 5;

pub struct Advisor<D = CommonSpecials> {
    seat: Seat,
    hand: DealtHand,
    detector: D,
    special: Option<SpecialHand>,
    suggestions: SuggestionSet,
    suggestion_count: usize,
    weights: ScoreWeights,
}

impl Advisor<CommonSpecials> {
    pub fn with_common_specials(seat: Seat, hand: DealtHand) -> Self {
        Self::new(seat, hand, CommonSpecials)
    }
}

impl<D: SpecialDetector> Advisor<D> {
    pub fn new(seat: Seat, hand: DealtHand, detector: D) -> Self {
        let special = detector.detect(&hand);
        Self {
            seat,
            hand,
            detector,
            special,
            suggestions: SuggestionSet::new(),
            suggestion_count: DEFAULT_SUGGESTIONS,
            weights: ScoreWeights::default(),
        }
    }

    pub fn with_suggestion_count(mut self, count: usize) -> Self {
        self.suggestion_count = count;
        self.suggestions.clear();
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self.suggestions.clear();
        self
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn hand(&self) -> &DealtHand {
        &self.hand
    }

    /// Special pattern found when the hand was dealt.
    pub fn special(&self) -> Option<SpecialHand> {
        self.special
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    /// Arrangement to submit when the player does not arrange by hand.
    pub fn autoplay(&self) -> Decision {
        if let Some(special) = self.special {
            event!(
                target: "thirteen_bot::autoplay",
                Level::INFO,
                seat = ?self.seat,
                special = %special,
                reason = "special_hand"
            );
            return Decision::Special(special);
        }

        let stream = Partitions::new(&self.hand).with_weights(self.weights);
        let selection = select_best(stream, &self.hand);
        if selection.is_fallback() {
            tracing::warn!(
                target: "thirteen_bot::autoplay",
                seat = ?self.seat,
                reason = "no_legal_split",
                message = "autoplay is submitting an unranked arrangement"
            );
        } else if tracing::enabled!(Level::INFO) {
            let arrangement = &selection.arrangement;
            event!(
                target: "thirteen_bot::autoplay",
                Level::INFO,
                seat = ?self.seat,
                score = arrangement.score,
                top = %arrangement.top_eval,
                middle = %arrangement.middle_eval,
                bottom = %arrangement.bottom_eval
            );
        }
        Decision::Arranged(selection)
    }

    /// Next suggestion, wrapping back to the best after the last one. The
    /// list is computed on first use. Special hands get no hints.
    pub fn hint(&mut self) -> Option<&Selection> {
        if self.special.is_some() {
            return None;
        }
        if self.suggestions.is_empty() {
            self.refresh_suggestions();
        }
        let seat = self.seat;
        let index = self.suggestions.cursor();
        let total = self.suggestions.len();
        let selection = self.suggestions.next()?;
        log_hint(seat, index, total, selection);
        Some(selection)
    }

    /// Recomputes the hint list and restarts it from the best entry.
    pub fn refresh_suggestions(&mut self) {
        let stream = Partitions::new(&self.hand).with_weights(self.weights);
        let entries = select_top_n(stream, &self.hand, self.suggestion_count);
        if entries.iter().any(Selection::is_fallback) {
            tracing::warn!(
                target: "thirteen_bot::hint",
                seat = ?self.seat,
                reason = "no_legal_split",
                message = "hint list holds only the unranked fallback"
            );
        }
        self.suggestions.replace(entries);
    }

    /// Starts over with a new hand; hints from the old one are dropped.
    pub fn redeal(&mut self, hand: DealtHand) {
        self.special = self.detector.detect(&hand);
        self.hand = hand;
        self.suggestions.clear();
    }

    /// Scores a manual split so the caller can warn about a foul before it
    /// is submitted. Every card must come from the dealt hand.
    pub fn review(
        &self,
        top: &[Card],
        middle: &[Card],
        bottom: &[Card],
    ) -> Result<Arrangement, EngineError> {
        let arrangement = Arrangement::from_parts_weighted(top, middle, bottom, &self.weights)?;
        if let Some(card) = arrangement.cards().find(|card| !self.hand.contains(*card)) {
            return Err(EngineError::ForeignCard { card });
        }
        Ok(arrangement)
    }
}

fn log_hint(seat: Seat, index: usize, total: usize, selection: &Selection) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    let arrangement = &selection.arrangement;
    if decision_logging_enabled() {
        event!(
            target: "thirteen_bot::hint",
            Level::INFO,
            seat = ?seat,
            index,
            total,
            score = arrangement.score,
            quality = ?selection.quality,
            top = %cards_label(&arrangement.top),
            middle = %cards_label(&arrangement.middle),
            bottom = %cards_label(&arrangement.bottom)
        );
    } else {
        event!(
            target: "thirteen_bot::hint",
            Level::INFO,
            seat = ?seat,
            index,
            total,
            score = arrangement.score,
            quality = ?selection.quality
        );
    }
}
