use super::{ArrangeContext, Decision, Policy, cards_label};
use thirteen_core::arrange::{Partitions, ScoreWeights, Selection, select_best};
use tracing::{Level, event};

/// Exhaustive search for the highest scoring legal arrangement
#[derive(Debug, Clone, Default)]
pub struct HeuristicPolicy {
    weights: ScoreWeights,
}

impl HeuristicPolicy {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }
}

impl Policy for HeuristicPolicy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn arrange(&mut self, ctx: &ArrangeContext) -> Decision {
        if let Some(special) = ctx.detector.detect(ctx.hand) {
            event!(
                target: "thirteen_bot::arrange",
                Level::INFO,
                seat = ?ctx.seat,
                policy = self.name(),
                special = %special,
                reason = "special_hand"
            );
            return Decision::Special(special);
        }

        let stream = Partitions::new(ctx.hand).with_weights(self.weights);
        let selection = select_best(stream, ctx.hand);
        if selection.is_fallback() {
            tracing::warn!(
                target: "thirteen_bot::arrange",
                seat = ?ctx.seat,
                policy = self.name(),
                reason = "no_legal_split",
                message = "search found no legal arrangement; using unranked fallback"
            );
        }
        log_arrangement(ctx, self.name(), &selection);
        Decision::Arranged(selection)
    }
}

pub(crate) fn log_arrangement(ctx: &ArrangeContext, policy: &str, selection: &Selection) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    let arrangement = &selection.arrangement;
    event!(
        target: "thirteen_bot::arrange",
        Level::INFO,
        seat = ?ctx.seat,
        policy,
        quality = ?selection.quality,
        score = arrangement.score,
        top = %cards_label(&arrangement.top),
        middle = %cards_label(&arrangement.middle),
        bottom = %cards_label(&arrangement.bottom),
        top_label = %arrangement.top_eval,
        middle_label = %arrangement.middle_eval,
        bottom_label = %arrangement.bottom_eval
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirteen_core::arrange::{Quality, best_arrangement};
    use thirteen_core::eval::HandCategory;
    use thirteen_core::model::card::parse_cards;
    use thirteen_core::model::hand::DealtHand;
    use thirteen_core::model::seat::Seat;
    use thirteen_core::special::{CommonSpecials, NoSpecials, SpecialHand};

    fn hand(text: &str) -> DealtHand {
        DealtHand::new(&parse_cards(text).unwrap()).unwrap()
    }

    #[test]
    fn matches_engine_best_arrangement() {
        let dealt = hand("3D 3C 3S 4D 4C 7D 7C 7S 7H 9H JH QS KD");
        let ctx = ArrangeContext {
            seat: Seat::South,
            hand: &dealt,
            detector: &NoSpecials,
        };
        let mut policy = HeuristicPolicy::default();
        let decision = policy.arrange(&ctx);
        let expected = best_arrangement(dealt.cards()).unwrap();

        let Decision::Arranged(selection) = decision else {
            panic!("expected an arrangement");
        };
        assert_eq!(selection.quality, Quality::Ranked);
        assert_eq!(selection.score(), expected.score());
        assert_eq!(
            selection.arrangement.bottom_eval.category,
            HandCategory::FourOfAKind
        );
    }

    #[test]
    fn special_hand_skips_the_search() {
        let dragon = hand("2C 3D 4H 5S 6C 7D 8H 9S 10C JD QH KS AC");
        let ctx = ArrangeContext {
            seat: Seat::North,
            hand: &dragon,
            detector: &CommonSpecials,
        };
        let decision = HeuristicPolicy::default().arrange(&ctx);
        assert_eq!(decision, Decision::Special(SpecialHand::Dragon));
    }
}
