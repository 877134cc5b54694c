use super::heuristic::log_arrangement;
use super::{ArrangeContext, Decision, Policy};
use thirteen_core::arrange::{Arrangement, Selection, fallback};

/// Deals cards out by rank alone: the strongest five go to the bottom, the
/// next five to the middle and the weakest three on top. No search, and
/// special hands are ignored. Used as the comparison baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaivePolicy;

impl Policy for NaivePolicy {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn arrange(&mut self, ctx: &ArrangeContext) -> Decision {
        let sorted = ctx.hand.sorted_desc();
        // A rank split can still foul, e.g. a pair on top over a high-card
        // middle. The foul is left for `Arrangement::is_foul` to report.
        let selection = match Arrangement::from_parts(&sorted[10..], &sorted[5..10], &sorted[..5]) {
            Ok(arrangement) => Selection::ranked(arrangement),
            Err(_) => fallback(ctx.hand),
        };
        log_arrangement(ctx, self.name(), &selection);
        Decision::Arranged(selection)
    }
}
