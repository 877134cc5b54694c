use core::cmp::Ordering;

use super::evaluator::Evaluation;

/// Which adjacent pair of sub-hands is out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoulKind {
    TopOverMiddle,
    MiddleOverBottom,
}

/// Strength order shared by 3- and 5-card evaluations.
///
/// Categories decide first. Within a category the tie-breaks compare
/// lexicographically; a 3-card tie-break that is a prefix of a 5-card one
/// (pair of kings, ace kicker against pair of kings, ace, four, three) ranks
/// below it, which keeps the order total across sizes.
pub fn compare_strength(a: &Evaluation, b: &Evaluation) -> Ordering {
    a.category
        .cmp(&b.category)
        .then_with(|| a.tie_break.cmp(&b.tie_break))
}

pub fn foul_kind(top: &Evaluation, middle: &Evaluation, bottom: &Evaluation) -> Option<FoulKind> {
    if compare_strength(top, middle) == Ordering::Greater {
        Some(FoulKind::TopOverMiddle)
    } else if compare_strength(middle, bottom) == Ordering::Greater {
        Some(FoulKind::MiddleOverBottom)
    } else {
        None
    }
}

/// True when top outranks middle or middle outranks bottom. Ties are legal.
pub fn is_foul(top: &Evaluation, middle: &Evaluation, bottom: &Evaluation) -> bool {
    foul_kind(top, middle, bottom).is_some()
}
