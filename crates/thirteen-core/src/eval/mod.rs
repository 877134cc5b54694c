//! Sub-hand classification and the cross-size strength order.
//!
//! - `category`: the nine poker categories, weakest first.
//! - `evaluator`: classifies a 3- or 5-card sub-hand into an `Evaluation`.
//! - `ordering`: compares evaluations of either size and detects fouls.

pub mod category;
pub mod evaluator;
pub mod ordering;

pub use category::HandCategory;
pub use evaluator::{Evaluation, TieBreak, evaluate};
pub use ordering::{FoulKind, compare_strength, foul_kind, is_foul};
