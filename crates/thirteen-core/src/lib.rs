#![deny(warnings)]
//! Hand evaluation and arrangement search for Thirteen Water (十三水).
//!
//! A dealt hand of thirteen cards is split into a 3-card top, a 5-card middle
//! and a 5-card bottom that must not foul (top ≤ middle ≤ bottom).

pub mod arrange;
pub mod error;
pub mod eval;
pub mod model;
pub mod special;

pub use arrange::{
    Arrangement, Quality, Selection, SuggestionSet, best_arrangement, top_n_arrangements,
};
pub use error::EngineError;
pub use eval::{Evaluation, HandCategory, evaluate, is_foul};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "thirteen"
    }

    pub const fn codename() -> &'static str {
        "Thirteen Water"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
