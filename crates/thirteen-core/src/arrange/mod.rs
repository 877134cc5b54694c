//! Arrangement search: subset generation, partition enumeration, scoring and
//! selection.

pub mod arrangement;
pub mod combinations;
pub mod partition;
pub mod scoring;
pub mod selector;
pub mod suggestions;

pub use arrangement::{Arrangement, ArrangementSnapshot, SnapshotError, SubHandSnapshot};
pub use combinations::{Combinations, binomial, combinations_of};
pub use partition::{Partitions, RAW_PARTITIONS, enumerate, enumerate_raw};
pub use scoring::{ScoreWeights, score};
pub use selector::{
    Quality, Selection, best_arrangement, fallback, select_best, select_top_n, top_n_arrangements,
};
pub use suggestions::SuggestionSet;
