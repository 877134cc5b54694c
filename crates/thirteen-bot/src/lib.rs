#![deny(warnings)]
//! Arrangement policies and the per-player advisor built on `thirteen-core`.

pub mod advisor;
pub mod policy;

pub use advisor::{Advisor, DEFAULT_SUGGESTIONS};
pub use policy::{ArrangeContext, Decision, HeuristicPolicy, NaivePolicy, Policy};
