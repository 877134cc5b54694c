#![deny(warnings)]
//! Deterministic benchmark harness for arrangement policies.

pub mod analytics;
pub mod config;
pub mod logging;
pub mod runner;
