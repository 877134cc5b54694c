use crate::model::card::Card;
use thiserror::Error;

/// Failures surfaced by the evaluator, enumerator and selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("sub-hand must hold 3 or 5 cards, found {found}")]
    SubHandSize { found: usize },
    #[error("hand must hold {expected} cards, found {found}")]
    HandSize { expected: usize, found: usize },
    #[error("card {card} appears more than once")]
    DuplicateCard { card: Card },
    #[error("card {card} is not in the dealt hand")]
    ForeignCard { card: Card },
    #[error("invalid score weights: {reason}")]
    InvalidWeights { reason: &'static str },
    #[error("no arrangement avoids a foul; only the unranked fallback is available")]
    EmptyResult,
}

impl EngineError {
    /// True for the malformed-input family, as opposed to `EmptyResult`.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, EngineError::EmptyResult)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse card '{token}': {reason}")]
pub struct ParseCardError {
    pub token: String,
    pub reason: &'static str,
}

impl ParseCardError {
    pub(crate) fn new(token: &str, reason: &'static str) -> Self {
        Self {
            token: token.to_string(),
            reason,
        }
    }
}
