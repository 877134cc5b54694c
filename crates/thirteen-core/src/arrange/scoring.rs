use crate::error::EngineError;
use crate::eval::evaluator::Evaluation;

/// Highest leading rank a grouped sub-hand can carry (aces).
const MAX_BONUS_RANK: f64 = 14.0;

/// Multipliers applied to each sub-hand's category ordinal plus the bonus
/// per leading rank for pair, two pair and trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub top: f64,
    pub middle: f64,
    pub bottom: f64,
    /// Three maximal bonuses (3 × 14 × weight) must stay below the smallest
    /// position weight; see `validate`.
    pub rank_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            top: 1.0,
            middle: 2.0,
            bottom: 3.0,
            rank_bonus: 0.01,
        }
    }
}

impl ScoreWeights {
    /// Rejects weights under which a rank bonus could outweigh a category
    /// step: every position weight must be positive and finite, and
    /// `3 × 14 × rank_bonus` must stay below the smallest of them.
    pub fn validate(&self) -> Result<(), EngineError> {
        let positions = [self.top, self.middle, self.bottom];
        if positions.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(EngineError::InvalidWeights {
                reason: "position weights must be positive",
            });
        }
        if !self.rank_bonus.is_finite() || self.rank_bonus < 0.0 {
            return Err(EngineError::InvalidWeights {
                reason: "rank bonus must be non-negative",
            });
        }
        let smallest = positions.into_iter().fold(f64::INFINITY, f64::min);
        if 3.0 * MAX_BONUS_RANK * self.rank_bonus >= smallest {
            return Err(EngineError::InvalidWeights {
                reason: "rank bonus could outweigh a category step",
            });
        }
        Ok(())
    }

    pub fn base(&self, top: &Evaluation, middle: &Evaluation, bottom: &Evaluation) -> f64 {
        f64::from(top.category.ordinal()) * self.top
            + f64::from(middle.category.ordinal()) * self.middle
            + f64::from(bottom.category.ordinal()) * self.bottom
    }

    pub fn bonus(&self, top: &Evaluation, middle: &Evaluation, bottom: &Evaluation) -> f64 {
        [top, middle, bottom]
            .into_iter()
            .filter(|eval| eval.category.is_grouped_bonus())
            .filter_map(|eval| eval.tie_break.leading())
            .map(|rank| f64::from(rank) * self.rank_bonus)
            .sum()
    }

    pub fn score(&self, top: &Evaluation, middle: &Evaluation, bottom: &Evaluation) -> f64 {
        self.base(top, middle, bottom) + self.bonus(top, middle, bottom)
    }
}

/// Score under the default weights.
pub fn score(top: &Evaluation, middle: &Evaluation, bottom: &Evaluation) -> f64 {
    ScoreWeights::default().score(top, middle, bottom)
}
