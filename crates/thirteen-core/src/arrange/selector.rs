use serde::{Deserialize, Serialize};

use super::arrangement::Arrangement;
use super::partition::Partitions;
use super::scoring::ScoreWeights;
use crate::error::EngineError;
use crate::model::card::Card;
use crate::model::hand::DealtHand;

/// Whether a selection is a scored choice or the unranked fallback used when
/// a search finds no legal split. A `Ranked` choice made outside the search
/// may still foul; check `Arrangement::is_foul`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Ranked,
    /// No legal split was found; the arrangement may foul.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub arrangement: Arrangement,
    pub quality: Quality,
}

impl Selection {
    pub fn ranked(arrangement: Arrangement) -> Self {
        Self {
            arrangement,
            quality: Quality::Ranked,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.quality == Quality::Fallback
    }

    pub fn score(&self) -> f64 {
        self.arrangement.score
    }

    /// Refuses to hand out a fallback as if it were a legal arrangement.
    pub fn into_ranked(self) -> Result<Arrangement, EngineError> {
        match self.quality {
            Quality::Ranked => Ok(self.arrangement),
            Quality::Fallback => Err(EngineError::EmptyResult),
        }
    }
}

/// Highest scoring legal arrangement; the first one generated wins ties.
pub fn best_arrangement(cards: &[Card]) -> Result<Selection, EngineError> {
    let hand = DealtHand::new(cards)?;
    Ok(select_best(Partitions::new(&hand), &hand))
}

/// Up to `n` legal arrangements with strictly decreasing scores.
pub fn top_n_arrangements(cards: &[Card], n: usize) -> Result<Vec<Selection>, EngineError> {
    let hand = DealtHand::new(cards)?;
    Ok(select_top_n(Partitions::new(&hand), &hand, n))
}

pub fn select_best<I>(stream: I, hand: &DealtHand) -> Selection
where
    I: IntoIterator<Item = Arrangement>,
{
    let mut best: Option<Arrangement> = None;
    for candidate in stream {
        let better = best
            .as_ref()
            .is_none_or(|current| candidate.score > current.score);
        if better {
            best = Some(candidate);
        }
    }
    match best {
        Some(arrangement) => Selection::ranked(arrangement),
        None => fallback(hand),
    }
}

/// Keeps a bounded list sorted by descending score. A candidate whose score
/// is already present is dropped so the list stays diverse, leaving the
/// earliest generated arrangement for each score.
pub fn select_top_n<I>(stream: I, hand: &DealtHand, n: usize) -> Vec<Selection>
where
    I: IntoIterator<Item = Arrangement>,
{
    if n == 0 {
        return Vec::new();
    }

    let mut kept: Vec<Arrangement> = Vec::with_capacity(n + 1);
    let mut seen_any = false;
    for candidate in stream {
        seen_any = true;
        if kept.len() == n && kept.last().is_some_and(|worst| candidate.score <= worst.score) {
            continue;
        }
        let search = kept.binary_search_by(|held| candidate.score.total_cmp(&held.score));
        match search {
            Ok(_) => continue,
            Err(position) => {
                kept.insert(position, candidate);
                kept.truncate(n);
            }
        }
    }

    if !seen_any {
        return vec![fallback(hand)];
    }
    kept.into_iter().map(Selection::ranked).collect()
}

/// Strongest three on top, next five in the middle, weakest five on the
/// bottom, ordered by rank then suit. Marked as a fallback because it will
/// usually foul.
pub fn fallback(hand: &DealtHand) -> Selection {
    fallback_weighted(hand, &ScoreWeights::default())
}

pub fn fallback_weighted(hand: &DealtHand, weights: &ScoreWeights) -> Selection {
    let sorted = hand.sorted_desc();
    let top = [sorted[0], sorted[1], sorted[2]];
    let middle = [sorted[3], sorted[4], sorted[5], sorted[6], sorted[7]];
    let bottom = [sorted[8], sorted[9], sorted[10], sorted[11], sorted[12]];
    let top_eval = crate::eval::evaluator::classify(&top);
    Selection {
        arrangement: Arrangement::assemble(top, middle, bottom, top_eval, weights),
        quality: Quality::Fallback,
    }
}
