mod agents;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thirteen_bot::advisor::Advisor;
use thirteen_bot::policy::{ArrangeContext, Policy};
use thirteen_core::eval::HandCategory;
use thirteen_core::model::deck::Deck;
use thirteen_core::model::hand::DealtHand;
use thirteen_core::model::seat::Seat;
use thirteen_core::special::{CommonSpecials, SpecialHand};
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{AgentKind, BenchmarkConfig, ResolvedOutputs};
use crate::logging::telemetry_path;

pub use agents::AgentError;
use agents::AgentBlueprint;

/// Deals seeded hands and has every configured agent arrange them.
pub struct ArrangementRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub hands_played: usize,
    pub seats_per_hand: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl ArrangementRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;
        Ok(Self {
            config,
            outputs,
            agents,
        })
    }

    /// Execute the run, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut policies: Vec<Box<dyn Policy>> =
            self.agents.iter().map(AgentBlueprint::spawn_policy).collect();
        let mut analytics = AnalyticsCollector::new(&self.config)?;
        let mut rows_written = 0usize;

        for hand_index in 0..self.config.deals.hands {
            let deal_seed = rng.next_u64();
            let hands = Deck::shuffled_with_seed(deal_seed).deal();
            event!(
                target: "thirteen_bench::deal",
                Level::INFO,
                run_id = %self.config.run_id,
                hand_index,
                deal_seed,
                seats = self.config.deals.seats.len()
            );

            for &seat in &self.config.deals.seats {
                let hand = &hands[seat.index()];
                let reference = self.reference_scores(seat, hand);
                for (agent, policy) in self.agents.iter().zip(policies.iter_mut()) {
                    let outcome = play_seat(agent, policy.as_mut(), seat, hand, &reference);
                    analytics.record(&outcome)?;
                    write_row(
                        &mut writer,
                        &self.config.run_id,
                        hand_index,
                        deal_seed,
                        &outcome,
                    )?;
                    rows_written += 1;
                }
            }
        }

        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self
            .config
            .logging
            .enable_structured
            .then(|| telemetry_path(&self.outputs));

        Ok(RunSummary {
            hands_played: self.config.deals.hands,
            seats_per_hand: self.config.deals.seats.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }

    /// Scores of the seat's hint list, best first. Empty for special hands
    /// or when suggestions are disabled.
    fn reference_scores(&self, seat: Seat, hand: &DealtHand) -> Vec<f64> {
        let count = self.config.suggestions.count;
        let mut advisor =
            Advisor::new(seat, hand.clone(), CommonSpecials).with_suggestion_count(count);
        if count == 0 || advisor.special().is_some() {
            return Vec::new();
        }
        advisor.refresh_suggestions();
        advisor
            .suggestions()
            .as_slice()
            .iter()
            .filter(|selection| !selection.is_fallback())
            .map(|selection| selection.score())
            .collect()
    }
}

fn play_seat(
    agent: &AgentBlueprint,
    policy: &mut dyn Policy,
    seat: Seat,
    hand: &DealtHand,
    reference: &[f64],
) -> SeatOutcome {
    let ctx = ArrangeContext {
        seat,
        hand,
        detector: &CommonSpecials,
    };
    let start = Instant::now();
    let decision = policy.arrange(&ctx);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let arrangement = decision.arrangement();
    let score = arrangement.map(|a| a.score);
    let best_score = reference.first().copied();
    SeatOutcome {
        agent_name: agent.name.clone(),
        agent_kind: agent.kind,
        seat,
        special: decision.special(),
        categories: arrangement.map(|a| a.categories()),
        score,
        best_score,
        gap_to_best: score.zip(best_score).map(|(got, best)| best - got),
        suggestions: reference.len(),
        fallback: decision.is_fallback(),
        foul: arrangement.is_some_and(|a| a.is_foul()),
        elapsed_ms,
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(parent) = path {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn write_row(
    writer: &mut BufWriter<File>,
    run_id: &str,
    hand_index: usize,
    deal_seed: u64,
    outcome: &SeatOutcome,
) -> Result<(), RunnerError> {
    let row = HandLogRow {
        run_id,
        deal_id: format!("H{hand_index:05}_{}", outcome.seat.index()),
        hand_index,
        deal_seed,
        seat: outcome.seat,
        agent: &outcome.agent_name,
        special: outcome.special,
        categories: outcome.categories,
        score: outcome.score,
        best_score: outcome.best_score,
        gap_to_best: outcome.gap_to_best,
        suggestions: outcome.suggestions,
        fallback: outcome.fallback,
        foul: outcome.foul,
        ms: outcome.elapsed_ms,
    };
    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// One agent's decision for one seat of one deal.
#[derive(Debug, Clone)]
pub struct SeatOutcome {
    pub agent_name: String,
    pub agent_kind: AgentKind,
    pub seat: Seat,
    pub special: Option<SpecialHand>,
    pub categories: Option<[HandCategory; 3]>,
    pub score: Option<f64>,
    pub best_score: Option<f64>,
    pub gap_to_best: Option<f64>,
    pub suggestions: usize,
    pub fallback: bool,
    pub foul: bool,
    pub elapsed_ms: f64,
}

impl SeatOutcome {
    pub fn is_special(&self) -> bool {
        self.special.is_some()
    }
}

#[derive(Serialize)]
struct HandLogRow<'a> {
    run_id: &'a str,
    deal_id: String,
    hand_index: usize,
    deal_seed: u64,
    seat: Seat,
    agent: &'a str,
    special: Option<SpecialHand>,
    categories: Option<[HandCategory; 3]>,
    score: Option<f64>,
    best_score: Option<f64>,
    gap_to_best: Option<f64>,
    suggestions: usize,
    fallback: bool,
    foul: bool,
    ms: f64,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
