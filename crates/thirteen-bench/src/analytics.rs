use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::config::{AgentKind, BenchmarkConfig};
use crate::runner::SeatOutcome;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("baseline agent '{0}' not present in run results")]
    MissingBaseline(String),
    #[error("agent '{0}' defined in results but missing from configuration")]
    UnknownAgent(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub struct AnalyticsCollector {
    baseline: String,
    agents: HashMap<String, AgentAccumulator>,
    agent_order: Vec<String>,
    latency_budget_ms: u64,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Result<Self, AnalyticsError> {
        let baseline = config
            .metrics
            .baseline
            .clone()
            .ok_or_else(|| AnalyticsError::MissingBaseline("<unset>".into()))?;

        let mut agents = HashMap::new();
        let mut order = Vec::new();
        for agent in &config.agents {
            agents.insert(
                agent.name.clone(),
                AgentAccumulator::new(agent.name.clone(), agent.kind),
            );
            order.push(agent.name.clone());
        }

        Ok(Self {
            baseline,
            agents,
            agent_order: order,
            latency_budget_ms: config.metrics.latency_budget_ms,
        })
    }

    pub fn record(&mut self, outcome: &SeatOutcome) -> Result<(), AnalyticsError> {
        let acc = self
            .agents
            .get_mut(&outcome.agent_name)
            .ok_or_else(|| AnalyticsError::UnknownAgent(outcome.agent_name.clone()))?;
        acc.record(outcome);
        Ok(())
    }

    pub fn finalize(mut self) -> Result<AnalyticsSummary, AnalyticsError> {
        let has_baseline = self
            .agents
            .get(&self.baseline)
            .is_some_and(|acc| acc.hands > 0);
        if !has_baseline {
            return Err(AnalyticsError::MissingBaseline(self.baseline));
        }

        let mut reports = Vec::new();
        for name in &self.agent_order {
            if let Some(acc) = self.agents.remove(name) {
                reports.push(acc.into_report(self.latency_budget_ms));
            }
        }

        Ok(AnalyticsSummary {
            baseline: self.baseline,
            agents: reports,
            latency_budget_ms: self.latency_budget_ms,
        }
        .enrich())
    }
}

struct AgentAccumulator {
    name: String,
    kind: AgentKind,
    hands: u32,
    specials: u32,
    fouls: u32,
    fallbacks: u32,
    scores: Vec<f64>,
    total_gap: f64,
    gap_samples: u32,
    total_latency_ms: f64,
}

impl AgentAccumulator {
    fn new(name: String, kind: AgentKind) -> Self {
        Self {
            name,
            kind,
            hands: 0,
            specials: 0,
            fouls: 0,
            fallbacks: 0,
            scores: Vec::new(),
            total_gap: 0.0,
            gap_samples: 0,
            total_latency_ms: 0.0,
        }
    }

    fn record(&mut self, outcome: &SeatOutcome) {
        self.hands += 1;
        self.total_latency_ms += outcome.elapsed_ms;
        if outcome.is_special() {
            self.specials += 1;
        }
        if outcome.foul {
            self.fouls += 1;
        }
        if outcome.fallback {
            self.fallbacks += 1;
        }
        if let Some(score) = outcome.score {
            self.scores.push(score);
        }
        if let Some(gap) = outcome.gap_to_best {
            self.total_gap += gap;
            self.gap_samples += 1;
        }
    }

    fn into_report(self, latency_budget_ms: u64) -> AgentReport {
        let avg_score = mean(&self.scores);
        let avg_latency = if self.hands == 0 {
            0.0
        } else {
            self.total_latency_ms / f64::from(self.hands)
        };

        AgentReport {
            name: self.name,
            kind: self.kind,
            hands: self.hands as usize,
            avg_score,
            ci95: confidence_interval(&self.scores),
            specials: self.specials as usize,
            fouls: self.fouls as usize,
            fallbacks: self.fallbacks as usize,
            avg_gap_to_best: (self.gap_samples > 0)
                .then(|| self.total_gap / f64::from(self.gap_samples)),
            average_ms_per_hand: avg_latency,
            delta_vs_baseline: 0.0, // filled by enrich once the baseline is known
            over_budget: avg_latency > latency_budget_ms as f64,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub baseline: String,
    pub agents: Vec<AgentReport>,
    pub latency_budget_ms: u64,
}

impl AnalyticsSummary {
    pub fn enrich(mut self) -> Self {
        let baseline_avg = self
            .agents
            .iter()
            .find(|agent| agent.name == self.baseline)
            .map(|agent| agent.avg_score)
            .unwrap_or(0.0);

        for agent in &mut self.agents {
            agent.delta_vs_baseline = agent.avg_score - baseline_avg;
        }

        self
    }

    pub fn agent(&self, name: &str) -> Option<&AgentReport> {
        self.agents.iter().find(|agent| agent.name == name)
    }

    pub fn to_markdown(&self) -> String {
        let mut rows = String::new();
        rows.push_str("# Arrangement Summary\n\n");
        rows.push_str(&format!(
            "Baseline: `{}`. Latency budget: {} ms average per hand\n\n",
            self.baseline, self.latency_budget_ms
        ));
        rows.push_str("| Agent | Kind | Hands | Avg score | Δ vs baseline | 95% CI | Gap to best | Special % | Foul % | Fallbacks | Avg ms/hand | Over Budget |\n");
        rows.push_str("|-------|------|-------|-----------|----------------|--------|-------------|-----------|--------|-----------|-------------|-------------|\n");

        for agent in &self.agents {
            let gap = agent
                .avg_gap_to_best
                .map(|gap| format!("{gap:.3}"))
                .unwrap_or_else(|| "n/a".to_string());
            rows.push_str(&format!(
                "| {name} | {kind:?} | {hands} | {avg:.3} | {delta:+.3} | [{ci_low:.3}, {ci_high:.3}] | {gap} | {special:.1}% | {foul:.1}% | {fallbacks} | {latency:.2} | {over_budget} |\n",
                name = agent.name,
                kind = agent.kind,
                hands = agent.hands,
                avg = agent.avg_score,
                delta = agent.delta_vs_baseline,
                ci_low = agent.ci95.0,
                ci_high = agent.ci95.1,
                special = rate(agent.specials, agent.hands) * 100.0,
                foul = rate(agent.fouls, agent.hands) * 100.0,
                fallbacks = agent.fallbacks,
                latency = agent.average_ms_per_hand,
                over_budget = if agent.over_budget { "Yes" } else { "No" },
            ));
        }
        rows
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub kind: AgentKind,
    pub hands: usize,
    pub avg_score: f64,
    pub ci95: (f64, f64),
    pub specials: usize,
    pub fouls: usize,
    pub fallbacks: usize,
    pub avg_gap_to_best: Option<f64>,
    pub average_ms_per_hand: f64,
    #[serde(skip)]
    pub delta_vs_baseline: f64,
    #[serde(skip)]
    pub over_budget: bool,
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = mean(points);
    if points.len() == 1 {
        return (mean, mean);
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let std_error = (variance / points.len() as f64).sqrt();
    let margin = CONFIDENCE_Z * std_error;
    (mean - margin, mean + margin)
}
