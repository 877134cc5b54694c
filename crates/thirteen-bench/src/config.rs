use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thirteen_core::model::seat::Seat;
use thiserror::Error;
use tracing::Level;

const DEFAULT_SUGGESTION_COUNT: usize = 5;
const MAX_SUGGESTION_COUNT: usize = 64;
const DEFAULT_LATENCY_BUDGET_MS: u64 = 500;

/// Root benchmark configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    pub run_id: String,
    pub deals: DealConfig,
    pub agents: Vec<AgentConfig>,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchmarkConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| ConfigError::Read {
            source,
            path: path.clone(),
        })?;
        let mut cfg: BenchmarkConfig = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse {
                source,
                path: path.clone(),
            })?;
        cfg.validate()
            .map_err(|source| ConfigError::Invalid { path, source })?;
        Ok(cfg)
    }

    /// Checks every block and puts the seat list in deal order. No I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if !is_identifier(&self.run_id) {
            return Err(invalid(
                "run_id",
                "run_id must be non-empty and use only alphanumerics, '.', '_' or '-'",
            ));
        }
        self.deals.validate()?;
        if self.suggestions.count > MAX_SUGGESTION_COUNT {
            return Err(invalid(
                "suggestions.count",
                format!("at most {MAX_SUGGESTION_COUNT} suggestions may be requested"),
            ));
        }
        self.outputs.validate()?;
        self.validate_agents()?;
        self.metrics.validate(&self.agents)?;
        if self.logging.level().is_none() {
            return Err(invalid(
                "logging.tracing_level",
                format!("unknown level '{}'", self.logging.tracing_level),
            ));
        }
        Ok(())
    }

    fn validate_agents(&self) -> Result<(), ValidationError> {
        if self.agents.is_empty() {
            return Err(invalid("agents", "at least one agent must be specified"));
        }
        let mut seen = HashSet::new();
        for agent in &self.agents {
            if !is_identifier(&agent.name) {
                return Err(invalid(
                    format!("agents[{}].name", agent.name),
                    "agent name must be non-empty and use only alphanumerics, '.', '_' or '-'",
                ));
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(invalid(
                    "agents",
                    format!("agent name '{}' defined more than once", agent.name),
                ));
            }
        }
        Ok(())
    }

    /// Substitutes `{run_id}` into the output templates.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        let resolve = |template: &str| PathBuf::from(template.replace("{run_id}", &self.run_id));
        ResolvedOutputs {
            jsonl: resolve(&self.outputs.jsonl),
            summary_md: resolve(&self.outputs.summary_md),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealConfig {
    pub seed: Option<u64>,
    pub hands: usize,
    /// Seats arranged by every agent on each deal.
    #[serde(default = "default_seats")]
    pub seats: Vec<Seat>,
}

impl DealConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.hands == 0 {
            return Err(invalid("deals.hands", "number of hands must be greater than zero"));
        }
        if self.seats.is_empty() {
            return Err(invalid("deals.seats", "at least one seat must be listed"));
        }
        let mut seen = HashSet::new();
        if let Some(repeated) = self.seats.iter().find(|seat| !seen.insert(**seat)) {
            return Err(invalid(
                "deals.seats",
                format!("seat {repeated} listed more than once"),
            ));
        }
        self.seats.sort_by_key(|seat| seat.index());
        Ok(())
    }
}

fn default_seats() -> Vec<Seat> {
    Seat::LOOP.to_vec()
}

/// A benchmarked arrangement policy. `params` is interpreted per kind.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub kind: AgentKind,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Heuristic,
    Naive,
}

/// Length of the hint list generated per seat as the reference best.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SuggestionConfig {
    pub count: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SUGGESTION_COUNT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(field, "path must not be empty"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    pub baseline: Option<String>,
    pub latency_budget_ms: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            baseline: None,
            latency_budget_ms: DEFAULT_LATENCY_BUDGET_MS,
        }
    }
}

impl MetricsConfig {
    fn validate(&self, agents: &[AgentConfig]) -> Result<(), ValidationError> {
        match self.baseline.as_deref() {
            None => return Err(invalid("metrics.baseline", "baseline agent must be specified")),
            Some(baseline) if !agents.iter().any(|a| a.name == baseline) => {
                return Err(invalid(
                    "metrics.baseline",
                    format!("baseline agent '{baseline}' is not defined in agents list"),
                ));
            }
            Some(_) => {}
        }
        if self.latency_budget_ms == 0 {
            return Err(invalid(
                "metrics.latency_budget_ms",
                "latency budget must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Structured logs are off unless `enable_structured` is set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable_structured: bool,
    pub tracing_level: String,
    /// Adds card lists to hint events.
    pub decision_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: "info".to_string(),
            decision_details: false,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        Level::from_str(self.tracing_level.trim()).ok()
    }
}

fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.into(),
        message: message.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
