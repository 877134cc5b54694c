use thirteen_bot::policy::{HeuristicPolicy, NaivePolicy, Policy};
use thirteen_core::arrange::ScoreWeights;
use thiserror::Error;

use crate::config::{AgentConfig, AgentKind};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid heuristic parameter for agent '{name}': {message}")]
    InvalidHeuristicParam { name: String, message: String },
    #[error("agent '{name}' of kind {kind:?} takes no parameters")]
    UnexpectedParams { name: String, kind: AgentKind },
}

pub(super) struct AgentBlueprint {
    pub(super) name: String,
    pub(super) kind: AgentKind,
    implementation: AgentImplementation,
}

enum AgentImplementation {
    Heuristic(ScoreWeights),
    Naive,
}

impl AgentBlueprint {
    pub(super) fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, AgentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let implementation = match config.kind {
            AgentKind::Heuristic => {
                AgentImplementation::Heuristic(weights_from_params(&config.name, &config.params)?)
            }
            AgentKind::Naive => {
                let empty = config.params.is_null()
                    || config.params.as_mapping().is_some_and(|m| m.is_empty());
                if !empty {
                    return Err(AgentError::UnexpectedParams {
                        name: config.name.clone(),
                        kind: config.kind,
                    });
                }
                AgentImplementation::Naive
            }
        };

        Ok(Self {
            name: config.name.clone(),
            kind: config.kind,
            implementation,
        })
    }

    pub(super) fn spawn_policy(&self) -> Box<dyn Policy> {
        match &self.implementation {
            AgentImplementation::Heuristic(weights) => Box::new(HeuristicPolicy::new(*weights)),
            AgentImplementation::Naive => Box::new(NaivePolicy),
        }
    }
}

/// Reads optional `top`, `middle`, `bottom` and `rank_bonus` overrides.
fn weights_from_params(name: &str, params: &serde_yaml::Value) -> Result<ScoreWeights, AgentError> {
    let mut weights = ScoreWeights::default();
    if params.is_null() {
        return Ok(weights);
    }

    let mapping = params
        .as_mapping()
        .ok_or_else(|| AgentError::InvalidHeuristicParam {
            name: name.to_string(),
            message: "expected mapping for heuristic params".to_string(),
        })?;

    for (key, value) in mapping {
        let key = key.as_str().unwrap_or_default();
        let slot = match key {
            "top" => &mut weights.top,
            "middle" => &mut weights.middle,
            "bottom" => &mut weights.bottom,
            "rank_bonus" => &mut weights.rank_bonus,
            other => {
                return Err(AgentError::InvalidHeuristicParam {
                    name: name.to_string(),
                    message: format!("unknown parameter '{other}'"),
                });
            }
        };
        let number = value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .ok_or_else(|| AgentError::InvalidHeuristicParam {
                name: name.to_string(),
                message: format!("'{key}' must be a non-negative number"),
            })?;
        *slot = number;
    }

    weights
        .validate()
        .map_err(|err| AgentError::InvalidHeuristicParam {
            name: name.to_string(),
            message: err.to_string(),
        })?;
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(kind: AgentKind, params: &str) -> AgentConfig {
        AgentConfig {
            name: "candidate".to_string(),
            kind,
            params: serde_yaml::from_str(params).unwrap(),
        }
    }

    #[test]
    fn heuristic_weights_override_defaults() {
        let weights = weights_from_params("candidate", &serde_yaml::from_str("bottom: 4\nrank_bonus: 0.02").unwrap())
            .unwrap();
        assert_eq!(weights.bottom, 4.0);
        assert_eq!(weights.rank_bonus, 0.02);
        assert_eq!(weights.top, 1.0);
    }

    #[test]
    fn rejects_unknown_or_negative_weights() {
        assert!(AgentBlueprint::from_config(&agent(AgentKind::Heuristic, "depth: 3")).is_err());
        assert!(AgentBlueprint::from_config(&agent(AgentKind::Heuristic, "top: -1")).is_err());
        assert!(AgentBlueprint::from_config(&agent(AgentKind::Heuristic, "[1, 2]")).is_err());
    }

    #[test]
    fn rejects_weights_that_let_the_bonus_cross_categories() {
        for params in ["rank_bonus: 0.1", "top: 0", "bottom: 0.3"] {
            let err = AgentBlueprint::from_config(&agent(AgentKind::Heuristic, params)).err();
            assert!(
                matches!(&err, Some(AgentError::InvalidHeuristicParam { message, .. }) if message.contains("invalid score weights")),
                "{params} should be rejected"
            );
        }
    }

    #[test]
    fn naive_agents_take_no_params() {
        let ok = AgentBlueprint::from_config(&agent(AgentKind::Naive, "{}")).unwrap();
        assert_eq!(ok.spawn_policy().name(), "naive");
        let err = AgentBlueprint::from_config(&agent(AgentKind::Naive, "top: 2")).err();
        assert!(matches!(err, Some(AgentError::UnexpectedParams { .. })));
    }
}
