use serde::{Deserialize, Serialize};

use crate::{DEFAULT_LEVEL_TRANSITION_PENALTY, Error, model::Metric};

/// Where the level transition penalty is charged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyMode {
    /// Only the search heuristic adds the penalty, path costs are pure distance
    #[default]
    HeuristicOnly,
    /// The penalty is also added to the cost of every level-crossing step
    HeuristicAndEdges,
}

/// Configuration of a [`Pathfinder`](crate::Pathfinder)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfinderConfig {
    /// Metric for edge weights, snapping and the heuristic
    pub metric: Metric,
    /// Extra cost of moving between two levels, may be negative
    pub level_transition_penalty: f64,
    pub penalty_mode: PenaltyMode,
    /// Abort searches after this many node expansions
    pub max_iterations: Option<usize>,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            level_transition_penalty: DEFAULT_LEVEL_TRANSITION_PENALTY,
            penalty_mode: PenaltyMode::default(),
            max_iterations: None,
        }
    }
}

impl PathfinderConfig {
    /// Checks values a search cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a non-finite penalty or a zero
    /// iteration cap.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.level_transition_penalty.is_finite() {
            return Err(Error::InvalidData(format!(
                "Level transition penalty must be finite, got {}",
                self.level_transition_penalty
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(Error::InvalidData(
                "max_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = PathfinderConfig::default();
        assert_eq!(config.metric, Metric::Euclidean);
        assert_eq!(config.level_transition_penalty, 10.0);
        assert_eq!(config.penalty_mode, PenaltyMode::HeuristicOnly);
        assert_eq!(config.max_iterations, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: PathfinderConfig = serde_json::from_value(json!({
            "metric": "haversine",
            "penalty_mode": "heuristic_and_edges",
            "max_iterations": 500
        }))
        .unwrap();

        assert_eq!(config.metric, Metric::Haversine);
        assert_eq!(config.penalty_mode, PenaltyMode::HeuristicAndEdges);
        assert_eq!(config.max_iterations, Some(500));
        assert_eq!(config.level_transition_penalty, 10.0);
    }

    #[test]
    fn validation() {
        let negative = PathfinderConfig {
            level_transition_penalty: -4.0,
            ..Default::default()
        };
        assert!(negative.validate().is_ok());

        let infinite = PathfinderConfig {
            level_transition_penalty: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(infinite.validate(), Err(Error::InvalidData(_))));

        let zero_cap = PathfinderConfig {
            max_iterations: Some(0),
            ..Default::default()
        };
        assert!(matches!(zero_cap.validate(), Err(Error::InvalidData(_))));
    }
}
