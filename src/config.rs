//! Decision Tree Configuration
//!
//! Training and prediction settings of a decision tree, loadable from JSON.
use crate::errors::DecisionTreeError;
use serde::{Deserialize, Serialize};

fn default_parallel() -> bool {
    false
}
fn default_num_threads() -> Option<usize> {
    None
}
fn default_split_last_feature() -> bool {
    true
}

/// Decision tree settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DecisionTreeConfig {
    /// Build sibling subtrees, and predict batches, on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Number of threads of a dedicated pool, the global pool is used if `None`.
    #[serde(default = "default_num_threads")]
    pub num_threads: Option<usize>,
    /// Split on the last remaining feature when labels are still mixed.
    /// If false, such a node becomes indeterminate without children.
    #[serde(default = "default_split_last_feature")]
    pub split_last_feature: bool,
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        DecisionTreeConfig {
            parallel: default_parallel(),
            num_threads: default_num_threads(),
            split_last_feature: default_split_last_feature(),
        }
    }
}

impl DecisionTreeConfig {
    /// Check that the settings can be used.
    pub fn validate(&self) -> Result<(), DecisionTreeError> {
        if let Some(0) = self.num_threads {
            return Err(DecisionTreeError::InvalidParameter(
                "num_threads".to_string(),
                "a positive number of threads".to_string(),
                "0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON string, missing keys take their default value.
    pub fn from_json(json_str: &str) -> Result<Self, DecisionTreeError> {
        let cfg = serde_json::from_str::<DecisionTreeConfig>(json_str)
            .map_err(|e| DecisionTreeError::UnableToRead(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
