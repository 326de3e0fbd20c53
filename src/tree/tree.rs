use super::build::{TraceFn, TreeBuilder};
use crate::config::DecisionTreeConfig;
use crate::data::{CategoricalData, Dataset};
use crate::errors::DecisionTreeError;
use crate::node::Node;
use crate::utils::fmt_vec_output;
use hashbrown::HashMap;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::fs;

/// A categorical decision tree classifier.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(bound(
    serialize = "V: Serialize, L: Serialize",
    deserialize = "V: Deserialize<'de> + Ord, L: Deserialize<'de>"
))]
pub struct DecisionTree<V, L> {
    pub cfg: DecisionTreeConfig,
    /// Features the tree was trained on, in scan order.
    pub features: Vec<String>,
    pub depth: usize,
    pub n_leaves: usize,
    root: Option<Node<V, L>>,
}

impl<V, L> Default for DecisionTree<V, L> {
    fn default() -> Self {
        DecisionTree {
            cfg: DecisionTreeConfig::default(),
            features: Vec::new(),
            depth: 0,
            n_leaves: 0,
            root: None,
        }
    }
}

impl<V, L> DecisionTree<V, L>
where
    V: CategoricalData,
    L: CategoricalData,
{
    pub fn new(cfg: DecisionTreeConfig) -> Result<Self, DecisionTreeError> {
        cfg.validate()?;
        Ok(DecisionTree {
            cfg,
            ..Default::default()
        })
    }

    /// Fit the tree, replacing any previously fit tree.
    /// On error, the previous tree is left untouched.
    /// * `data` - Training rows, labels and candidate features.
    pub fn fit(&mut self, data: &Dataset<V, L>) -> Result<(), DecisionTreeError> {
        self.fit_traced(data, None)
    }

    /// Fit the tree, reporting every split decision to `trace`.
    pub fn fit_with_trace(&mut self, data: &Dataset<V, L>, trace: &TraceFn<'_>) -> Result<(), DecisionTreeError> {
        self.fit_traced(data, Some(trace))
    }

    fn fit_traced(&mut self, data: &Dataset<V, L>, trace: Option<&TraceFn<'_>>) -> Result<(), DecisionTreeError> {
        self.cfg.validate()?;
        let mut builder = TreeBuilder::new()
            .set_parallel(self.cfg.parallel)
            .set_split_last_feature(self.cfg.split_last_feature);
        if let Some(t) = trace {
            builder = builder.set_trace(t);
        }

        let root = match self.cfg.num_threads {
            Some(n) if self.cfg.parallel => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build().map_err(|e| {
                    DecisionTreeError::InvalidParameter(
                        "num_threads".to_string(),
                        "a number of threads the pool can be built with".to_string(),
                        e.to_string(),
                    )
                })?;
                pool.install(|| builder.build(data))?
            }
            _ => builder.build(data)?,
        };

        self.depth = root.depth();
        self.n_leaves = root.n_leaves();
        self.features = data.features().to_vec();
        info!(
            "Fit decision tree on {} samples with features [{}], depth {}, {} leaves, {} indeterminate.",
            data.len(),
            fmt_vec_output(&self.features),
            self.depth,
            self.n_leaves,
            root.n_indeterminate()
        );
        self.root = Some(root);
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Root of the fit tree.
    pub fn root(&self) -> Result<&Node<V, L>, DecisionTreeError> {
        self.root.as_ref().ok_or(DecisionTreeError::NotFitted)
    }

    pub fn n_nodes(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.n_nodes())
    }

    /// Depth-indented text dump of the tree.
    pub fn render(&self) -> Result<String, DecisionTreeError> {
        Ok(super::render::render(self.root()?))
    }

    /// Total information gain contributed by each feature, weighted by the
    /// share of training samples reaching the split, and normalised to sum to 1.
    pub fn feature_importance(&self) -> Result<HashMap<String, f64>, DecisionTreeError> {
        let root = self.root()?;
        let mut importance: HashMap<String, f64> = HashMap::new();
        let total = match root {
            Node::Internal { samples, .. } => *samples as f64,
            _ => return Ok(importance),
        };
        root.for_each_split(&mut |feature: &str, gain: f64, samples: usize| {
            *importance.entry(feature.to_string()).or_insert(0.0) += gain * samples as f64 / total;
        });
        let sum: f64 = importance.values().sum();
        if sum > 0.0 {
            importance.values_mut().for_each(|v| *v /= sum);
        }
        Ok(importance)
    }

    // Set methods for parameters

    /// Set whether subtrees and batch predictions run in parallel.
    /// * `parallel` - Use the rayon thread pool.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }

    /// Set the number of threads.
    /// * `num_threads` - Threads of the dedicated pool used when building in parallel.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.cfg.num_threads = num_threads;
        self
    }

    /// Set whether the last remaining feature is split on.
    /// * `split_last_feature` - If false, mixed nodes with one feature left become indeterminate.
    pub fn set_split_last_feature(mut self, split_last_feature: bool) -> Self {
        self.cfg.split_last_feature = split_last_feature;
        self
    }
}

impl<V, L> DecisionTree<V, L>
where
    V: CategoricalData + Serialize + DeserializeOwned,
    L: CategoricalData + Serialize + DeserializeOwned,
{
    /// Save a tree as a json object to a file.
    ///
    /// * `path` - Path to save tree.
    pub fn save_tree(&self, path: &str) -> Result<(), DecisionTreeError> {
        let model = self.json_dump()?;
        fs::write(path, model).map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
    }

    /// Dump a tree as a json object.
    ///
    /// Branch values become json object keys, so they must serialize as strings or numbers.
    pub fn json_dump(&self) -> Result<String, DecisionTreeError> {
        serde_json::to_string(self).map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
    }

    /// Load a tree from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    pub fn from_json(json_str: &str) -> Result<Self, DecisionTreeError> {
        serde_json::from_str::<DecisionTree<V, L>>(json_str).map_err(|e| DecisionTreeError::UnableToRead(e.to_string()))
    }

    /// Load a tree from a path to a json tree object.
    ///
    /// * `path` - Path to load tree from.
    pub fn load_tree(path: &str) -> Result<Self, DecisionTreeError> {
        let json_str = fs::read_to_string(path).map_err(|e| DecisionTreeError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl<V, L> Display for DecisionTree<V, L>
where
    V: CategoricalData,
    L: CategoricalData,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{}", root),
            None => write!(f, "DecisionTree (not fitted)"),
        }
    }
}
