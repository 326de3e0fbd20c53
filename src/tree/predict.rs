//! Tree Prediction Methods
//!
//! Traversal of a built tree to classify examples.
use super::tree::DecisionTree;
use crate::data::{CategoricalData, Dataset, Row};
use crate::errors::DecisionTreeError;
use crate::node::Node;
use rayon::prelude::*;

/// Classify one example by walking from `node` down to a terminal node.
///
/// Branch values must match exactly, an unseen value is a `KeyMissing` error.
pub fn predict<V, L>(node: &Node<V, L>, example: &Row<V>) -> Result<L, DecisionTreeError>
where
    V: CategoricalData,
    L: CategoricalData,
{
    let mut node = node;
    loop {
        match node {
            Node::Leaf { label } | Node::Indeterminate { label, .. } => return Ok(label.clone()),
            Node::Internal { feature, children, .. } => {
                let value = example
                    .get(feature.as_str())
                    .ok_or_else(|| DecisionTreeError::MissingExampleFeature(feature.clone()))?;
                node = children
                    .get(value)
                    .ok_or_else(|| DecisionTreeError::KeyMissing(feature.clone(), value.to_string()))?;
            }
        }
    }
}

impl<V, L> DecisionTree<V, L>
where
    V: CategoricalData,
    L: CategoricalData,
{
    /// Predict the label of a single example.
    pub fn predict(&self, example: &Row<V>) -> Result<L, DecisionTreeError> {
        predict(self.root()?, example)
    }

    /// Predict every row, each row succeeds or fails on its own.
    pub fn predict_rows(&self, rows: &[Row<V>]) -> Vec<Result<L, DecisionTreeError>> {
        let root = match self.root() {
            Ok(r) => r,
            Err(e) => return rows.iter().map(|_| Err(e.clone())).collect(),
        };
        if self.cfg.parallel {
            rows.par_iter().map(|r| predict(root, r)).collect()
        } else {
            rows.iter().map(|r| predict(root, r)).collect()
        }
    }

    /// Predict every row of a dataset, failing on the first row that can't be classified.
    pub fn predict_dataset(&self, data: &Dataset<V, L>) -> Result<Vec<L>, DecisionTreeError> {
        self.root()?;
        self.predict_rows(data.rows()).into_iter().collect()
    }
}
