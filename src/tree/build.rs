//! Tree Induction
//!
//! Greedy, recursive construction of a decision tree by information gain.
use crate::data::{CategoricalData, Dataset};
use crate::entropy::ClassDistribution;
use crate::errors::DecisionTreeError;
use crate::gain::gain_from_pairs;
use crate::node::Node;
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// What was decided for a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SplitOutcome {
    /// The node was split into this many branches.
    Branch(usize),
    /// The node was left indeterminate, with this many distinct labels.
    Indeterminate(usize),
}

/// Report of a split decision, handed to the trace callback.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitEvent<'a> {
    pub depth: usize,
    /// Selected feature, `None` if there was no feature left to choose from.
    pub feature: Option<&'a str>,
    pub gain: f64,
    pub samples: usize,
    pub outcome: SplitOutcome,
}

/// Callback receiving every split decision made while building.
pub type TraceFn<'a> = dyn Fn(&SplitEvent) + Sync + 'a;

/// Builds a tree from a dataset.
pub struct TreeBuilder<'a> {
    parallel: bool,
    split_last_feature: bool,
    trace: Option<&'a TraceFn<'a>>,
}

impl Default for TreeBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TreeBuilder<'a> {
    pub fn new() -> Self {
        TreeBuilder {
            parallel: false,
            split_last_feature: true,
            trace: None,
        }
    }

    /// Build sibling subtrees in parallel.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Split on the last remaining feature, instead of stopping at an indeterminate node.
    pub fn set_split_last_feature(mut self, split_last_feature: bool) -> Self {
        self.split_last_feature = split_last_feature;
        self
    }

    /// Report each split decision to `trace`.
    pub fn set_trace(mut self, trace: &'a TraceFn<'a>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Build the tree, either the full tree or an error is returned.
    pub fn build<V, L>(&self, data: &Dataset<V, L>) -> Result<Node<V, L>, DecisionTreeError>
    where
        V: CategoricalData,
        L: CategoricalData,
    {
        if data.is_empty() {
            return Err(DecisionTreeError::EmptyInput);
        }
        self.grow(data, 0)
    }

    fn grow<V, L>(&self, data: &Dataset<V, L>, depth: usize) -> Result<Node<V, L>, DecisionTreeError>
    where
        V: CategoricalData,
        L: CategoricalData,
    {
        let classes = ClassDistribution::from_items(data.labels());
        let majority = classes.majority().ok_or(DecisionTreeError::EmptyInput)?.clone();

        if classes.is_pure() {
            return Ok(Node::Leaf { label: majority });
        }

        let (feature, gain) = match select_feature(data) {
            Some((f, g)) => (f.to_string(), g),
            None => {
                warn!(
                    "No features left to separate {} samples at depth {}, falling back to majority label {}.",
                    data.len(),
                    depth,
                    majority
                );
                self.report(depth, None, 0.0, data.len(), SplitOutcome::Indeterminate(classes.n_classes()));
                return Ok(Node::Indeterminate {
                    feature: None,
                    label: majority,
                    class_counts: classes.to_counts(),
                });
            }
        };

        if data.features().len() == 1 && !self.split_last_feature {
            warn!(
                "Only feature {} is left at depth {} and {} labels are mixed, falling back to majority label {}.",
                feature,
                depth,
                classes.n_classes(),
                majority
            );
            self.report(
                depth,
                Some(feature.as_str()),
                gain,
                data.len(),
                SplitOutcome::Indeterminate(classes.n_classes()),
            );
            return Ok(Node::Indeterminate {
                feature: Some(feature),
                label: majority,
                class_counts: classes.to_counts(),
            });
        }

        let subsets = data.partition(&feature);
        debug!(
            "Splitting {} samples on {} at depth {}, gain {:.6}, {} branches.",
            data.len(),
            feature,
            depth,
            gain,
            subsets.len()
        );
        self.report(depth, Some(feature.as_str()), gain, data.len(), SplitOutcome::Branch(subsets.len()));

        let children: BTreeMap<V, Node<V, L>> = if self.parallel {
            subsets
                .into_par_iter()
                .map(|(v, subset)| self.grow(&subset, depth + 1).map(|n| (v, n)))
                .collect::<Result<_, _>>()?
        } else {
            subsets
                .into_iter()
                .map(|(v, subset)| self.grow(&subset, depth + 1).map(|n| (v, n)))
                .collect::<Result<_, _>>()?
        };

        Ok(Node::Internal {
            feature,
            gain,
            samples: data.len(),
            children,
        })
    }

    fn report(&self, depth: usize, feature: Option<&str>, gain: f64, samples: usize, outcome: SplitOutcome) {
        if let Some(trace) = self.trace {
            trace(&SplitEvent {
                depth,
                feature,
                gain,
                samples,
                outcome,
            });
        }
    }
}

/// Feature with the greatest information gain.
///
/// Features are scanned in order, a later feature only
/// replaces the incumbent if its gain is strictly greater.
pub fn select_feature<V, L>(data: &Dataset<V, L>) -> Option<(&str, f64)>
where
    V: CategoricalData,
    L: CategoricalData,
{
    let mut best: Option<(&str, f64)> = None;
    for feature in data.features() {
        let gain = gain_from_pairs(data.pairs(feature));
        match best {
            Some((_, b)) if gain <= b => {}
            _ => best = Some((feature.as_str(), gain)),
        }
    }
    best
}

/// Build a decision tree with the default settings.
pub fn build<V, L>(data: &Dataset<V, L>) -> Result<Node<V, L>, DecisionTreeError>
where
    V: CategoricalData,
    L: CategoricalData,
{
    TreeBuilder::new().build(data)
}
