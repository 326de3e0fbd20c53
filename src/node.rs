use crate::data::CategoricalData;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A node of a categorical decision tree.
///
/// Children are owned by their parent, so a tree is
/// always acyclic and owned by its root.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(bound(
    serialize = "V: Serialize, L: Serialize",
    deserialize = "V: Deserialize<'de> + Ord, L: Deserialize<'de>"
))]
pub enum Node<V, L> {
    /// Every training row that reached this node had this label.
    Leaf { label: L },
    /// Split on `feature`, with one child per value observed at this node.
    Internal {
        feature: String,
        gain: f64,
        samples: usize,
        children: BTreeMap<V, Node<V, L>>,
    },
    /// Rows reaching this node could not be separated any further.
    /// `label` is the majority class, `feature` is set when the node
    /// stopped short of splitting on the last remaining feature.
    Indeterminate {
        feature: Option<String>,
        label: L,
        class_counts: Vec<(L, usize)>,
    },
}

impl<V, L> Node<V, L>
where
    V: CategoricalData,
    L: CategoricalData,
{
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::Internal { .. })
    }

    /// The split feature of this node, if it has one.
    pub fn feature(&self) -> Option<&str> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { feature, .. } => Some(feature.as_str()),
            Node::Indeterminate { feature, .. } => feature.as_deref(),
        }
    }

    /// The class this node decides on, if it is terminal.
    pub fn label(&self) -> Option<&L> {
        match self {
            Node::Leaf { label } | Node::Indeterminate { label, .. } => Some(label),
            Node::Internal { .. } => None,
        }
    }

    /// Get the child to travel down for a value of the split feature.
    pub fn get_child(&self, value: &V) -> Option<&Node<V, L>> {
        match self {
            Node::Internal { children, .. } => children.get(value),
            _ => None,
        }
    }

    /// Length of the longest path from this node down to a terminal node.
    pub fn depth(&self) -> usize {
        match self {
            Node::Internal { children, .. } => 1 + children.values().map(|c| c.depth()).max().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Internal { children, .. } => children.values().map(|c| c.n_leaves()).sum(),
            _ => 1,
        }
    }

    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Internal { children, .. } => 1 + children.values().map(|c| c.n_nodes()).sum::<usize>(),
            _ => 1,
        }
    }

    /// Number of indeterminate nodes in this subtree.
    pub fn n_indeterminate(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { children, .. } => children.values().map(|c| c.n_indeterminate()).sum(),
            Node::Indeterminate { .. } => 1,
        }
    }

    /// Every feature split on in this subtree.
    pub fn features_used(&self) -> BTreeSet<&str> {
        let mut used = BTreeSet::new();
        self.collect_features(&mut used);
        used
    }

    fn collect_features<'a>(&'a self, used: &mut BTreeSet<&'a str>) {
        if let Node::Internal { feature, children, .. } = self {
            used.insert(feature.as_str());
            children.values().for_each(|c| c.collect_features(used));
        }
    }

    /// Visit every internal node, depth first.
    pub(crate) fn for_each_split<F>(&self, f: &mut F)
    where
        F: FnMut(&str, f64, usize),
    {
        if let Node::Internal {
            feature,
            gain,
            samples,
            children,
        } = self
        {
            f(feature.as_str(), *gain, *samples);
            children.values().for_each(|c| c.for_each_split(f));
        }
    }
}
