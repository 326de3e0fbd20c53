use crate::errors::DecisionTreeError;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Data trait used throughout the package
/// for categorical feature values and class labels.
///
/// Values are only ever compared by equality, the ordering
/// is used to keep branches and tie breaks deterministic.
pub trait CategoricalData:
    Clone + Eq + Hash + Ord + Debug + Display + std::marker::Send + std::marker::Sync
{
}

impl<T> CategoricalData for T where
    T: Clone + Eq + Hash + Ord + Debug + Display + std::marker::Send + std::marker::Sync
{
}

/// A single example, mapping feature name to its categorical value.
pub type Row<V> = HashMap<String, V>;

/// Tabular categorical data, with one label per row.
///
/// Rows and labels are co-indexed, and every row holds a value
/// for every candidate feature. Both are checked on construction,
/// including when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetParts<V, L>")]
pub struct Dataset<V, L> {
    features: Vec<String>,
    rows: Vec<Row<V>>,
    labels: Vec<L>,
}

/// Unchecked fields of a serialized dataset.
#[derive(Deserialize)]
struct DatasetParts<V, L> {
    features: Vec<String>,
    rows: Vec<Row<V>>,
    labels: Vec<L>,
}

impl<V, L> TryFrom<DatasetParts<V, L>> for Dataset<V, L> {
    type Error = DecisionTreeError;

    fn try_from(parts: DatasetParts<V, L>) -> Result<Self, Self::Error> {
        validate(&parts.features, &parts.rows, &parts.labels)?;
        Ok(Dataset {
            features: parts.features,
            rows: parts.rows,
            labels: parts.labels,
        })
    }
}

impl<V, L> Dataset<V, L>
where
    V: CategoricalData,
    L: CategoricalData,
{
    /// Create a new dataset.
    /// * `features` - Candidate features, in the order they will be scanned.
    /// * `rows` - One map of feature name to value per example.
    /// * `labels` - Target label for each row.
    pub fn new(features: Vec<String>, rows: Vec<Row<V>>, labels: Vec<L>) -> Result<Self, DecisionTreeError> {
        validate(&features, &rows, &labels)?;
        Ok(Dataset { features, rows, labels })
    }

    /// Create a dataset from named columns.
    /// * `columns` - Feature name and the column of values, all the same length.
    /// * `labels` - Target label for each row.
    pub fn from_columns(columns: Vec<(String, Vec<V>)>, labels: Vec<L>) -> Result<Self, DecisionTreeError> {
        let n_rows = labels.len();
        let mut features = Vec::with_capacity(columns.len());
        let mut rows: Vec<Row<V>> = (0..n_rows).map(|_| HashMap::with_capacity(columns.len())).collect();
        for (name, values) in columns {
            if values.len() != n_rows {
                return Err(DecisionTreeError::ShapeMismatch(values.len(), n_rows));
            }
            for (row, v) in rows.iter_mut().zip(values) {
                row.insert(name.clone(), v);
            }
            features.push(name);
        }
        Self::new(features, rows, labels)
    }

    /// Candidate features, in scan order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Examples, co-indexed with `labels`.
    pub fn rows(&self) -> &[Row<V>] {
        &self.rows
    }

    /// Target label of each row.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Values of a candidate feature, in row order.
    pub fn column(&self, feature: &str) -> Option<Vec<&V>> {
        if !self.features.iter().any(|f| f == feature) {
            return None;
        }
        Some(self.rows.iter().map(|r| &r[feature]).collect())
    }

    /// Iterate over (value, label) pairs for one candidate feature.
    pub(crate) fn pairs<'a>(&'a self, feature: &'a str) -> impl Iterator<Item = (&'a V, &'a L)> + 'a {
        self.rows.iter().map(move |r| &r[feature]).zip(self.labels.iter())
    }

    /// Split the data on each distinct value of `feature`.
    ///
    /// The feature is dropped from both the candidate list and the rows
    /// of every subset. Subsets are keyed, and so ordered, by value.
    pub fn partition(&self, feature: &str) -> BTreeMap<V, Dataset<V, L>> {
        let features: Vec<String> = self.features.iter().filter(|f| *f != feature).cloned().collect();
        let mut subsets: BTreeMap<V, Dataset<V, L>> = BTreeMap::new();
        for (row, label) in self.rows.iter().zip(self.labels.iter()) {
            let subset = subsets.entry(row[feature].clone()).or_insert_with(|| Dataset {
                features: features.clone(),
                rows: Vec::new(),
                labels: Vec::new(),
            });
            let mut row = row.clone();
            row.remove(feature);
            subset.rows.push(row);
            subset.labels.push(label.clone());
        }
        subsets
    }
}

fn validate<V, L>(features: &[String], rows: &[Row<V>], labels: &[L]) -> Result<(), DecisionTreeError> {
    if rows.len() != labels.len() {
        return Err(DecisionTreeError::ShapeMismatch(rows.len(), labels.len()));
    }
    let mut seen = HashSet::with_capacity(features.len());
    for f in features {
        if !seen.insert(f.as_str()) {
            return Err(DecisionTreeError::DuplicateFeature(f.clone()));
        }
    }
    for (i, row) in rows.iter().enumerate() {
        if let Some(f) = features.iter().find(|f| !row.contains_key(f.as_str())) {
            return Err(DecisionTreeError::MissingFeature(f.clone(), i));
        }
    }
    Ok(())
}
