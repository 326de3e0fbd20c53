//! Information Gain
//!
//! Entropy reduction achieved by partitioning labels on a categorical feature.
use crate::data::CategoricalData;
use crate::entropy::ClassDistribution;
use crate::errors::DecisionTreeError;
use hashbrown::HashMap;

/// Information gain of splitting `labels` on `feature_column`.
///
/// * `feature_column` - Value of the feature for each row.
/// * `labels` - Label for each row, co-indexed with `feature_column`.
pub fn information_gain<V, L>(feature_column: &[V], labels: &[L]) -> Result<f64, DecisionTreeError>
where
    V: CategoricalData,
    L: CategoricalData,
{
    if feature_column.len() != labels.len() {
        return Err(DecisionTreeError::ShapeMismatch(feature_column.len(), labels.len()));
    }
    Ok(gain_from_pairs(feature_column.iter().zip(labels.iter())))
}

/// Information gain over (value, label) pairs.
///
/// Builds the overall class distribution and one distribution
/// per feature value in a single pass. Value distributions are summed
/// in the order values are first seen, so two features partitioning
/// the rows identically give bit-identical gains, whatever their values are named.
pub(crate) fn gain_from_pairs<'a, V, L>(pairs: impl Iterator<Item = (&'a V, &'a L)>) -> f64
where
    V: CategoricalData + 'a,
    L: CategoricalData + 'a,
{
    let mut overall = ClassDistribution::new();
    let mut index: HashMap<&V, usize> = HashMap::new();
    let mut by_value: Vec<ClassDistribution<L>> = Vec::new();
    for (v, l) in pairs {
        overall.add(l);
        let i = *index.entry(v).or_insert_with(|| {
            by_value.push(ClassDistribution::new());
            by_value.len() - 1
        });
        by_value[i].add(l);
    }
    if overall.total() == 0 {
        return 0.0;
    }
    let total = overall.total() as f64;
    let split_entropy: f64 = by_value
        .iter()
        .map(|d| (d.total() as f64 / total) * d.entropy())
        .sum();
    overall.entropy() - split_entropy
}
