//! Entropy
//!
//! Shannon entropy (base 10) of class distributions.
use crate::data::CategoricalData;
use hashbrown::HashMap;

/// Entropy of a probability distribution, `-Σ p·log10(p)`.
///
/// Zero probabilities contribute nothing. A pure distribution,
/// `[1.0]`, has an entropy of exactly `0.0`.
pub fn entropy(probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .filter(|p| **p > 0.0)
        .fold(0.0, |acc, p| acc - p * p.log10())
}

/// Entropy of the class distribution of a label sequence.
///
/// An empty sequence has no impurity, and an entropy of `0.0`.
pub fn class_entropy<L: CategoricalData>(labels: &[L]) -> f64 {
    ClassDistribution::from_items(labels).entropy()
}

/// Occurrence counts of each distinct value in a sequence.
///
/// Classes are kept in the order they were first seen,
/// so the majority class is stable for a given row order.
#[derive(Debug, Clone)]
pub struct ClassDistribution<T> {
    classes: Vec<T>,
    counts: Vec<usize>,
    index: HashMap<T, usize>,
    total: usize,
}

impl<T> Default for ClassDistribution<T> {
    fn default() -> Self {
        ClassDistribution {
            classes: Vec::new(),
            counts: Vec::new(),
            index: HashMap::new(),
            total: 0,
        }
    }
}

impl<T: CategoricalData> ClassDistribution<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: &[T]) -> Self {
        let mut dist = Self::new();
        items.iter().for_each(|i| dist.add(i));
        dist
    }

    /// Record one more occurrence of `item`.
    pub fn add(&mut self, item: &T) {
        self.total += 1;
        match self.index.get(item) {
            Some(i) => self.counts[*i] += 1,
            None => {
                self.index.insert(item.clone(), self.classes.len());
                self.classes.push(item.clone());
                self.counts.push(1);
            }
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn is_pure(&self) -> bool {
        self.classes.len() == 1
    }

    pub fn count(&self, item: &T) -> usize {
        self.index.get(item).map_or(0, |i| self.counts[*i])
    }

    /// Iterate over (class, count) in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.classes.iter().zip(self.counts.iter().copied())
    }

    /// Relative frequency of each class, in first-seen order.
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total as f64;
        self.counts.iter().map(|c| *c as f64 / total).collect()
    }

    pub fn entropy(&self) -> f64 {
        entropy(&self.probabilities())
    }

    /// Most frequent class, the first seen wins ties.
    pub fn majority(&self) -> Option<&T> {
        let mut best: Option<(usize, usize)> = None;
        for (i, c) in self.counts.iter().enumerate() {
            match best {
                Some((_, b)) if *c <= b => {}
                _ => best = Some((i, *c)),
            }
        }
        best.map(|(i, _)| &self.classes[i])
    }

    /// Owned (class, count) pairs, in first-seen order.
    pub fn to_counts(&self) -> Vec<(T, usize)> {
        self.iter().map(|(c, n)| (c.clone(), n)).collect()
    }
}
