use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Row normalization applied to a TF-IDF vector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Sparse document vector with a fixed dimension.
///
/// Entries are kept sorted by column and never contain duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Builds a vector from `(column, value)` pairs. Duplicate columns are
    /// summed; explicit zeros are dropped.
    pub fn new(dim: usize, entries: Vec<(usize, f64)>) -> Result<Self, ModelError> {
        let mut entries = entries;
        if let Some(&(col, _)) = entries.iter().find(|(col, _)| *col >= dim) {
            return Err(ModelError::DimensionMismatch {
                what: "feature column",
                expected: dim,
                actual: col,
            });
        }

        entries.sort_unstable_by_key(|(col, _)| *col);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (col, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == col => *acc += value,
                _ => merged.push((col, value)),
            }
        }
        merged.retain(|(_, value)| *value != 0.0);

        Ok(Self {
            dim,
            entries: merged,
        })
    }

    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |(c, _)| *c)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for &(col, value) in &self.entries {
            dense[col] = value;
        }
        dense
    }

    /// Scales the vector to unit length under `norm`. Zero vectors stay zero.
    pub fn normalize(&mut self, norm: Norm) {
        let length = match norm {
            Norm::L1 => self.entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::L2 => self
                .entries
                .iter()
                .map(|(_, v)| v * v)
                .sum::<f64>()
                .sqrt(),
        };
        if length > 0.0 {
            let inv = length.recip();
            for (_, value) in self.entries.iter_mut() {
                *value *= inv;
            }
        }
    }
}

/// Maps a normalized document to a fixed-length feature vector.
pub trait FeatureExtractor: Send + Sync {
    /// Length of every vector produced by [`transform`](Self::transform).
    fn dim(&self) -> usize;

    fn transform(&self, document: &str) -> Result<FeatureVector, ModelError>;
}

/// One-vs-rest multi-label model over feature vectors.
pub trait MultiLabelModel: Send + Sync {
    fn n_features(&self) -> usize;

    fn n_labels(&self) -> usize;

    /// Raw per-label decision scores, in label order.
    fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError>;

    /// The model's own binary decision per label: positive score means the
    /// label applies.
    fn predict(&self, features: &FeatureVector) -> Result<Vec<bool>, ModelError> {
        Ok(self
            .decision_function(features)?
            .into_iter()
            .map(|score| score > 0.0)
            .collect())
    }
}
