//! Extremely randomized trees regressor used as the optimizer's surrogate
//!
//! Each tree is grown on the full set of observations with a random feature
//! and a random threshold per candidate split. Leaves keep the mean and the
//! variance of their targets so the forest can report an uncertainty next to
//! its prediction.

use super::OptimizerError;
use ndarray::{Array1, Array2, ArrayView1};
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

const MIN_STD: f64 = 1e-9;

#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        mean: f64,
        variance: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn leaf(&self, sample: ArrayView1<f64>) -> (f64, f64) {
        match self {
            TreeNode::Leaf { mean, variance } => (*mean, *variance),
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if sample[*feature] <= *threshold {
                    left.leaf(sample)
                } else {
                    right.leaf(sample)
                }
            }
        }
    }
}

/// Forest of extremely randomized regression trees
#[derive(Debug, Clone)]
pub struct ExtraTreesSurrogate {
    trees: Vec<TreeNode>,
    pub n_estimators: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub random_state: u64,
    n_features: usize,
}

impl ExtraTreesSurrogate {
    pub fn new(n_estimators: usize, min_samples_leaf: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators: n_estimators.max(1),
            min_samples_split: 2,
            min_samples_leaf: min_samples_leaf.max(1),
            random_state: 0,
            n_features: 0,
        }
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    fn build_tree(
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        min_samples_split: usize,
        min_samples_leaf: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n = indices.len();
        if n < min_samples_split.max(2 * min_samples_leaf) {
            return Self::leaf(y, indices);
        }

        let first = y[indices[0]];
        if indices.iter().all(|&i| (y[i] - first).abs() < 1e-15) {
            return TreeNode::Leaf {
                mean: first,
                variance: 0.0,
            };
        }

        let mut best: Option<(usize, f64, f64)> = None;
        for f in 0..x.ncols() {
            let mut fmin = f64::MAX;
            let mut fmax = f64::MIN;
            for &i in indices {
                let v = x[[i, f]];
                fmin = fmin.min(v);
                fmax = fmax.max(v);
            }
            if (fmax - fmin).abs() < 1e-15 {
                continue;
            }

            let r = (rng.next_u64() as f64) / (u64::MAX as f64);
            let threshold = fmin + r * (fmax - fmin);

            let (left, right): (Vec<usize>, Vec<usize>) =
                indices.iter().partition(|&&i| x[[i, f]] <= threshold);
            if left.len() < min_samples_leaf || right.len() < min_samples_leaf {
                continue;
            }

            let score = Self::weighted_variance(y, &left, &right);
            if best.map_or(true, |(_, _, s)| score < s) {
                best = Some((f, threshold, score));
            }
        }

        let Some((feature, threshold, _)) = best else {
            return Self::leaf(y, indices);
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) =
            indices.iter().partition(|&&i| x[[i, feature]] <= threshold);
        let left = Self::build_tree(x, y, &left_idx, min_samples_split, min_samples_leaf, rng);
        let right = Self::build_tree(x, y, &right_idx, min_samples_split, min_samples_leaf, rng);

        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf(y: &Array1<f64>, indices: &[usize]) -> TreeNode {
        TreeNode::Leaf {
            mean: Self::mean(y, indices),
            variance: Self::variance(y, indices),
        }
    }

    fn mean(y: &Array1<f64>, indices: &[usize]) -> f64 {
        indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len().max(1) as f64
    }

    fn variance(y: &Array1<f64>, indices: &[usize]) -> f64 {
        if indices.is_empty() {
            return 0.0;
        }
        let mean = Self::mean(y, indices);
        indices.iter().map(|&i| (y[i] - mean).powi(2)).sum::<f64>() / indices.len() as f64
    }

    fn weighted_variance(y: &Array1<f64>, left: &[usize], right: &[usize]) -> f64 {
        let n = (left.len() + right.len()) as f64;
        (left.len() as f64 * Self::variance(y, left) + right.len() as f64 * Self::variance(y, right))
            / n
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), OptimizerError> {
        if x.nrows() != y.len() {
            return Err(OptimizerError::Surrogate(format!(
                "expected {} targets, got {}",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 {
            return Err(OptimizerError::Surrogate("no observations to fit".to_string()));
        }

        let all_indices: Vec<usize> = (0..x.nrows()).collect();
        let base_seed = self.random_state;
        let min_split = self.min_samples_split;
        let min_leaf = self.min_samples_leaf;

        self.trees = (0..self.n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(tree_idx as u64));
                Self::build_tree(x, y, &all_indices, min_split, min_leaf, &mut rng)
            })
            .collect();
        self.n_features = x.ncols();
        Ok(())
    }

    /// Predicted mean and standard deviation for every row of `x`
    pub fn predict(&self, x: &Array2<f64>) -> Result<(Array1<f64>, Array1<f64>), OptimizerError> {
        if !self.is_fitted() {
            return Err(OptimizerError::Surrogate("surrogate is not fitted".to_string()));
        }
        if x.ncols() != self.n_features {
            return Err(OptimizerError::Surrogate(format!(
                "expected {} features, got {}",
                self.n_features,
                x.ncols()
            )));
        }

        let n_trees = self.trees.len() as f64;
        let mut mean = Array1::zeros(x.nrows());
        let mut std = Array1::zeros(x.nrows());
        for (i, row) in x.rows().into_iter().enumerate() {
            let mut sum = 0.0;
            let mut sum_sq = 0.0;
            let mut leaf_var = 0.0;
            for tree in &self.trees {
                let (m, v) = tree.leaf(row);
                sum += m;
                sum_sq += m * m;
                leaf_var += v;
            }
            let mu = sum / n_trees;
            let between = (sum_sq / n_trees - mu * mu).max(0.0);
            mean[i] = mu;
            std[i] = (leaf_var / n_trees + between).sqrt().max(MIN_STD);
        }
        Ok((mean, std))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fits_monotone_target() {
        let x = array![[0.0], [0.1], [0.2], [0.3], [0.4], [0.5], [0.6], [0.7], [0.8], [0.9]];
        let y = x.column(0).mapv(|v| 2.0 * v);
        let mut model = ExtraTreesSurrogate::new(50, 1).with_random_state(42);
        model.fit(&x, &y).unwrap();

        let (mean, std) = model.predict(&array![[0.05], [0.85]]).unwrap();
        assert!(mean[0] < mean[1]);
        assert!(std.iter().all(|&s| s >= MIN_STD));
    }

    #[test]
    fn test_constant_target_has_floor_std() {
        let x = array![[0.0, 1.0], [0.5, 0.0], [1.0, 1.0], [0.2, 0.3]];
        let y = array![3.0, 3.0, 3.0, 3.0];
        let mut model = ExtraTreesSurrogate::new(10, 1);
        model.fit(&x, &y).unwrap();
        let (mean, std) = model.predict(&array![[0.3, 0.3]]).unwrap();
        assert!((mean[0] - 3.0).abs() < 1e-12);
        assert_eq!(std[0], MIN_STD);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let x = array![[0.0], [0.3], [0.6], [0.9], [0.1], [0.4]];
        let y = array![1.0, 0.2, 0.8, 0.5, 0.9, 0.1];
        let probe = array![[0.25], [0.75]];

        let mut a = ExtraTreesSurrogate::new(20, 1).with_random_state(7);
        let mut b = ExtraTreesSurrogate::new(20, 1).with_random_state(7);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.predict(&probe).unwrap(), b.predict(&probe).unwrap());
    }

    #[test]
    fn test_predict_requires_fit() {
        let model = ExtraTreesSurrogate::new(5, 1);
        assert!(model.predict(&array![[0.0]]).is_err());
    }
}
