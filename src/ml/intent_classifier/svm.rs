//! One-vs-rest soft-margin linear SVM.
//!
//! Each class gets a binary hinge-loss SVM trained with dual coordinate
//! descent. The bias is learned as the weight of an implicit constant feature
//! equal to 1. Coordinates are visited in an order shuffled by a seeded
//! [`StdRng`], so training on the same data with the same seed is
//! reproducible. After training, each binary model is calibrated with
//! [`PlattScaler`] on its own training decision values.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{ColloquyError, Result};
use crate::ml::intent_classifier::platt::PlattScaler;

/// Hyperparameters for [`LinearSvc`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvmConfig {
    /// Penalty for margin violations.
    pub c: f64,
    /// Maximum passes over the training set per binary model.
    pub max_iter: usize,
    /// Stopping tolerance on the projected-gradient spread.
    pub tolerance: f64,
    /// Seed for the coordinate visiting order.
    pub seed: u64,
}

impl Default for SvmConfig {
    fn default() -> Self {
        SvmConfig {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-3,
            seed: 0,
        }
    }
}

impl SvmConfig {
    /// Check that every hyperparameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(ColloquyError::invalid_config(format!(
                "svm.c must be a positive number, got {}",
                self.c
            )));
        }
        if self.max_iter == 0 {
            return Err(ColloquyError::invalid_config("svm.max_iter must be at least 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ColloquyError::invalid_config(format!(
                "svm.tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// A binary linear decision function `w·x + b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BinarySvm {
    weights: Vec<f64>,
    bias: f64,
}

impl BinarySvm {
    /// Train on vectors with labels `+1.0` / `-1.0`.
    fn train(vectors: &[Vec<f64>], signs: &[f64], config: &SvmConfig, rng: &mut StdRng) -> Self {
        let dim = vectors.first().map_or(0, Vec::len);
        let c = config.c;

        let diagonal: Vec<f64> = vectors.iter().map(|x| dot(x, x) + 1.0).collect();
        let mut alpha = vec![0.0; vectors.len()];
        let mut weights = vec![0.0; dim];
        let mut bias = 0.0;
        let mut order: Vec<usize> = (0..vectors.len()).collect();

        let mut passes = 0;
        let mut converged = false;
        while passes < config.max_iter {
            passes += 1;
            order.shuffle(rng);

            let mut pg_max = f64::NEG_INFINITY;
            let mut pg_min = f64::INFINITY;

            for &i in &order {
                let x = &vectors[i];
                let y = signs[i];
                let g = y * (dot(&weights, x) + bias) - 1.0;

                let pg = if alpha[i] == 0.0 {
                    g.min(0.0)
                } else if alpha[i] == c {
                    g.max(0.0)
                } else {
                    g
                };
                pg_max = pg_max.max(pg);
                pg_min = pg_min.min(pg);

                if pg.abs() > 1e-12 {
                    let old = alpha[i];
                    alpha[i] = (old - g / diagonal[i]).clamp(0.0, c);
                    let delta = (alpha[i] - old) * y;
                    for (w, &xj) in weights.iter_mut().zip(x) {
                        *w += delta * xj;
                    }
                    bias += delta;
                }
            }

            if pg_max - pg_min <= config.tolerance {
                converged = true;
                break;
            }
        }

        if converged {
            debug!("Binary SVM converged after {passes} passes");
        } else {
            debug!(
                "Binary SVM reached max_iter={} without converging",
                config.max_iter
            );
        }

        BinarySvm { weights, bias }
    }

    /// Signed distance-like score; positive means the positive class.
    fn decision(&self, x: &[f64]) -> f64 {
        dot(&self.weights, x) + self.bias
    }
}

/// Multi-class linear SVM with calibrated probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvc {
    dimension: usize,
    models: Vec<BinarySvm>,
    calibrators: Vec<PlattScaler>,
}

impl LinearSvc {
    /// Train one binary model per class and calibrate each.
    ///
    /// `labels[i]` is the class index of `vectors[i]`, in `0..n_classes`.
    ///
    /// # Errors
    ///
    /// Training needs at least two distinct labels. Mismatched lengths,
    /// ragged vectors, out-of-range labels and invalid hyperparameters are
    /// also rejected.
    pub fn train(
        vectors: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        config: &SvmConfig,
    ) -> Result<Self> {
        config.validate()?;

        if vectors.len() != labels.len() {
            return Err(ColloquyError::invalid_argument(format!(
                "got {} vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }

        let dimension = vectors.first().map_or(0, Vec::len);
        if vectors.iter().any(|v| v.len() != dimension) {
            return Err(ColloquyError::invalid_argument(
                "all training vectors must have the same dimension",
            ));
        }

        if let Some(&label) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(ColloquyError::invalid_argument(format!(
                "label {label} is out of range for {n_classes} classes"
            )));
        }

        let mut seen = vec![false; n_classes];
        for &label in labels {
            seen[label] = true;
        }
        let distinct = seen.iter().filter(|&&s| s).count();
        if distinct < 2 {
            return Err(ColloquyError::invalid_argument(format!(
                "training requires at least two distinct labels, got {distinct}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut models = Vec::with_capacity(n_classes);
        let mut calibrators = Vec::with_capacity(n_classes);

        for class in 0..n_classes {
            let positives: Vec<bool> = labels.iter().map(|&l| l == class).collect();
            let signs: Vec<f64> = positives
                .iter()
                .map(|&p| if p { 1.0 } else { -1.0 })
                .collect();

            let model = BinarySvm::train(vectors, &signs, config, &mut rng);
            let decisions: Vec<f64> = vectors.iter().map(|x| model.decision(x)).collect();
            calibrators.push(PlattScaler::fit(&decisions, &positives));
            models.push(model);
        }

        Ok(LinearSvc {
            dimension,
            models,
            calibrators,
        })
    }

    /// Raw decision value of every class.
    pub fn decision_function(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.check_dimension(x)?;
        Ok(self.models.iter().map(|m| m.decision(x)).collect())
    }

    /// Calibrated class probabilities, normalized to sum to 1.
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        let decisions = self.decision_function(x)?;
        let mut probabilities: Vec<f64> = decisions
            .iter()
            .zip(&self.calibrators)
            .map(|(&d, calibrator)| calibrator.probability(d))
            .collect();

        let total: f64 = probabilities.iter().sum();
        if total > 0.0 {
            for p in &mut probabilities {
                *p /= total;
            }
        } else {
            let uniform = 1.0 / probabilities.len() as f64;
            probabilities.iter_mut().for_each(|p| *p = uniform);
        }

        Ok(probabilities)
    }

    /// Index of the most probable class. Ties go to the lower index.
    pub fn predict(&self, x: &[f64]) -> Result<usize> {
        let probabilities = self.predict_proba(x)?;
        let best = probabilities
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (idx, &p)| {
                if p > best.1 { (idx, p) } else { best }
            });
        Ok(best.0)
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.models.len()
    }

    /// Feature dimension the model was trained on.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn check_dimension(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.dimension {
            return Err(ColloquyError::invalid_argument(format!(
                "expected a vector of dimension {}, got {}",
                self.dimension,
                x.len()
            )));
        }
        Ok(())
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
