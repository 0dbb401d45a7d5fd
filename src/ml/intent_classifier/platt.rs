//! Platt scaling: sigmoid calibration of SVM decision values.
//!
//! Fits `P(y = 1 | f) = 1 / (1 + exp(A f + B))` by minimizing the negative
//! log-likelihood with Newton's method and a backtracking line search. Targets
//! are regularized to `(N+ + 1) / (N+ + 2)` and `1 / (N- + 2)` so perfectly
//! separated training data still yields finite parameters.

use log::warn;
use serde::{Deserialize, Serialize};

const MAX_ITER: usize = 100;
const MIN_STEP: f64 = 1e-10;
const SIGMA: f64 = 1e-12;
const EPS: f64 = 1e-5;

/// Fitted sigmoid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattScaler {
    /// Slope; negative when larger decision values mean the positive class.
    pub a: f64,
    /// Offset.
    pub b: f64,
}

impl PlattScaler {
    /// Fit the sigmoid on decision values and their binary labels.
    pub fn fit(decision_values: &[f64], positives: &[bool]) -> Self {
        let prior1 = positives.iter().filter(|&&p| p).count() as f64;
        let prior0 = positives.len() as f64 - prior1;

        let hi_target = (prior1 + 1.0) / (prior1 + 2.0);
        let lo_target = 1.0 / (prior0 + 2.0);
        let targets: Vec<f64> = positives
            .iter()
            .map(|&p| if p { hi_target } else { lo_target })
            .collect();

        let mut a = 0.0;
        let mut b = ((prior0 + 1.0) / (prior1 + 1.0)).ln();
        let mut fval = objective(decision_values, &targets, a, b);

        for _ in 0..MAX_ITER {
            let (mut h11, mut h22, mut h21) = (SIGMA, SIGMA, 0.0);
            let (mut g1, mut g2) = (0.0, 0.0);

            for (&f, &t) in decision_values.iter().zip(&targets) {
                let (p, q) = sigmoid_pair(f * a + b);
                let d2 = p * q;
                h11 += f * f * d2;
                h22 += d2;
                h21 += f * d2;
                let d1 = t - p;
                g1 += f * d1;
                g2 += d1;
            }

            if g1.abs() < EPS && g2.abs() < EPS {
                break;
            }

            let det = h11 * h22 - h21 * h21;
            let da = -(h22 * g1 - h21 * g2) / det;
            let db = -(-h21 * g1 + h11 * g2) / det;
            let gd = g1 * da + g2 * db;

            let mut step = 1.0;
            while step >= MIN_STEP {
                let new_a = a + step * da;
                let new_b = b + step * db;
                let new_f = objective(decision_values, &targets, new_a, new_b);
                if new_f < fval + 0.0001 * step * gd {
                    a = new_a;
                    b = new_b;
                    fval = new_f;
                    break;
                }
                step /= 2.0;
            }

            if step < MIN_STEP {
                warn!("Platt scaling line search failed; keeping A={a}, B={b}");
                break;
            }
        }

        PlattScaler { a, b }
    }

    /// Calibrated probability of the positive class.
    pub fn probability(&self, decision_value: f64) -> f64 {
        sigmoid_pair(decision_value * self.a + self.b).0
    }
}

/// Returns `(1 / (1 + e^x), e^x / (1 + e^x))` without overflow.
fn sigmoid_pair(x: f64) -> (f64, f64) {
    if x >= 0.0 {
        let e = (-x).exp();
        (e / (1.0 + e), 1.0 / (1.0 + e))
    } else {
        let e = x.exp();
        (1.0 / (1.0 + e), e / (1.0 + e))
    }
}

fn objective(decision_values: &[f64], targets: &[f64], a: f64, b: f64) -> f64 {
    decision_values
        .iter()
        .zip(targets)
        .map(|(&f, &t)| {
            let x = f * a + b;
            if x >= 0.0 {
                t * x + (-x).exp().ln_1p()
            } else {
                (t - 1.0) * x + x.exp().ln_1p()
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separable_data() {
        let scaler = PlattScaler::fit(&[1.0, 1.2, -1.0, -0.9], &[true, true, false, false]);
        assert!(scaler.a < 0.0);
        assert!(scaler.probability(1.0) > 0.5);
        assert!(scaler.probability(-1.0) < 0.5);
        assert!(scaler.probability(3.0) > scaler.probability(1.0));
    }

    #[test]
    fn test_symmetric_data_has_zero_offset() {
        let scaler = PlattScaler::fit(&[1.0, 1.0, -1.0, -1.0], &[true, true, false, false]);
        assert!(scaler.b.abs() < 1e-6);
        assert!((scaler.probability(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_probability_bounds() {
        let scaler = PlattScaler { a: -50.0, b: 0.0 };
        for f in [-1e6, -10.0, 0.0, 10.0, 1e6] {
            let p = scaler.probability(f);
            assert!((0.0..=1.0).contains(&p), "p({f}) = {p}");
        }
    }

    #[test]
    fn test_single_class_falls_back_to_prior() {
        let scaler = PlattScaler::fit(&[-1.0, -1.0, -1.0], &[false, false, false]);
        assert!(scaler.probability(-1.0) < 0.5);
    }
}
