use rand::Rng;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Output widths of the three layers, input side first.
pub const LAYER_SIZES: [usize; 3] = [10, 5, 1];

/// Weights are drawn uniformly from `[0, 1)` and multiplied by this.
pub const INIT_SCALE: f64 = 0.01;

/// Weights and biases of the three layers.
///
/// `wN` has shape `(out, in)` and `bN` has shape `(out, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub w1: Matrix,
    pub b1: Matrix,
    pub w2: Matrix,
    pub b2: Matrix,
    pub w3: Matrix,
    pub b3: Matrix,
}

impl Parameters {
    /// Small positive random weights and all-ones biases.
    pub fn random<R: Rng + ?Sized>(n_features: usize, rng: &mut R) -> Parameters {
        let [h1, h2, out] = LAYER_SIZES;
        Parameters {
            w1: Matrix::random_uniform(h1, n_features, INIT_SCALE, rng),
            b1: Matrix::ones(h1, 1),
            w2: Matrix::random_uniform(h2, h1, INIT_SCALE, rng),
            b2: Matrix::ones(h2, 1),
            w3: Matrix::random_uniform(out, h2, INIT_SCALE, rng),
            b3: Matrix::ones(out, 1),
        }
    }

    /// The shape every parameter must have for a given input width.
    pub fn expected_shapes(n_features: usize) -> [(&'static str, (usize, usize)); 6] {
        let [h1, h2, out] = LAYER_SIZES;
        [
            ("W1", (h1, n_features)),
            ("b1", (h1, 1)),
            ("W2", (h2, h1)),
            ("b2", (h2, 1)),
            ("W3", (out, h2)),
            ("b3", (out, 1)),
        ]
    }

    /// Input width implied by the first weight matrix.
    pub fn n_features(&self) -> usize {
        self.w1.cols
    }

    pub fn named(&self) -> [(&'static str, &Matrix); 6] {
        [
            ("W1", &self.w1),
            ("b1", &self.b1),
            ("W2", &self.w2),
            ("b2", &self.b2),
            ("W3", &self.w3),
            ("b3", &self.b3),
        ]
    }

    pub(crate) fn named_mut(&mut self) -> [(&'static str, &mut Matrix); 6] {
        [
            ("W1", &mut self.w1),
            ("b1", &mut self.b1),
            ("W2", &mut self.w2),
            ("b2", &mut self.b2),
            ("W3", &mut self.w3),
            ("b3", &mut self.b3),
        ]
    }

    /// Checks every parameter against `expected_shapes(n_features)`.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        for ((what, expected), (_, actual)) in Parameters::expected_shapes(n_features)
            .into_iter()
            .zip(self.named())
        {
            if actual.shape() != expected {
                return Err(Error::ShapeMismatch {
                    what,
                    expected,
                    actual: actual.shape(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_parameters_have_documented_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        for n_features in [1, 2, 7, 30] {
            let params = Parameters::random(n_features, &mut rng);
            assert_eq!(params.w1.shape(), (10, n_features));
            assert_eq!(params.w2.shape(), (5, 10));
            assert_eq!(params.w3.shape(), (1, 5));
            assert_eq!(params.b1.shape(), (10, 1));
            assert_eq!(params.b2.shape(), (5, 1));
            assert_eq!(params.b3.shape(), (1, 1));
            assert_eq!(params.n_features(), n_features);
            assert!(params.validate(n_features).is_ok());
        }
    }

    #[test]
    fn biases_start_at_one_and_weights_are_small() {
        let mut rng = StdRng::seed_from_u64(2);
        let params = Parameters::random(4, &mut rng);
        for (name, m) in params.named() {
            let values: Vec<f64> = m.data.iter().flatten().copied().collect();
            if name.starts_with('b') {
                assert!(values.iter().all(|&v| v == 1.0), "{name} not all ones");
            } else {
                assert!(values.iter().all(|&v| (0.0..INIT_SCALE).contains(&v)), "{name} out of range");
            }
        }
    }

    #[test]
    fn validate_names_the_offending_parameter() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut params = Parameters::random(3, &mut rng);
        params.b2 = Matrix::ones(4, 1);
        match params.validate(3) {
            Err(Error::ShapeMismatch { what, expected, actual }) => {
                assert_eq!(what, "b2");
                assert_eq!(expected, (5, 1));
                assert_eq!(actual, (4, 1));
            }
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }
}
