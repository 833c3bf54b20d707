use crate::math::matrix::Matrix;

/// Intermediates of the most recent forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardCache {
    /// The `(n_features, 1)` input the pass was run on.
    pub x: Matrix,
    pub z1: Matrix,
    pub a1: Matrix,
    pub z2: Matrix,
    pub a2: Matrix,
    pub z3: Matrix,
    pub a3: Matrix,
}

impl ForwardCache {
    /// The network's scalar output, `a3[0][0]`.
    pub fn output(&self) -> f64 {
        self.a3[(0, 0)]
    }
}

/// Loss gradients for every parameter, from the most recent backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub dw1: Matrix,
    pub db1: Matrix,
    pub dw2: Matrix,
    pub db2: Matrix,
    pub dw3: Matrix,
    pub db3: Matrix,
}

impl Gradients {
    /// Same order and names as `Parameters::named`.
    pub fn named(&self) -> [(&'static str, &Matrix); 6] {
        [
            ("W1", &self.dw1),
            ("b1", &self.db1),
            ("W2", &self.dw2),
            ("b2", &self.db2),
            ("W3", &self.dw3),
            ("b3", &self.db3),
        ]
    }
}
