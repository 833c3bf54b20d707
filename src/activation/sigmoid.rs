use crate::math::matrix::Matrix;

/// Logistic function `1 / (1 + e^-x)`.
///
/// Evaluated in the branch that keeps the exponent non-positive, so large
/// magnitudes saturate to 0 or 1 instead of overflowing.
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `σ(x) · (1 − σ(x))`
pub fn logistic_derivative(x: f64) -> f64 {
    let fx = logistic(x);
    fx * (1.0 - fx)
}

/// Element-wise sigmoid.
pub fn sigmoid(v: &Matrix) -> Matrix {
    v.map(logistic)
}

/// Element-wise sigmoid derivative, evaluated at the pre-activation `v`.
pub fn sigmoid_derivative(v: &Matrix) -> Matrix {
    v.map(logistic_derivative)
}
