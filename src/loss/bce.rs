/// Binary cross-entropy for a single sigmoid output.
pub struct BceLoss;

/// Predictions are clamped into `[EPS, 1 - EPS]` before taking logs, so a
/// saturated output yields a large finite loss instead of infinity.
pub const EPS: f64 = 1e-12;

impl BceLoss {
    /// `-(y·ln(p) + (1-y)·ln(1-p))` with `p` clamped.
    pub fn loss(predicted: f64, expected: f64) -> f64 {
        let p = predicted.clamp(EPS, 1.0 - EPS);
        -(expected * p.ln() + (1.0 - expected) * (1.0 - p).ln())
    }

    /// Gradient of the loss w.r.t. the output pre-activation when the output
    /// unit is a sigmoid: the two derivatives cancel to `p - y`.
    pub fn delta(predicted: f64, expected: f64) -> f64 {
        predicted - expected
    }
}
