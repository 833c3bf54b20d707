use crate::data::dataset::Dataset;
use crate::error::Result;

/// `n` two-feature samples in two well-separated clusters, already roughly
/// standardized. Class 0 sits around `(-1, -1)`, class 1 around `(1, 1)`, and
/// classes alternate so every epoch sees both early.
///
/// The spread is deterministic, so the same `n` always yields the same data.
pub fn linearly_separable(n: usize) -> Result<Dataset> {
    let mut features = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let class = i % 2;
        let center = if class == 0 { -1.0 } else { 1.0 };
        let angle = i as f64 * 2.399;
        let r = 0.5 * (i as f64 * 0.31).sin().abs();
        features.push(vec![center + r * angle.cos(), center + r * angle.sin()]);
        labels.push(class as f64);
    }
    Dataset::new(features, labels)
}
