use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::scaler::StandardScaler;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Feature rows with one binary label each.
///
/// Guaranteed non-empty, rectangular, finite, with every label exactly 0 or 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Dataset> {
        if features.is_empty() {
            return Err(Error::Dataset("dataset has no samples".into()));
        }
        if features.len() != labels.len() {
            return Err(Error::Dataset(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let n_features = features[0].len();
        if n_features == 0 {
            return Err(Error::Dataset("samples have no features".into()));
        }
        for (i, row) in features.iter().enumerate() {
            if row.len() != n_features {
                return Err(Error::Dataset(format!(
                    "Row {}: feature count {} does not match first row's {}",
                    i + 1,
                    row.len(),
                    n_features
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(Error::Dataset(format!("Row {}: non-finite feature", i + 1)));
            }
        }
        if let Some((i, y)) = labels.iter().enumerate().find(|(_, y)| **y != 0.0 && **y != 1.0) {
            return Err(Error::Dataset(format!(
                "Row {}: label {} is not 0 or 1",
                i + 1,
                y
            )));
        }
        Ok(Dataset { features, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.features[0].len()
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Sample `i` as an `(n_features, 1)` column and its label.
    pub fn sample(&self, i: usize) -> (Matrix, f64) {
        (Matrix::column(&self.features[i]), self.labels[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Matrix, f64)> + '_ {
        (0..self.len()).map(move |i| self.sample(i))
    }

    /// Reorders samples with one shared permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.shuffle(rng);
        self.features = indices.iter().map(|&i| self.features[i].clone()).collect();
        self.labels = indices.iter().map(|&i| self.labels[i]).collect();
    }

    /// Fits a scaler on all rows and rescales them in place.
    pub fn standardize(&mut self) -> Result<StandardScaler> {
        let scaler = StandardScaler::fit(&self.features)?;
        scaler.transform(&mut self.features);
        Ok(scaler)
    }

    /// Moves the last `ceil(test_fraction · n)` samples into a test set.
    ///
    /// `test_fraction == 0` yields no test set. Both parts must be non-empty
    /// otherwise.
    pub fn split(&self, test_fraction: f64) -> Result<(Dataset, Option<Dataset>)> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(Error::Config(format!(
                "test_fraction must be in [0, 1), got {test_fraction}"
            )));
        }
        let n_test = (test_fraction * self.len() as f64).ceil() as usize;
        if n_test == 0 {
            return Ok((self.clone(), None));
        }
        if n_test >= self.len() {
            return Err(Error::Dataset(format!(
                "cannot hold out {n_test} of {} samples and still train",
                self.len()
            )));
        }
        let cut = self.len() - n_test;
        let train = Dataset {
            features: self.features[..cut].to_vec(),
            labels: self.labels[..cut].to_vec(),
        };
        let test = Dataset {
            features: self.features[cut..].to_vec(),
            labels: self.labels[cut..].to_vec(),
        };
        Ok((train, Some(test)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small() -> Dataset {
        Dataset::new(
            (0..10).map(|i| vec![i as f64, -(i as f64)]).collect(),
            (0..10).map(|i| (i % 2) as f64).collect(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Dataset::new(vec![], vec![]).is_err());
        assert!(Dataset::new(vec![vec![1.0]], vec![1.0, 0.0]).is_err());
        assert!(Dataset::new(vec![vec![1.0], vec![1.0, 2.0]], vec![1.0, 0.0]).is_err());
        assert!(Dataset::new(vec![vec![f64::NAN]], vec![1.0]).is_err());
        assert!(Dataset::new(vec![vec![]], vec![1.0]).is_err());
        let err = Dataset::new(vec![vec![1.0], vec![2.0]], vec![0.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn sample_is_a_column() {
        let data = small();
        let (x, y) = data.sample(3);
        assert_eq!(x.shape(), (2, 1));
        assert_eq!(x[(1, 0)], -3.0);
        assert_eq!(y, 1.0);
        assert_eq!(data.iter().count(), 10);
    }

    #[test]
    fn shuffle_keeps_rows_paired_with_labels() {
        let mut data = small();
        data.shuffle(&mut StdRng::seed_from_u64(5));
        for (row, &y) in data.features().iter().zip(data.labels()) {
            assert_eq!((row[0] as usize % 2) as f64, y);
            assert_eq!(row[1], -row[0]);
        }
        let mut firsts: Vec<f64> = data.features().iter().map(|r| r[0]).collect();
        firsts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(firsts, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn split_rounds_test_size_up() {
        let (train, test) = small().split(0.3).unwrap();
        assert_eq!(train.len(), 7);
        assert_eq!(test.unwrap().len(), 3);

        let (train, test) = small().split(0.25).unwrap();
        assert_eq!(train.len(), 7);
        assert_eq!(test.unwrap().len(), 3);

        let (train, test) = small().split(0.0).unwrap();
        assert_eq!(train.len(), 10);
        assert!(test.is_none());
    }

    #[test]
    fn split_rejects_bad_fractions() {
        assert!(small().split(1.0).is_err());
        assert!(small().split(-0.1).is_err());
        assert!(small().split(0.95).is_err());
    }
}
