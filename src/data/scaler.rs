use crate::error::{Error, Result};

/// Per-column standardization to zero mean and unit variance.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    /// Population standard deviation; constant columns get 1.
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<StandardScaler> {
        let n_cols = rows
            .first()
            .map(|r| r.len())
            .ok_or_else(|| Error::Dataset("cannot fit a scaler on zero rows".into()))?;
        let n = rows.len() as f64;

        let mut mean = vec![0.0; n_cols];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0; n_cols];
        for row in rows {
            for ((s, v), m) in var.iter_mut().zip(row).zip(&mean) {
                *s += (v - m).powi(2);
            }
        }
        // A column counts as constant when its spread is rounding noise
        // relative to its own magnitude.
        let scale = var
            .into_iter()
            .zip(&mean)
            .map(|(s, m)| {
                let std = (s / n).sqrt();
                if std <= 10.0 * f64::EPSILON * m.abs() { 1.0 } else { std }
            })
            .collect();

        Ok(StandardScaler { mean, scale })
    }

    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }

    pub fn transform(&self, rows: &mut [Vec<f64>]) {
        for row in rows.iter_mut() {
            *row = self.transform_row(row);
        }
    }
}
