use crate::error::{Error, Result};
use crate::network::{Gradients, Parameters};

/// Plain gradient descent: `param ← param − learning_rate · gradient`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to all six parameters in place.
    ///
    /// Every gradient's shape is checked before anything is written, so a
    /// mismatch leaves `params` untouched.
    pub fn step(&self, params: &mut Parameters, grads: &Gradients) -> Result<()> {
        for ((what, param), (_, grad)) in params.named().into_iter().zip(grads.named()) {
            if param.shape() != grad.shape() {
                return Err(Error::ShapeMismatch {
                    what,
                    expected: param.shape(),
                    actual: grad.shape(),
                });
            }
        }

        let lr = self.learning_rate;
        for ((_, param), (_, grad)) in params.named_mut().into_iter().zip(grads.named()) {
            *param = param.clone() - grad.map(|g| g * lr);
        }
        Ok(())
    }
}
