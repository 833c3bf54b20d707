use std::fmt;

use rand::Rng;

use crate::activation::sigmoid::{sigmoid, sigmoid_derivative};
use crate::error::{Error, Result};
use crate::loss::bce::BceLoss;
use crate::math::matrix::Matrix;
use crate::network::cache::{ForwardCache, Gradients};
use crate::network::parameters::Parameters;
use crate::optim::sgd::Sgd;

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Where the network is in the per-sample training cycle.
///
/// `Idle → Forwarded` on `forward_prop`, `Forwarded → Backpropagated` on
/// `compute_gradients`, `Backpropagated → Idle` on `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Forwarded,
    Backpropagated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Forwarded => "holding a forward pass",
            Phase::Backpropagated => "holding unapplied gradients",
        };
        f.write_str(s)
    }
}

/// Fully-connected `n_features → 10 → 5 → 1` network with sigmoid units,
/// trained one sample at a time.
#[derive(Debug, Clone)]
pub struct Network {
    n_features: usize,
    params: Parameters,
    optimizer: Sgd,
    phase: Phase,
    cache: Option<ForwardCache>,
    gradients: Option<Gradients>,
}

impl Network {
    /// Randomly initialized network using the thread-local RNG.
    pub fn new(n_features: usize, alpha: f64) -> Result<Network> {
        Network::with_rng(n_features, alpha, &mut rand::thread_rng())
    }

    pub fn with_default_rate(n_features: usize) -> Result<Network> {
        Network::new(n_features, DEFAULT_LEARNING_RATE)
    }

    pub fn with_rng<R: Rng + ?Sized>(n_features: usize, alpha: f64, rng: &mut R) -> Result<Network> {
        check_hyperparameters(n_features, alpha)?;
        Ok(Network::assemble(Parameters::random(n_features, rng), alpha))
    }

    /// Builds a network around caller-supplied parameters. The input width is
    /// taken from `W1`; every other shape must agree with it.
    pub fn from_parameters(params: Parameters, alpha: f64) -> Result<Network> {
        let n_features = params.n_features();
        check_hyperparameters(n_features, alpha)?;
        params.validate(n_features)?;
        Ok(Network::assemble(params, alpha))
    }

    fn assemble(params: Parameters, alpha: f64) -> Network {
        let n_features = params.n_features();
        tracing::debug!(n_features, learning_rate = alpha, "initialized network");
        Network {
            n_features,
            params,
            optimizer: Sgd::new(alpha),
            phase: Phase::Idle,
            cache: None,
            gradients: None,
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs `x` through the three layers and returns the output probability.
    ///
    /// `x` must be an `(n_features, 1)` column. The intermediates are kept for
    /// the next `compute_gradients` call. Fails while gradients from a previous
    /// sample are still waiting for `update`.
    pub fn forward_prop(&mut self, x: &Matrix) -> Result<f64> {
        if self.phase == Phase::Backpropagated {
            return Err(Error::OutOfOrder {
                operation: "forward_prop",
                phase: self.phase,
            });
        }
        let expected = (self.n_features, 1);
        if x.shape() != expected {
            return Err(Error::ShapeMismatch {
                what: "input x",
                expected,
                actual: x.shape(),
            });
        }

        let p = &self.params;
        let z1 = p.w1.dot(x) + p.b1.clone();
        let a1 = sigmoid(&z1);
        let z2 = p.w2.dot(&a1) + p.b2.clone();
        let a2 = sigmoid(&z2);
        let z3 = p.w3.dot(&a2) + p.b3.clone();
        let a3 = sigmoid(&z3);

        let cache = ForwardCache {
            x: x.clone(),
            z1,
            a1,
            z2,
            a2,
            z3,
            a3,
        };
        let y_hat = cache.output();
        self.cache = Some(cache);
        self.gradients = None;
        self.phase = Phase::Forwarded;
        Ok(y_hat)
    }

    /// Per-sample binary cross-entropy. See `BceLoss` for the clamping rule.
    pub fn cross_entropy_loss(y_hat: f64, y: f64) -> f64 {
        BceLoss::loss(y_hat, y)
    }

    /// Backward pass for the sample of the last `forward_prop`.
    ///
    /// Stores and returns the gradients without touching the parameters;
    /// `update` must follow before the next forward pass.
    pub fn compute_gradients(&mut self, y_hat: f64, y: f64) -> Result<&Gradients> {
        if self.phase != Phase::Forwarded {
            return Err(Error::OutOfOrder {
                operation: "compute_gradients",
                phase: self.phase,
            });
        }
        let cache = self.cache.as_ref().ok_or(Error::NotYetComputed("forward pass"))?;
        let p = &self.params;

        let dz3 = Matrix::filled(1, 1, BceLoss::delta(y_hat, y));
        let dw3 = dz3.dot(&cache.a2.transpose());

        let dz2 = p.w3.transpose().dot(&dz3).hadamard(&sigmoid_derivative(&cache.z2));
        let dw2 = dz2.dot(&cache.a1.transpose());

        let dz1 = p.w2.transpose().dot(&dz2).hadamard(&sigmoid_derivative(&cache.z1));
        let dw1 = dz1.dot(&cache.x.transpose());

        self.gradients = Some(Gradients {
            dw1,
            db1: dz1,
            dw2,
            db2: dz2,
            dw3,
            db3: dz3,
        });
        self.phase = Phase::Backpropagated;
        self.last_gradients()
    }

    /// Applies the stored gradients with the network's learning rate.
    pub fn update(&mut self) -> Result<()> {
        if self.phase != Phase::Backpropagated {
            return Err(Error::OutOfOrder {
                operation: "update",
                phase: self.phase,
            });
        }
        let grads = self.gradients.as_ref().ok_or(Error::NotYetComputed("gradient"))?;
        self.optimizer.step(&mut self.params, grads)?;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// `compute_gradients` followed immediately by `update`.
    pub fn back_prop(&mut self, y_hat: f64, y: f64) -> Result<()> {
        self.compute_gradients(y_hat, y)?;
        self.update()
    }

    pub fn last_forward(&self) -> Result<&ForwardCache> {
        self.cache.as_ref().ok_or(Error::NotYetComputed("forward pass"))
    }

    /// Gradients of the current sample. They stay readable after `update`
    /// and are dropped by the next `forward_prop`.
    pub fn last_gradients(&self) -> Result<&Gradients> {
        self.gradients.as_ref().ok_or(Error::NotYetComputed("gradient"))
    }
}

fn check_hyperparameters(n_features: usize, alpha: f64) -> Result<()> {
    if n_features == 0 {
        return Err(Error::InvalidHyperparameter(
            "n_features must be at least 1".into(),
        ));
    }
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(Error::InvalidHyperparameter(format!(
            "learning rate must be a positive finite number, got {alpha}"
        )));
    }
    Ok(())
}
