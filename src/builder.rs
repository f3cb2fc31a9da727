//! Network builder.
//!
//! `NetworkBuilder` is the way to configure a [`NeuralNetwork`] beyond the
//! defaults used by [`NeuralNetwork::new`]: activation, initialisation seed,
//! and the two backpropagation compatibility knobs from [`crate::config`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BiasGradient, HiddenDerivative};
use crate::{Activation, Dataset, Error, Matrix, NetworkConfig, NeuralNetwork, Result};

#[derive(Debug, Clone)]
/// Builder for a `NeuralNetwork`.
///
/// Example:
///
/// ```rust
/// use rust_matnet::{Activation, Matrix, NetworkBuilder};
///
/// # fn main() -> rust_matnet::Result<()> {
/// let x = Matrix::from_vec(2, 4, vec![0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0])?;
/// let y = Matrix::from_vec(1, 4, vec![0.0, 1.0, 1.0, 0.0])?;
/// let net = NetworkBuilder::new(4)?
///     .activation(Activation::Sigmoid)
///     .seed(7)
///     .build(x, y)?;
/// assert_eq!(net.hidden_size(), 4);
/// # Ok(())
/// # }
/// ```
pub struct NetworkBuilder {
    hidden: usize,
    config: NetworkConfig,
}

impl NetworkBuilder {
    /// Start building a network with `hidden` units in its single hidden layer.
    pub fn new(hidden: usize) -> Result<Self> {
        if hidden == 0 {
            return Err(Error::InvalidConfig("hidden size must be > 0".to_owned()));
        }
        Ok(Self {
            hidden,
            config: NetworkConfig::default(),
        })
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        self.config.activation = activation;
        self
    }

    /// Seed for weight initialisation. `0` means OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn bias_gradient(mut self, mode: BiasGradient) -> Self {
        self.config.bias_gradient = mode;
        self
    }

    pub fn hidden_derivative(mut self, mode: HiddenDerivative) -> Self {
        self.config.hidden_derivative = mode;
        self
    }

    /// Build against training inputs `x` (features x samples) and labels `y`.
    pub fn build(self, x: Matrix, y: Matrix) -> Result<NeuralNetwork> {
        let mut rng = match self.config.seed {
            0 => StdRng::from_entropy(),
            seed => StdRng::seed_from_u64(seed),
        };
        self.build_with_rng(Dataset::new(x, y)?, &mut rng)
    }

    /// Build using the provided RNG; the configured seed is ignored.
    pub fn build_with_rng<R: Rng + ?Sized>(
        self,
        data: Dataset,
        rng: &mut R,
    ) -> Result<NeuralNetwork> {
        NeuralNetwork::with_rng(data, self.hidden, self.config, rng)
    }
}
