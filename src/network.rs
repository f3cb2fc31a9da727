use rand::Rng;

use crate::config::{BiasGradient, HiddenDerivative};
use crate::{Activation, Dataset, Error, Matrix, NetworkBuilder, NetworkConfig, Result, loss};

/// Two-layer feed-forward network trained by full-batch gradient descent.
///
/// Shapes, with `n_x` input features, `n_h` hidden units, `n_y` outputs and
/// `m` samples:
///
/// - `w1: (n_h, n_x)`, `b1: (n_h, 1)`
/// - `w2: (n_y, n_h)`, `b2: (n_y, 1)`
/// - `x: (n_x, m)`, `y: (n_y, m)`
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    w1: Matrix,
    b1: Matrix,
    w2: Matrix,
    b2: Matrix,
    data: Dataset,
    config: NetworkConfig,
}

/// Cached activations from one forward pass.
#[derive(Debug, Clone)]
pub struct Forward {
    pub z1: Matrix,
    pub a1: Matrix,
    pub z2: Matrix,
    pub a2: Matrix,
    activation: Activation,
}

impl Forward {
    /// Activation the pass was run with.
    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }
}

/// Parameter gradients, same shapes as the parameters.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub dw1: Matrix,
    pub db1: Matrix,
    pub dw2: Matrix,
    pub db2: Matrix,
}

impl NeuralNetwork {
    /// Network with `hidden` units and the default configuration.
    ///
    /// Input and output sizes come from `x.rows()` and `y.rows()`; samples are columns.
    pub fn new(x: Matrix, y: Matrix, hidden: usize) -> Result<Self> {
        NetworkBuilder::new(hidden)?.build(x, y)
    }

    pub(crate) fn with_rng<R: Rng + ?Sized>(
        data: Dataset,
        hidden: usize,
        config: NetworkConfig,
        rng: &mut R,
    ) -> Result<Self> {
        if hidden == 0 {
            return Err(Error::InvalidConfig("hidden size must be > 0".to_owned()));
        }

        let n_x = data.input_features();
        let n_y = data.output_features();
        let w1 = Matrix::random_with_rng(hidden, n_x, rng);
        let w2 = Matrix::random_with_rng(n_y, hidden, rng);

        Ok(Self {
            w1,
            b1: Matrix::zeros(hidden, 1),
            w2,
            b2: Matrix::zeros(n_y, 1),
            data,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    #[inline]
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    #[inline]
    pub fn hidden_size(&self) -> usize {
        self.w1.rows()
    }

    #[inline]
    pub fn input_features(&self) -> usize {
        self.w1.columns()
    }

    #[inline]
    pub fn output_features(&self) -> usize {
        self.w2.rows()
    }

    /// Forward pass with the configured activation.
    pub fn forward(&self, x: &Matrix) -> Result<Forward> {
        self.forward_with(self.config.activation, x)
    }

    /// Forward pass on `x` (shape `(n_x, samples)`):
    ///
    /// - `z1 = w1 * x + b1`, `a1 = act(z1)`
    /// - `z2 = w2 * a1 + b2`, `a2 = act(z2)`
    ///
    /// Biases are broadcast across sample columns.
    pub fn forward_with(&self, activation: Activation, x: &Matrix) -> Result<Forward> {
        let z1 = self.w1.matmul(x)?.add_col(&self.b1)?;
        let a1 = z1.activate(activation);
        let z2 = self.w2.matmul(&a1)?.add_col(&self.b2)?;
        let a2 = z2.activate(activation);

        Ok(Forward {
            z1,
            a1,
            z2,
            a2,
            activation,
        })
    }

    /// Gradients for a forward pass over the training inputs.
    ///
    /// `forward` must come from the network's own `x`; its output is compared
    /// against the network's `y`. With `m` samples:
    ///
    /// - `dZ2 = a2 - y`
    /// - `dW2 = dZ2 * a1^T / m`, `db2 = rowSum(dZ2) / m` (see [`BiasGradient`])
    /// - `dZ1 = (w2^T * dZ2) ⊙ slope` (see [`HiddenDerivative`])
    /// - `dW1 = dZ1 * x^T / m`, `db1 = rowSum(dZ1) / m`
    pub fn backward(&self, forward: &Forward) -> Result<Gradients> {
        let x = self.data.x();
        let y = self.data.y();
        let m = y.columns() as f32;

        let dz2 = forward.a2.sub_elements(y)?;
        let dw2 = dz2.matmul(&forward.a1.transpose())?.div_scalar(m);
        let db2 = match self.config.bias_gradient {
            BiasGradient::Mean => dz2.sum_columns().div_scalar(m),
            BiasGradient::UnscaledOutput => dz2.sum_columns(),
        };

        let slope = match self.config.hidden_derivative {
            HiddenDerivative::Activation => forward.z1.deactivate(forward.activation),
            HiddenDerivative::TanhShaped => forward.a1.square().rsub_scalar(1.0),
        };
        let dz1 = self.w2.transpose().matmul(&dz2)?.mul_elements(&slope)?;
        let dw1 = dz1.matmul(&x.transpose())?.div_scalar(m);
        let db1 = dz1.sum_columns().div_scalar(m);

        Ok(Gradients { dw1, db1, dw2, db2 })
    }

    /// `param -= learning_rate * d_param` for all four parameters.
    ///
    /// Nothing is written unless every shape matches.
    pub fn update_parameters(&mut self, grads: &Gradients, learning_rate: f32) -> Result<()> {
        let w1 = self.w1.sub_elements(&grads.dw1.mul_scalar(learning_rate))?;
        let b1 = self.b1.sub_elements(&grads.db1.mul_scalar(learning_rate))?;
        let w2 = self.w2.sub_elements(&grads.dw2.mul_scalar(learning_rate))?;
        let b2 = self.b2.sub_elements(&grads.db2.mul_scalar(learning_rate))?;

        self.w1 = w1;
        self.b1 = b1;
        self.w2 = w2;
        self.b2 = b2;
        Ok(())
    }

    /// MSE of the current predictions on the training data.
    pub fn loss(&self) -> Result<f32> {
        let fwd = self.forward(self.data.x())?;
        loss::mse(&fwd.a2, self.data.y())
    }
}
