//! Network configuration.
//!
//! Two knobs reproduce the arithmetic of the earlier training loop exactly.
//! Both default to the corrected behaviour:
//!
//! - [`BiasGradient`]: whether the output bias gradient is averaged over samples
//!   like every other gradient.
//! - [`HiddenDerivative`]: whether the hidden-layer slope comes from the configured
//!   activation or is always `1 - a1^2` (the tanh derivative).
//!
//! Switching either knob changes training dynamics. [`NetworkConfig::legacy`]
//! turns both on together with ReLU.

use crate::Activation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How `db2` is normalised.
pub enum BiasGradient {
    /// `db2 = rowSum(dZ2) / m`, same as `db1`.
    #[default]
    Mean,
    /// `db2 = rowSum(dZ2)`, not divided by the sample count.
    UnscaledOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Slope applied to the hidden layer during backpropagation.
pub enum HiddenDerivative {
    /// `activation.deactivate(z1)`, matching the forward pass.
    #[default]
    Activation,
    /// `1 - a1^2` regardless of the activation.
    TanhShaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Used by both layers in `forward`, `train`, and `predict`.
    pub activation: Activation,
    /// Weight initialisation seed; `0` draws from OS entropy.
    pub seed: u64,
    pub bias_gradient: BiasGradient,
    pub hidden_derivative: HiddenDerivative,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            activation: Activation::ReLU,
            seed: 0,
            bias_gradient: BiasGradient::default(),
            hidden_derivative: HiddenDerivative::default(),
        }
    }
}

impl NetworkConfig {
    /// ReLU with an unscaled `db2` and a tanh-shaped hidden slope.
    pub fn legacy() -> Self {
        Self {
            activation: Activation::ReLU,
            seed: 0,
            bias_gradient: BiasGradient::UnscaledOutput,
            hidden_derivative: HiddenDerivative::TanhShaped,
        }
    }
}
