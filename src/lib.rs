//! Dense `f32` matrices and a small two-layer feed-forward network.
//!
//! `rust-matnet` is a from-scratch matrix engine plus the training loop it drives.
//! Elementwise work runs through fixed-width lane kernels with scalar tails,
//! matrix products use a cache-aware blocked loop, and [`NeuralNetwork`]
//! implements full-batch gradient descent for one hidden layer.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f32`.
//! - [`Matrix`] is row-major; element `(r, c)` lives at `r * columns + c`.
//! - The network works column-wise: features are rows and samples are columns.
//!   Inputs are `(input_features, samples)`, labels `(output_features, samples)`.
//!
//! # Errors
//!
//! Public operations validate shapes and return [`Result`]. The `unchecked`
//! cargo feature compiles that validation out; a mismatch then panics on an
//! out-of-range index or produces a meaningless result.
//!
//! # Quick start
//!
//! ```rust
//! use rust_matnet::{Matrix, NetworkBuilder, TrainConfig};
//!
//! # fn main() -> rust_matnet::Result<()> {
//! let x = Matrix::from_vec(1, 4, vec![0.1, 0.2, 0.3, 0.4])?;
//! let y = Matrix::from_vec(1, 4, vec![0.2, 0.4, 0.6, 0.8])?;
//!
//! let mut net = NetworkBuilder::new(3)?.seed(1).build(x.clone(), y)?;
//! let report = net.train(TrainConfig::new(200, 0.05))?;
//! assert!(report.final_loss <= report.initial_loss);
//!
//! let prediction = net.predict(&x)?;
//! assert_eq!(prediction.shape(), (1, 4));
//! # Ok(())
//! # }
//! ```
//!
//! # Lower-level loop
//!
//! `train` is a thin wrapper; the same cycle can be driven by hand:
//!
//! ```rust
//! use rust_matnet::{Activation, Matrix, NetworkBuilder};
//!
//! # fn main() -> rust_matnet::Result<()> {
//! let x = Matrix::from_vec(2, 2, vec![0.0, 1.0, 1.0, 0.0])?;
//! let y = Matrix::from_vec(1, 2, vec![1.0, 0.0])?;
//! let mut net = NetworkBuilder::new(4)?
//!     .activation(Activation::Sigmoid)
//!     .seed(2)
//!     .build(x.clone(), y)?;
//!
//! let fwd = net.forward(&x)?;
//! let grads = net.backward(&fwd)?;
//! net.update_parameters(&grads, 0.5)?;
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod config;
pub mod data;
pub mod error;
mod lanes;
pub mod loss;
pub(crate) mod matmul;
pub mod matrix;
pub mod network;
pub mod train;

pub use activation::Activation;
pub use builder::NetworkBuilder;
pub use config::{BiasGradient, HiddenDerivative, NetworkConfig};
pub use data::Dataset;
pub use error::{Error, Result};
pub use lanes::LANES;
pub use matrix::Matrix;
pub use network::{Forward, Gradients, NeuralNetwork};
pub use train::{TrainConfig, TrainReport};
