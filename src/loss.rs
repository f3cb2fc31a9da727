//! Loss functions used to report training progress.
//!
//! Losses never feed back into the update: the network's backward pass starts
//! from `a2 - y` directly.

use crate::error::ensure_shape;
use crate::{Matrix, Result};

/// Mean squared error over every element.
///
/// Returns `0.5 * mean((pred - target)^2)`, or `0.0` for empty inputs.
pub fn mse(pred: &Matrix, target: &Matrix) -> Result<f32> {
    ensure_shape(pred.shape() == target.shape(), || {
        format!(
            "mse: prediction {}x{} vs target {}x{}",
            pred.rows(),
            pred.columns(),
            target.rows(),
            target.columns()
        )
    })?;

    if pred.is_empty() {
        return Ok(0.0);
    }

    let sum_sq = pred
        .as_slice()
        .iter()
        .zip(target.as_slice())
        .fold(0.0_f32, |acc, (p, t)| {
            let diff = p - t;
            diff.mul_add(diff, acc)
        });
    Ok(0.5 * sum_sq / pred.len() as f32)
}
