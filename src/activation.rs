//! Activation functions.
//!
//! Each variant has two evaluation paths:
//!
//! - scalar (`activate` / `deactivate`): uses the precise `f32::exp`;
//! - lane (`activate_lane` / `deactivate_lane`): uses [`exp_approx`], a 9-term
//!   polynomial. This is what `Matrix::activate` runs for every element.
//!
//! The two paths agree closely for small inputs and drift apart as `|v|` grows
//! (past roughly 3 the polynomial is no longer a usable exponential).
//!
//! `deactivate` is the derivative with respect to the pre-activation input `v`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Element-wise activation function.
pub enum Activation {
    Sigmoid,
    #[default]
    ReLU,
    Tanh,
}

impl Activation {
    #[inline]
    pub fn activate(self, v: f32) -> f32 {
        match self {
            Activation::Sigmoid => sigmoid_with(v, f32::exp),
            Activation::ReLU => relu(v),
            Activation::Tanh => tanh_with(v, f32::exp),
        }
    }

    #[inline]
    pub fn deactivate(self, v: f32) -> f32 {
        match self {
            Activation::Sigmoid => {
                let s = sigmoid_with(v, f32::exp);
                s * (1.0 - s)
            }
            Activation::ReLU => relu_grad(v),
            Activation::Tanh => {
                let a = tanh_with(v, f32::exp);
                1.0 - a * a
            }
        }
    }

    #[inline]
    pub fn activate_lane(self, v: f32) -> f32 {
        match self {
            Activation::Sigmoid => sigmoid_with(v, exp_approx),
            Activation::ReLU => relu(v),
            Activation::Tanh => tanh_with(v, exp_approx),
        }
    }

    #[inline]
    pub fn deactivate_lane(self, v: f32) -> f32 {
        match self {
            Activation::Sigmoid => {
                let s = sigmoid_with(v, exp_approx);
                s * (1.0 - s)
            }
            Activation::ReLU => relu_grad(v),
            Activation::Tanh => {
                let a = tanh_with(v, exp_approx);
                1.0 - a * a
            }
        }
    }
}

/// Polynomial approximation of `e^v`.
///
/// Evaluates `sum = 1 + v * sum / k` for `k = 9, 8, ..., 1`, starting from `sum = 0`.
/// The first step yields `1`, so this is the degree-8 Taylor polynomial in Horner form.
#[inline]
pub fn exp_approx(v: f32) -> f32 {
    let mut sum = 0.0_f32;
    for k in (1..=9).rev() {
        sum = 1.0 + v * sum / k as f32;
    }
    sum
}

#[inline]
fn sigmoid_with(v: f32, exp: impl Fn(f32) -> f32) -> f32 {
    1.0 / (1.0 + exp(-v))
}

#[inline]
fn tanh_with(v: f32, exp: impl Fn(f32) -> f32) -> f32 {
    2.0 * sigmoid_with(2.0 * v, exp) - 1.0
}

#[inline]
fn relu(v: f32) -> f32 {
    v.max(0.0)
}

/// Sub-gradient of ReLU; the kink at zero maps to 0.5.
#[inline]
fn relu_grad(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        0.0
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_approx_matches_exp_near_zero() {
        for &v in &[-1.0_f32, -0.5, 0.0, 0.25, 1.0] {
            assert!(
                (exp_approx(v) - v.exp()).abs() < 1e-5,
                "v={v} approx={} exact={}",
                exp_approx(v),
                v.exp()
            );
        }
        assert_eq!(exp_approx(0.0), 1.0);
    }

    #[test]
    fn exp_approx_diverges_for_large_negative_inputs() {
        // Degree-8 partial sum of e^-10: 1 - 10 + 50 - ... + 10^8/8! = 1342.59.
        let v = exp_approx(-10.0);
        assert!(v > 1.0);
        assert!((v - 1342.59).abs() < 0.5, "exp_approx(-10) = {v}");
        assert!(Activation::Sigmoid.activate_lane(10.0) < 0.01);
        assert!(Activation::Sigmoid.activate(10.0) > 0.999);
    }

    #[test]
    fn sigmoid_basic_values() {
        assert!((Activation::Sigmoid.activate(0.0) - 0.5).abs() < 1e-6);
        assert!(Activation::Sigmoid.activate(10.0) > 0.999);
        assert!(Activation::Sigmoid.activate(-10.0) < 0.001);
        assert!((Activation::Sigmoid.deactivate(0.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn relu_sub_gradient_at_zero_is_half() {
        assert_eq!(Activation::ReLU.activate(-2.0), 0.0);
        assert_eq!(Activation::ReLU.activate(3.0), 3.0);

        assert_eq!(Activation::ReLU.deactivate(0.0), 0.5);
        assert_eq!(Activation::ReLU.deactivate(2.0), 1.0);
        assert_eq!(Activation::ReLU.deactivate(-2.0), 0.0);
        assert_eq!(Activation::ReLU.deactivate_lane(0.0), 0.5);
    }

    #[test]
    fn tanh_is_built_from_sigmoid() {
        for &v in &[-2.0_f32, -0.3, 0.0, 0.7, 1.5] {
            assert!((Activation::Tanh.activate(v) - v.tanh()).abs() < 1e-5);
            let a = Activation::Tanh.activate(v);
            assert!((Activation::Tanh.deactivate(v) - (1.0 - a * a)).abs() < 1e-6);
        }
    }

    #[test]
    fn lane_path_tracks_scalar_path_for_small_inputs() {
        for act in [Activation::Sigmoid, Activation::ReLU, Activation::Tanh] {
            for &v in &[-0.4_f32, -0.1, 0.0, 0.2, 0.4] {
                assert!((act.activate(v) - act.activate_lane(v)).abs() < 1e-5);
                assert!((act.deactivate(v) - act.deactivate_lane(v)).abs() < 1e-5);
            }
        }
    }
}
