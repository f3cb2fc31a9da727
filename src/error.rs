use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Operand dimensions are incompatible with the requested operation.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `ShapeMismatch` built from `msg` when `ok` is false.
///
/// With the `unchecked` feature the check is compiled out and `msg` is never evaluated.
#[inline]
pub(crate) fn ensure_shape(ok: bool, msg: impl FnOnce() -> String) -> Result<()> {
    if cfg!(feature = "unchecked") || ok {
        Ok(())
    } else {
        Err(Error::ShapeMismatch(msg()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::ShapeMismatch("2x3 vs 4x5".to_owned());
        assert_eq!(err.to_string(), "shape mismatch: 2x3 vs 4x5");

        let err = Error::InvalidConfig("hidden must be > 0".to_owned());
        assert_eq!(err.to_string(), "invalid config: hidden must be > 0");
    }

    #[cfg(not(feature = "unchecked"))]
    #[test]
    fn ensure_shape_reports_failures() {
        assert!(ensure_shape(true, || unreachable!()).is_ok());
        assert_eq!(
            ensure_shape(false, || "bad".to_owned()),
            Err(Error::ShapeMismatch("bad".to_owned()))
        );
    }
}
