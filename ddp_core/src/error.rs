use std::{fmt, io};

/// Errors produced by communication hooks when inputs are invalid.
#[derive(Debug)]
pub enum HookError {
    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),

    /// A shape invariant was violated (e.g. mismatched lengths).
    ShapeMismatch {
        /// Human-readable context for the mismatch (e.g. "bucket", "channel").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            HookError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
        }
    }
}

impl std::error::Error for HookError {}

/// Boundary conversion for engines / I/O APIs.
impl From<HookError> for io::Error {
    fn from(value: HookError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_violated_invariant() {
        let err = HookError::ShapeMismatch {
            what: "channel",
            got: 7,
            expected: 4,
        };
        assert_eq!(err.to_string(), "shape mismatch for channel: got 7, expected 4");

        let err = HookError::InvalidInput("bad state");
        assert_eq!(err.to_string(), "invalid input: bad state");
    }

    #[test]
    fn converts_to_io_error_at_the_boundary() {
        let err: io::Error = HookError::InvalidInput("bad state").into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
