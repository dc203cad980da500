//! Error types for `SimpleVec` containers.
//!
//! Only two things can go wrong: a checked access past the end of a
//! sequence, and a buffer allocation that cannot be satisfied. The
//! infallible allocating paths treat the latter as fatal; the `try_*`
//! variants report it through this type instead.

use std::fmt;

/// Errors that can occur in `SimpleVec` containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Checked access at an index that does not hold a live element.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the sequence at the time of the access.
        len: usize,
    },

    /// The requested element count does not fit in a single allocation.
    CapacityOverflow {
        /// The requested element count.
        requested: usize,
    },

    /// The global allocator returned a null block.
    AllocFailed {
        /// Size of the failed request in bytes.
        bytes: usize,
        /// Alignment of the failed request.
        align: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Error::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: cannot allocate {requested} elements")
            }
            Error::AllocFailed { bytes, align } => {
                write!(f, "allocation of {bytes} bytes (align {align}) failed")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for `SimpleVec` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = Error::OutOfRange { index: 3, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 3 out of range for sequence of length 3"
        );
    }

    #[test]
    fn test_alloc_messages() {
        assert_eq!(
            Error::CapacityOverflow { requested: 7 }.to_string(),
            "capacity overflow: cannot allocate 7 elements"
        );
        assert_eq!(
            Error::AllocFailed { bytes: 64, align: 8 }.to_string(),
            "allocation of 64 bytes (align 8) failed"
        );
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(Error::OutOfRange { index: 0, len: 0 });
        assert!(err.source().is_none());
    }
}
