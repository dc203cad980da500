//! `SimpleVec`: a growable contiguous sequence built from scratch
//!
//! This crate provides:
//!
//! - [`ArrayPtr`]: a sole-owner handle over one heap block, allocated and
//!   freed directly through `std::alloc`
//! - [`SimpleVector`]: the sequence on top of it, with doubling growth,
//!   ordered insert/erase, and checked (`at`) and unchecked access
//! - [`ReserveHint`] / [`reserve()`]: a capacity hint for construction
//! - [`simple_vector!`]: literal construction, like `vec!`
//!
//! Set `SIMPLEVEC_LOG=trace` and call [`simplevec_log::init_from_env`] to
//! see every block allocation and reallocation.
//!
//! ```
//! use simplevec::{reserve, simple_vector, SimpleVector};
//!
//! let mut v: SimpleVector<i32> = SimpleVector::with_reserve(reserve(2));
//! v.push(3);
//! v.push(4);
//! assert_eq!(v, simple_vector![3, 4]);
//! ```

pub mod array_ptr;
pub mod error;
mod reserve;
pub mod vector;

pub use array_ptr::ArrayPtr;
pub use error::{Error, Result};
pub use reserve::{ReserveHint, reserve};
pub use vector::{IntoIter, SimpleVector};

/// Builds a [`SimpleVector`] from a literal list, or from a value and a count.
///
/// The result has exactly as much capacity as it has elements.
///
/// ```
/// use simplevec::simple_vector;
///
/// let empty: simplevec::SimpleVector<u8> = simple_vector![];
/// assert!(empty.is_empty());
///
/// let listed = simple_vector![1, 2, 3];
/// assert_eq!(listed.capacity(), 3);
///
/// let repeated = simple_vector!["x"; 2];
/// assert_eq!(repeated, ["x", "x"]);
/// ```
#[macro_export]
macro_rules! simple_vector {
    () => {
        $crate::SimpleVector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::SimpleVector::from_elem($n, &$elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::SimpleVector::from([$($x),+])
    };
}
