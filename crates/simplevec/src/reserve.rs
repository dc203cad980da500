//! Capacity hint consumed when constructing a sequence.

/// Desired starting capacity for a [`SimpleVector`](crate::SimpleVector).
///
/// ```
/// use simplevec::{reserve, SimpleVector};
///
/// let v: SimpleVector<u8> = SimpleVector::with_reserve(reserve(16));
/// assert_eq!(v.len(), 0);
/// assert_eq!(v.capacity(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReserveHint {
    capacity: usize,
}

impl ReserveHint {
    /// Creates a hint for `capacity` slots.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// The requested capacity.
    #[must_use]
    pub const fn capacity(self) -> usize {
        self.capacity
    }
}

/// Shorthand for [`ReserveHint::new`].
#[must_use]
pub const fn reserve(capacity: usize) -> ReserveHint {
    ReserveHint::new(capacity)
}
