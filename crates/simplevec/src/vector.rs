//! Growable contiguous sequence.
//!
//! [`SimpleVector`] tracks a logical length over an [`ArrayPtr`] whose
//! length is the capacity. Slots `[0, len)` are live; slots
//! `[len, capacity)` are initialized but unused, holding either default
//! values or values left behind by [`SimpleVector::pop_back`],
//! [`SimpleVector::erase`] and [`SimpleVector::clear`].
//!
//! # Growth
//!
//! A push or insert into a full sequence reallocates to
//! `max(1, capacity * 2)` slots. [`SimpleVector::reserve`] and
//! [`SimpleVector::resize`] reallocate to exactly the requested size.
//! Capacity never shrinks.
//!
//! Every reallocation builds the replacement block completely, moves the
//! live elements across, and only then swaps it in. If building the block
//! fails (allocation failure, or a panicking `T::default()`), the sequence
//! is untouched.
//!
//! # Examples
//!
//! ```
//! use simplevec::SimpleVector;
//!
//! let mut v = SimpleVector::new();
//! v.push(1);
//! v.push(2);
//! v.push(3);
//! assert_eq!(v.capacity(), 4);
//!
//! v.insert(1, 99);
//! assert_eq!(v, [1, 99, 2, 3]);
//!
//! v.erase(0);
//! assert_eq!(v, [99, 2, 3]);
//! assert!(v.at(3).is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::{self, SliceIndex};

use simplevec_log::{debug, trace};

use crate::array_ptr::{ArrayPtr, alloc_failure, check_unchecked_index};
use crate::error::{Error, Result};
use crate::reserve::ReserveHint;

/// A growable, contiguous sequence of `T`.
///
/// Operations that may create slots (`push`, `insert`, `resize`, `reserve`,
/// ...) require `T: Default`, since every slot of the backing block holds an
/// initialized value.
pub struct SimpleVector<T> {
    items: ArrayPtr<T>,
    size: usize,
}

/// Capacity after growing a full sequence of `capacity` slots.
fn grown_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Ok(1);
    }
    capacity.checked_mul(2).ok_or(Error::CapacityOverflow {
        requested: capacity.saturating_mul(2),
    })
}

impl<T> SimpleVector<T> {
    /// Creates an empty sequence. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        SimpleVector {
            items: ArrayPtr::new(),
            size: 0,
        }
    }

    /// Creates a sequence of `len` clones of `value`, with capacity `len`.
    ///
    /// ```
    /// use simplevec::SimpleVector;
    ///
    /// let v = SimpleVector::from_elem(3, &"ab");
    /// assert_eq!(v, ["ab", "ab", "ab"]);
    /// assert_eq!(v.capacity(), 3);
    /// ```
    #[must_use]
    pub fn from_elem(len: usize, value: &T) -> Self
    where
        T: Clone,
    {
        SimpleVector {
            items: ArrayPtr::from_fn(len, |_| value.clone()),
            size: len,
        }
    }

    /// Number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Number of allocated slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no live elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items.as_slice()[..self.size]
    }

    /// The live elements as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let size = self.size;
        &mut self.items.as_mut_slice()[..size]
    }

    /// Returns element `index`, or [`Error::OutOfRange`] if `index >= len()`.
    ///
    /// ```
    /// use simplevec::{Error, SimpleVector};
    ///
    /// let v = SimpleVector::from([5, 6]);
    /// assert_eq!(v.at(1), Ok(&6));
    /// assert_eq!(v.at(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice().get(index).ok_or(Error::OutOfRange {
            index,
            len: self.size,
        })
    }

    /// Mutable form of [`SimpleVector::at`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.size;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Returns element `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`SimpleVector::len`].
    #[inline]
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        check_unchecked_index(index, self.size);
        // SAFETY: index < size <= capacity.
        unsafe { self.items.get_unchecked(index) }
    }

    /// Returns element `index` mutably without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`SimpleVector::len`].
    #[inline]
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        check_unchecked_index(index, self.size);
        // SAFETY: index < size <= capacity.
        unsafe { self.items.get_unchecked_mut(index) }
    }

    /// Removes element `index` by shifting everything after it one slot to
    /// the left. Returns the position now holding the successor, which is
    /// `index` itself (equal to `len()` if the last element was erased).
    ///
    /// The erased value is not dropped; it moves to the first unused slot.
    /// Capacity is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> usize {
        assert!(
            index < self.size,
            "erase index (is {index}) should be < len (is {})",
            self.size
        );
        self.items.as_mut_slice()[index..self.size].rotate_left(1);
        self.size -= 1;
        index
    }

    /// Drops the last element from the live range. No-op when empty.
    ///
    /// The value stays in its slot until that slot is reused.
    pub fn pop_back(&mut self) {
        self.size = self.size.saturating_sub(1);
    }

    /// Sets the length to zero. Capacity and slot contents are kept.
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Exchanges contents with `other` in O(1).
    pub fn swap_with(&mut self, other: &mut Self) {
        self.items.swap(&mut other.items);
        mem::swap(&mut self.size, &mut other.size);
    }
}

impl<T: Default> SimpleVector<T> {
    /// Creates a sequence of `len` default values, with capacity `len`.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        SimpleVector {
            items: ArrayPtr::with_len(len),
            size: len,
        }
    }

    /// Creates an empty sequence with the hinted capacity.
    #[must_use]
    pub fn with_reserve(hint: ReserveHint) -> Self {
        SimpleVector {
            items: ArrayPtr::with_len(hint.capacity()),
            size: 0,
        }
    }

    /// Moves the live elements into a fresh block of `new_capacity` slots,
    /// skipping slot `gap` if given, and swaps the block in.
    fn try_relocate(&mut self, new_capacity: usize, gap: Option<usize>) -> Result<()> {
        let mut fresh = ArrayPtr::try_with_len(new_capacity)?;

        let live = &mut self.items.as_mut_slice()[..self.size];
        for (i, slot) in live.iter_mut().enumerate() {
            let dst = match gap {
                Some(gap) if i >= gap => i + 1,
                _ => i,
            };
            mem::swap(slot, &mut fresh[dst]);
        }

        trace!(
            "reallocate {}: capacity {} -> {}, len {}",
            std::any::type_name::<T>(),
            self.items.len(),
            new_capacity,
            self.size
        );
        self.items.swap(&mut fresh);
        Ok(())
    }

    fn relocate(&mut self, new_capacity: usize, gap: Option<usize>) {
        if let Err(err) = self.try_relocate(new_capacity, gap) {
            alloc_failure(err);
        }
    }

    fn grow(&mut self, gap: Option<usize>) {
        match grown_capacity(self.capacity()) {
            Ok(new_capacity) => self.relocate(new_capacity, gap),
            Err(err) => alloc_failure(err),
        }
    }

    /// Appends `value`, doubling the capacity first if the sequence is full.
    ///
    /// # Panics
    ///
    /// Panics if the doubled capacity overflows.
    pub fn push(&mut self, value: T) {
        if self.size == self.capacity() {
            self.grow(None);
        }
        self.items[self.size] = value;
        self.size += 1;
    }

    /// Inserts `value` at `index`, shifting later elements right. Returns the
    /// position of the inserted element.
    ///
    /// ```
    /// use simplevec::SimpleVector;
    ///
    /// let mut v = SimpleVector::from(['a', 'c']);
    /// let at = v.insert(1, 'b');
    /// assert_eq!(v[at], 'b');
    /// assert_eq!(v, ['a', 'b', 'c']);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`, or if the doubled capacity overflows.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        assert!(
            index <= self.size,
            "insertion index (is {index}) should be <= len (is {})",
            self.size
        );

        if self.size == self.capacity() {
            self.grow(Some(index));
            self.items[index] = value;
        } else {
            self.items[self.size] = value;
            self.items.as_mut_slice()[index..=self.size].rotate_right(1);
        }
        self.size += 1;
        index
    }

    /// Removes and returns element `index`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.size,
            "removal index (is {index}) should be < len (is {})",
            self.size
        );
        let value = mem::take(&mut self.items[index]);
        self.erase(index);
        value
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        self.size -= 1;
        Some(mem::take(&mut self.items[self.size]))
    }

    /// Sets the length to `new_len`.
    ///
    /// New elements are default values. Growing past the capacity
    /// reallocates to exactly `new_len` slots. Shrinking resets the dropped
    /// slots to default values so they release whatever they held.
    ///
    /// ```
    /// use simplevec::SimpleVector;
    ///
    /// let mut v = SimpleVector::from([1, 2, 3]);
    /// v.resize(5);
    /// assert_eq!(v, [1, 2, 3, 0, 0]);
    /// assert_eq!(v.capacity(), 5);
    ///
    /// v.resize(1);
    /// assert_eq!(v, [1]);
    /// assert_eq!(v.capacity(), 5);
    /// ```
    pub fn resize(&mut self, new_len: usize) {
        if new_len > self.capacity() {
            self.relocate(new_len, None);
        } else if new_len > self.size {
            // Unused slots may hold stale values.
            self.items.as_mut_slice()[self.size..new_len].fill_with(T::default);
        } else {
            let old_len = mem::replace(&mut self.size, new_len);
            self.items.as_mut_slice()[new_len..old_len].fill_with(T::default);
        }
        self.size = new_len;
    }

    /// Ensures the capacity is at least `new_capacity`, reallocating to
    /// exactly that many slots if it is not. The length is unchanged.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            self.relocate(new_capacity, None);
        }
    }

    /// Fallible form of [`SimpleVector::reserve`].
    ///
    /// # Errors
    ///
    /// [`Error::CapacityOverflow`] or [`Error::AllocFailed`]; the sequence is
    /// unchanged in both cases.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.try_relocate(new_capacity, None).inspect_err(|err| {
            debug!("try_reserve({}) failed: {}", new_capacity, err);
        })
    }
}

impl<T> Default for SimpleVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SimpleVector<T> {
    /// Copies the live elements into a block of exactly `len()` slots.
    fn clone(&self) -> Self {
        let live = self.as_slice();
        SimpleVector {
            items: ArrayPtr::from_fn(live.len(), |i| live[i].clone()),
            size: live.len(),
        }
    }

    /// Builds the full copy first, so a panicking `clone` leaves `self` as it was.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap_with(&mut copy);
    }
}

impl<T> Deref for SimpleVector<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for SimpleVector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for SimpleVector<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &I::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for SimpleVector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: PartialEq> PartialEq for SimpleVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SimpleVector<T> {}

impl<T: PartialEq> PartialEq<[T]> for SimpleVector<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SimpleVector<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for SimpleVector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for SimpleVector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for SimpleVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for SimpleVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for SimpleVector<T> {
    fn from(array: [T; N]) -> Self {
        let mut elements = array.into_iter();
        let items = ArrayPtr::from_fn(N, |_| match elements.next() {
            Some(element) => element,
            None => unreachable!("array iterator yields exactly N elements"),
        });
        SimpleVector { items, size: N }
    }
}

impl<T: Clone> From<&[T]> for SimpleVector<T> {
    fn from(slice: &[T]) -> Self {
        SimpleVector {
            items: ArrayPtr::from_fn(slice.len(), |i| slice[i].clone()),
            size: slice.len(),
        }
    }
}

impl<T: Default> From<ReserveHint> for SimpleVector<T> {
    fn from(hint: ReserveHint) -> Self {
        Self::with_reserve(hint)
    }
}

impl<T: Default> Extend<T> for SimpleVector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Default> FromIterator<T> for SimpleVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = SimpleVector::new();
        v.extend(iter);
        v
    }
}

impl<'a, T> IntoIterator for &'a SimpleVector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SimpleVector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: Default> IntoIterator for SimpleVector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            back: self.size,
            items: self.items,
            front: 0,
        }
    }
}

/// Owning iterator over the live elements of a [`SimpleVector`].
///
/// Holds the buffer; elements not yielded are dropped with it.
pub struct IntoIter<T> {
    items: ArrayPtr<T>,
    front: usize,
    back: usize,
}

impl<T: Default> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = mem::take(&mut self.items[self.front]);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: Default> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(mem::take(&mut self.items[self.back]))
    }
}

impl<T: Default> ExactSizeIterator for IntoIter<T> {}

impl<T: Default> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter")
            .field(&&self.items.as_slice()[self.front..self.back])
            .finish()
    }
}
