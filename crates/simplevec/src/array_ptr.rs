//! Sole-owner handle over one contiguous heap block.
//!
//! [`ArrayPtr`] is the storage layer beneath
//! [`SimpleVector`](crate::SimpleVector). It owns a block of `len` fully
//! initialized elements obtained straight from the global allocator, and it
//! knows nothing about logical length: every slot is live as far as the
//! handle is concerned.
//!
//! # Ownership
//!
//! - An `ArrayPtr` is neither `Clone` nor `Copy`, so two handles can never
//!   own the same block.
//! - Moving the handle (or [`std::mem::take`]) transfers the block.
//! - [`ArrayPtr::release`] hands the raw block to the caller and leaves the
//!   handle empty; [`ArrayPtr::from_raw_parts`] adopts it back.
//! - Dropping the handle drops every element and frees the block.
//!
//! # Examples
//!
//! ```
//! use simplevec::ArrayPtr;
//!
//! let mut a: ArrayPtr<u32> = ArrayPtr::with_len(4);
//! assert!(a.is_allocated());
//! a[2] = 7;
//! assert_eq!(a.as_slice(), &[0, 0, 7, 0]);
//!
//! let mut b = ArrayPtr::new();
//! b.swap(&mut a);
//! assert!(a.is_null());
//! assert_eq!(b.len(), 4);
//! ```

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice::{self, SliceIndex};

use simplevec_log::trace;

use crate::error::{Error, Result};

/// Sole-ownership handle over a heap block of initialized `T`s.
pub struct ArrayPtr<T> {
    /// Start of the block, `None` when nothing is owned.
    ptr: Option<NonNull<T>>,
    /// Number of initialized elements in the block.
    len: usize,
    _owns: PhantomData<T>,
}

// SAFETY: `ArrayPtr<T>` uniquely owns its elements, exactly like `Box<[T]>`.
unsafe impl<T: Send> Send for ArrayPtr<T> {}
unsafe impl<T: Sync> Sync for ArrayPtr<T> {}

/// Reports a failed infallible allocation. Never returns.
#[cold]
#[inline(never)]
pub(crate) fn alloc_failure(err: Error) -> ! {
    if let Error::AllocFailed { bytes, align } = err
        && let Ok(layout) = Layout::from_size_align(bytes, align)
    {
        alloc::handle_alloc_error(layout);
    }
    panic!("{err}")
}

/// A block that is being filled. Drops what was written and frees the block
/// if filling unwinds.
struct PartialBlock<T> {
    ptr: NonNull<T>,
    capacity: usize,
    initialized: usize,
}

impl<T> Drop for PartialBlock<T> {
    fn drop(&mut self) {
        let _free = FreeOnDrop {
            ptr: self.ptr,
            len: self.capacity,
        };
        // SAFETY: the first `initialized` slots were written. `_free` releases
        // the block afterwards, even if one of these drops panics.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr(),
                self.initialized,
            ));
        }
    }
}

/// Frees a block when dropped. Elements are not touched.
///
/// Created before the elements are dropped so that a panicking element
/// destructor still releases the block.
struct FreeOnDrop<T> {
    ptr: NonNull<T>,
    len: usize,
}

impl<T> Drop for FreeOnDrop<T> {
    fn drop(&mut self) {
        // SAFETY: constructed only over a block from `allocate::<T>(len)`
        // that nothing else will free.
        unsafe { deallocate(self.ptr, self.len) };
    }
}

/// Allocates uninitialized room for `len` elements. `len` must be nonzero.
fn allocate<T>(len: usize) -> Result<NonNull<T>> {
    let layout =
        Layout::array::<T>(len).map_err(|_| Error::CapacityOverflow { requested: len })?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }

    // SAFETY: the layout has a nonzero size.
    let raw = unsafe { alloc::alloc(layout) };
    NonNull::new(raw.cast::<T>()).ok_or(Error::AllocFailed {
        bytes: layout.size(),
        align: layout.align(),
    })
}

/// Frees a block obtained from [`allocate`] with the same `len`.
///
/// # Safety
///
/// `ptr` must come from `allocate::<T>(len)` and must not be used afterwards.
/// Elements are not dropped.
unsafe fn deallocate<T>(ptr: NonNull<T>, len: usize) {
    if let Ok(layout) = Layout::array::<T>(len)
        && layout.size() != 0
    {
        // SAFETY: guaranteed by the caller.
        unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
    }
}

impl<T> ArrayPtr<T> {
    /// Creates a handle that owns nothing.
    #[must_use]
    pub const fn new() -> Self {
        ArrayPtr {
            ptr: None,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Allocates a block of `len` elements, building element `i` with `f(i)`.
    ///
    /// `len == 0` owns nothing. If `f` panics, the elements built so far are
    /// dropped and the block is freed before the panic continues.
    ///
    /// # Errors
    ///
    /// [`Error::CapacityOverflow`] if `len` elements exceed `isize::MAX`
    /// bytes, [`Error::AllocFailed`] if the allocator returns null.
    pub fn try_from_fn(len: usize, mut f: impl FnMut(usize) -> T) -> Result<Self> {
        if len == 0 {
            return Ok(Self::new());
        }

        let ptr = allocate::<T>(len)?;
        trace!(
            "allocated block of {} x {}",
            len,
            std::any::type_name::<T>()
        );

        let mut block = PartialBlock {
            ptr,
            capacity: len,
            initialized: 0,
        };
        while block.initialized < len {
            let value = f(block.initialized);
            // SAFETY: `initialized < capacity`, and the slot is unwritten.
            unsafe { block.ptr.as_ptr().add(block.initialized).write(value) };
            block.initialized += 1;
        }
        mem::forget(block);

        Ok(ArrayPtr {
            ptr: Some(ptr),
            len,
            _owns: PhantomData,
        })
    }

    /// Infallible form of [`ArrayPtr::try_from_fn`].
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow. Allocation failure goes through
    /// [`std::alloc::handle_alloc_error`].
    #[must_use]
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self::try_from_fn(len, f).unwrap_or_else(|err| alloc_failure(err))
    }

    /// Adopts a block previously handed out by [`ArrayPtr::release`].
    ///
    /// A `len` of zero yields an empty handle and `ptr` is ignored.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a block allocated by this module for exactly
    /// `len` elements, all of them initialized, and no other owner may use
    /// or free it afterwards.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, len: usize) -> Self {
        ArrayPtr {
            ptr: (len != 0).then_some(ptr),
            len,
            _owns: PhantomData,
        }
    }

    /// Gives up ownership of the block.
    ///
    /// Returns the start pointer and element count, or `None` if nothing was
    /// owned. The handle is empty afterwards and will not free the block;
    /// the caller must pass it back to [`ArrayPtr::from_raw_parts`] or leak it.
    #[must_use = "the released block leaks unless it is adopted again"]
    pub fn release(&mut self) -> Option<(NonNull<T>, usize)> {
        let ptr = self.ptr.take()?;
        let len = mem::replace(&mut self.len, 0);
        trace!("released block of {} x {}", len, std::any::type_name::<T>());
        Some((ptr, len))
    }

    /// Exchanges blocks with `other` without touching any element.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns true if a block is owned.
    #[inline]
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Returns true if no block is owned.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Number of elements in the block.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the block holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start of the block, or a dangling pointer when nothing is owned.
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Mutable start of the block, or a dangling pointer when nothing is owned.
    #[inline]
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// The whole block as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: all `len` slots are initialized; a dangling pointer is
        // valid for an empty slice.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// The whole block as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Reference to slot `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`ArrayPtr::len`].
    #[inline]
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        check_unchecked_index(index, self.len);
        // SAFETY: guaranteed by the caller.
        unsafe { &*self.as_ptr().add(index) }
    }

    /// Mutable reference to slot `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`ArrayPtr::len`].
    #[inline]
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        check_unchecked_index(index, self.len);
        // SAFETY: guaranteed by the caller.
        unsafe { &mut *self.as_mut_ptr().add(index) }
    }
}

impl<T: Default> ArrayPtr<T> {
    /// Allocates a block of `len` default values. `len == 0` owns nothing.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow. Allocation failure goes through
    /// [`std::alloc::handle_alloc_error`].
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self::from_fn(len, |_| T::default())
    }

    /// Fallible form of [`ArrayPtr::with_len`].
    ///
    /// # Errors
    ///
    /// See [`ArrayPtr::try_from_fn`].
    pub fn try_with_len(len: usize) -> Result<Self> {
        Self::try_from_fn(len, |_| T::default())
    }
}

/// Bounds check for the unchecked accessors: debug builds always, release
/// builds only with the `strict-bounds` feature.
#[inline(always)]
#[track_caller]
pub(crate) fn check_unchecked_index(index: usize, len: usize) {
    if cfg!(feature = "strict-bounds") {
        assert!(index < len, "unchecked index {index} out of bounds for length {len}");
    } else {
        debug_assert!(index < len, "unchecked index {index} out of bounds for length {len}");
    }
}

impl<T> Drop for ArrayPtr<T> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr {
            let _free = FreeOnDrop { ptr, len: self.len };
            // SAFETY: the block holds `len` initialized elements and nothing
            // else owns it.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), self.len));
            }
        }
    }
}

impl<T> Default for ArrayPtr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for ArrayPtr<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &I::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for ArrayPtr<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
