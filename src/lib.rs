//! Non-owning, bounds-aware views over contiguous memory.
//!
//! A [`MemView<'a, T>`] is a window over a contiguous run of `T`: a base
//! pointer plus an element count. It never allocates, never copies element
//! data, and never frees anything. It only observes memory that some other
//! owner keeps alive for `'a`.
//!
//! # Why not just `&[T]`?
//!
//! For memory you already hold as a slice, `&[T]` is the right tool and
//! [`MemView::from_slice`] is a trivial wrapper around it. `MemView` earns
//! its keep at the edges where no slice exists yet:
//!
//! - binding to memory known only by a numeric address (memory-mapped
//!   registers, foreign buffers) via [`MemView::from_addr`],
//! - carrying a window described by raw pointers ([`MemView::from_raw_parts`],
//!   [`MemView::from_ptr_range`]) without committing to a slice's validity
//!   rules at construction time,
//! - in-place window surgery ([`remove_prefix`][MemView::remove_prefix],
//!   [`remove_suffix`][MemView::remove_suffix]) with deliberately unchecked,
//!   hot-loop-friendly semantics.
//!
//! Every accessor comes in a checked and an unchecked flavor: [`at`] and
//! [`get`] validate and report, [`get_unchecked`], [`front_unchecked`] and
//! [`back_unchecked`] trust the caller. The split is the point: checked
//! paths for boundary-sensitive code, unchecked paths for loops that have
//! already established their bounds.
//!
//! # Example
//!
//! ```
//! use memview::MemView;
//!
//! let data = [10, 20, 30, 40];
//! let view = MemView::from_slice(&data);
//!
//! assert_eq!(view.len(), 4);
//! assert_eq!(view.at(2), Ok(&30));
//! assert!(view.at(5).is_err());
//!
//! // Sub-views share the same storage.
//! let mid = view.view(1, Some(2)).unwrap();
//! assert_eq!(mid.as_slice(), &[20, 30]);
//! ```
//!
//! # Gotchas
//!
//! - **`remove_prefix` does not shrink the length.** It only advances the
//!   base. Pair it with [`remove_suffix`][MemView::remove_suffix] (or
//!   reslice with [`view`][MemView::view]) to keep the window consistent.
//! - **`remove_suffix` past the end wraps.** Trimming more elements than
//!   the view holds wraps the unsigned length; the view then reports a huge
//!   size and must not be used for element access.
//! - **`view` rejects `pos == len()`.** A zero-length tail cannot be
//!   obtained through `view`; even an empty view rejects every position.
//!   This boundary is part of the contract and is kept as-is.
//! - **No lifetime bookkeeping.** Iterators and references obtained from a
//!   view are only as valid as the backing storage; the safe constructors
//!   let the borrow checker enforce that, the unsafe ones leave it to you.
//!
//! # Failure policy
//!
//! [`at`] and [`view`] are the only fallible operations; both report
//! [`OutOfRange`]. With the `panic-on-oob` cargo feature the same condition
//! panics instead of returning, for targets where unwinding is compiled out
//! and a structured error has nowhere to go. The signatures do not change;
//! the `Err` arm simply becomes unreachable.
//!
//! [`at`]: MemView::at
//! [`get`]: MemView::get
//! [`get_unchecked`]: MemView::get_unchecked
//! [`front_unchecked`]: MemView::front_unchecked
//! [`back_unchecked`]: MemView::back_unchecked

#![no_std]
#![allow(unsafe_code)]

use core::cmp::{self, Ordering};
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use core::slice;

use thiserror::Error;

/// Index or position past the end of a view.
///
/// Produced by [`MemView::at`] and [`MemView::view`]; `what` names the
/// rejecting operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("memview::{what}: position {pos} out of range for view of length {len}")]
pub struct OutOfRange {
    /// Operation that rejected the position (`"at"` or `"view"`).
    pub what: &'static str,
    /// The offending index or position.
    pub pos: usize,
    /// Length of the view at the time of the call.
    pub len: usize,
}

#[cold]
#[inline(never)]
fn out_of_range(what: &'static str, pos: usize, len: usize) -> OutOfRange {
    #[cfg(feature = "panic-on-oob")]
    {
        panic!("memview::{what}: position {pos} out of range for view of length {len}")
    }
    #[cfg(not(feature = "panic-on-oob"))]
    {
        OutOfRange { what, pos, len }
    }
}

/// A non-owning window over a contiguous run of `T`.
///
/// Two words: base pointer and element count. Copying a view copies the
/// window, never the elements. See [crate-level docs](crate) for the full
/// contract.
pub struct MemView<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    phantom: PhantomData<&'a T>,
}

static_assertions::assert_eq_size!(MemView<u8>, [usize; 2]);
static_assertions::assert_eq_size!(MemView<[u64; 8]>, [usize; 2]);

impl<'a, T> MemView<'a, T> {
    /// Returns the empty view: dangling base, zero length.
    ///
    /// No element access is valid on it, checked entry points reject every
    /// position.
    pub const fn empty() -> Self {
        MemView {
            ptr: NonNull::dangling(),
            len: 0,
            phantom: PhantomData,
        }
    }

    /// Creates a view over an existing slice.
    ///
    /// # Example
    ///
    /// ```
    /// use memview::MemView;
    ///
    /// let data = [1u8, 2, 3];
    /// let view = MemView::from_slice(&data);
    /// assert_eq!(view.len(), 3);
    /// ```
    pub const fn from_slice(slice: &'a [T]) -> Self {
        // SAFETY: a live slice reference is non-null and spans `len` elements.
        let ptr = unsafe { NonNull::new_unchecked(slice.as_ptr() as *mut T) };
        MemView {
            ptr,
            len: slice.len(),
            phantom: PhantomData,
        }
    }

    /// Creates a view over a fixed-size array; the length is the array's.
    pub const fn from_array<const N: usize>(array: &'a [T; N]) -> Self {
        Self::from_slice(array)
    }

    /// Creates a view from a base pointer and an element count.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null, aligned, and point to `len` initialized
    /// elements of `T` that stay valid for `'a`. The caller picks `'a`;
    /// nothing ties it to the allocation.
    pub const unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        MemView {
            // SAFETY: non-null per the caller contract.
            ptr: unsafe { NonNull::new_unchecked(ptr as *mut T) },
            len,
            phantom: PhantomData,
        }
    }

    /// Creates a view from a `[start, end)` pointer pair.
    ///
    /// The element count is `end - start`.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw_parts`][Self::from_raw_parts], and both
    /// pointers must be derived from the same allocation with
    /// `end >= start`.
    pub unsafe fn from_ptr_range(start: *const T, end: *const T) -> Self {
        debug_assert!(end >= start);
        // SAFETY: same allocation and end >= start per the caller contract.
        let len = unsafe { end.offset_from(start) } as usize;
        // SAFETY: forwarded contract.
        unsafe { Self::from_raw_parts(start, len) }
    }

    /// Creates a view from a raw integer address and an element count.
    ///
    /// The escape hatch for memory described only by a number: mapped
    /// device regions, addresses handed over by foreign code. The address
    /// is reinterpreted as a `*const T` with no validation of any kind.
    ///
    /// # Safety
    ///
    /// `addr` must be non-zero, aligned for `T`, and the start of `len`
    /// initialized elements valid for `'a`. Alignment, provenance, and
    /// lifetime are entirely on the caller.
    pub unsafe fn from_addr(addr: usize, len: usize) -> Self {
        // SAFETY: forwarded contract.
        unsafe { Self::from_raw_parts(addr as *const T, len) }
    }

    /// Number of elements in the window.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the window holds zero elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum representable element count: a static ceiling on the size
    /// type, unrelated to any real buffer.
    pub const fn max_len(&self) -> usize {
        usize::MAX
    }

    /// Raw base pointer, read side.
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Raw base pointer, write side.
    ///
    /// The view does no bookkeeping: writing through the returned pointer
    /// requires the backing memory to be writable and not aliased by
    /// anything assuming it constant. That discipline is the caller's.
    pub const fn as_mut_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// The whole window as a slice.
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: [ptr, ptr + len) is a valid run of T for 'a; the empty
        // view uses a dangling but aligned non-null base, which
        // from_raw_parts permits for len == 0.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Checked element access.
    ///
    /// # Example
    ///
    /// ```
    /// use memview::MemView;
    ///
    /// let data = [1, 2, 3];
    /// let view = MemView::from_slice(&data);
    /// assert_eq!(view.at(1), Ok(&2));
    /// assert_eq!(view.at(3).unwrap_err().pos, 3);
    /// ```
    pub fn at(&self, index: usize) -> Result<&'a T, OutOfRange> {
        if index >= self.len {
            return Err(out_of_range("at", index, self.len));
        }
        // SAFETY: index < len.
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Checked element access, `Option` flavor.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        if index < self.len {
            // SAFETY: index < len.
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    /// Unchecked element access.
    ///
    /// # Safety
    ///
    /// `index < self.len()`, and the view's window must be intact (not
    /// poisoned by an over-trimmed [`remove_suffix`][Self::remove_suffix]).
    pub unsafe fn get_unchecked(&self, index: usize) -> &'a T {
        // SAFETY: in-bounds per the caller contract.
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// First element, or `None` on the empty view.
    pub fn first(&self) -> Option<&'a T> {
        self.get(0)
    }

    /// Last element, or `None` on the empty view.
    pub fn last(&self) -> Option<&'a T> {
        match self.len.checked_sub(1) {
            Some(i) => self.get(i),
            None => None,
        }
    }

    /// Unchecked first element.
    ///
    /// # Safety
    ///
    /// The view must be non-empty with an intact window.
    pub unsafe fn front_unchecked(&self) -> &'a T {
        // SAFETY: non-empty per the caller contract.
        unsafe { &*self.ptr.as_ptr() }
    }

    /// Unchecked last element.
    ///
    /// # Safety
    ///
    /// The view must be non-empty with an intact window.
    pub unsafe fn back_unchecked(&self) -> &'a T {
        // SAFETY: non-empty per the caller contract.
        unsafe { &*self.ptr.as_ptr().add(self.len - 1) }
    }

    /// Advances the base by `n` elements. Unchecked.
    ///
    /// The length is deliberately left untouched: trimming the front makes
    /// the window hang `n` elements past its old end until a paired
    /// [`remove_suffix`][Self::remove_suffix] or a reslice via
    /// [`view`][Self::view] restores consistency. The pointer arithmetic
    /// itself wraps rather than faulting, so the trim alone is always
    /// defined.
    ///
    /// # Safety
    ///
    /// Element access after the trim requires the new base to be non-null
    /// and every accessed element to lie in the original allocation. A view
    /// trimmed past its buffer may only be inspected for size or trimmed
    /// further, never dereferenced.
    pub unsafe fn remove_prefix(&mut self, n: usize) {
        // SAFETY: wrapping_add cannot produce null here per the caller
        // contract (any base from which elements are later read is in
        // bounds, and in-bounds pointers are non-null).
        self.ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().wrapping_add(n)) };
    }

    /// Shrinks the length by `n` elements. Unchecked.
    ///
    /// ```
    /// use memview::MemView;
    ///
    /// let data = [1, 2, 3];
    /// let mut view = MemView::from_slice(&data);
    /// unsafe { view.remove_suffix(3) };
    /// assert!(view.is_empty());
    /// ```
    ///
    /// # Safety
    ///
    /// If `n > self.len()` the unsigned length wraps and the view reports a
    /// huge size; such a poisoned view must not be used for element access
    /// (including `as_slice`, iteration, and comparison). Inspecting its
    /// size remains fine.
    pub unsafe fn remove_suffix(&mut self, n: usize) {
        self.len = self.len.wrapping_sub(n);
    }

    /// Derived sub-window starting at `pos`, `count` elements long.
    ///
    /// `None` for `count` means "to the end"; an explicit count is clamped
    /// to the elements actually available. Fails when `pos >= len()`,
    /// including `pos == len()`, so a zero-length tail is not obtainable
    /// here and the empty view rejects every position.
    ///
    /// # Example
    ///
    /// ```
    /// use memview::MemView;
    ///
    /// let data = [10, 20, 30, 40];
    /// let view = MemView::from_slice(&data);
    ///
    /// assert_eq!(view.view(1, Some(2)).unwrap().as_slice(), &[20, 30]);
    /// assert_eq!(view.view(2, None).unwrap().as_slice(), &[30, 40]);
    /// assert!(view.view(4, None).is_err());
    /// ```
    pub fn view(&self, pos: usize, count: Option<usize>) -> Result<Self, OutOfRange> {
        if pos >= self.len {
            return Err(out_of_range("view", pos, self.len));
        }
        let tail = self.len - pos;
        let len = match count {
            Some(count) => cmp::min(count, tail),
            None => tail,
        };
        // SAFETY: pos < self.len and len <= self.len - pos, so the new
        // window stays inside this one.
        Ok(unsafe { Self::from_raw_parts(self.ptr.as_ptr().add(pos), len) })
    }

    /// Exchanges the windows of two views. O(1), cannot fail.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns the view and rebinds `self` to the empty view.
    ///
    /// The destructive-move aid: nothing is freed (the view owns nothing),
    /// but a taken-from view visibly reports length 0 instead of silently
    /// aliasing its old window.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Forward iterator over the window, a plain pointer-pair cursor.
    ///
    /// Reverse traversal is `iter().rev()`. The yielded references live for
    /// `'a`, not just for the borrow of the view.
    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<T> Clone for MemView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for MemView<'_, T> {}

impl<T> Default for MemView<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T> From<&'a [T]> for MemView<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for MemView<'a, T> {
    fn from(array: &'a [T; N]) -> Self {
        Self::from_array(array)
    }
}

impl<T: fmt::Debug> fmt::Debug for MemView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

// Comparisons are element-wise over the windows, never over the base
// pointers: equal content at different addresses compares equal. The slice
// impls provide exactly the required semantics, a size check plus
// short-circuiting element scan for equality and lexicographic order with
// shorter-is-less on a shared prefix.

impl<'b, T: PartialEq> PartialEq<MemView<'b, T>> for MemView<'_, T> {
    fn eq(&self, other: &MemView<'b, T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq> Eq for MemView<'_, T> {}

impl<'b, T: PartialOrd> PartialOrd<MemView<'b, T>> for MemView<'_, T> {
    fn partial_cmp(&self, other: &MemView<'b, T>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}
impl<T: Ord> Ord for MemView<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<'a, T> IntoIterator for MemView<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &MemView<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> AsRef<[T]> for MemView<'_, T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

// SAFETY: a view only hands out shared references into the backing run, so
// sending or sharing it across threads is reading T from several threads.
unsafe impl<T: Sync> Send for MemView<'_, T> {}
unsafe impl<T: Sync> Sync for MemView<'_, T> {}
