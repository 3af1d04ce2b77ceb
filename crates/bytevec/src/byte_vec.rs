//! The raw byte engine: one owned allocation, a logical size and a capacity.
//!
//! Every byte in `[0, capacity)` is initialized memory at all times. Fresh
//! memory receives the configured fill byte, or zero when no fill byte is set,
//! so exposing it through [`ByteVec::resize`] never reads uninitialized memory.
//! Its value is still unspecified from the caller's point of view.

use alloc::alloc::{self as heap, Layout, handle_alloc_error};
use core::{
    borrow::{Borrow, BorrowMut},
    fmt, hash,
    ops::{Deref, DerefMut, Range},
    ptr::{self, NonNull},
    slice,
};

use bstr::ByteSlice;

use crate::{
    error::{FatalError, fatal},
    options::ByteVecOptions,
};

/// A growable, contiguous byte buffer owning a single heap allocation.
///
/// Capacity starts at zero (no allocation), jumps to
/// [`ByteVecOptions::default_capacity`] on first growth and doubles from then
/// on. It only shrinks on request ([`ByteVec::shrink_to_fit`],
/// [`ByteVec::clear_and_free`]).
///
/// Equality and hashing look at the stored bytes only.
pub struct ByteVec {
    ptr: Option<NonNull<u8>>,
    len: usize,
    cap: usize,
    options: ByteVecOptions,
}

// SAFETY: `ByteVec` uniquely owns its allocation, exactly like `Vec<u8>`.
unsafe impl Send for ByteVec {}
// SAFETY: shared access only hands out `&[u8]`.
unsafe impl Sync for ByteVec {}

impl ByteVec {
    /// Alignment of every allocation.
    ///
    /// Large enough for any [`Element`](crate::Element), which is what lets the
    /// typed view hand out references into the buffer.
    pub const ALIGN: usize = 16;

    /// Creates an empty buffer without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_options(ByteVecOptions::new())
    }

    /// Creates an empty buffer with custom options, without allocating.
    #[must_use]
    pub const fn with_options(options: ByteVecOptions) -> Self {
        Self {
            ptr: None,
            len: 0,
            cap: 0,
            options,
        }
    }

    /// Creates a buffer holding a copy of `data`.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut v = Self::new();
        v.extend_from_slice(data);
        v
    }

    /// Creates an independent copy of `src`, including its options.
    #[must_use]
    pub fn from_byte_vec(src: &ByteVec) -> Self {
        let mut v = Self::with_options(src.options);
        v.extend_from_slice(src.as_slice());
        v
    }

    /// The options this buffer was created with.
    #[must_use]
    pub fn options(&self) -> &ByteVecOptions {
        &self.options
    }

    /// Logical size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Allocated size in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether the logical size is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes in use.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self.ptr {
            // SAFETY: `[0, len)` lies inside the allocation and is initialized.
            Some(p) => unsafe { slice::from_raw_parts(p.as_ptr(), self.len) },
            None => &[],
        }
    }

    /// The bytes in use, mutably.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self.ptr {
            // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
            Some(p) => unsafe { slice::from_raw_parts_mut(p.as_ptr(), self.len) },
            None => &mut [],
        }
    }

    /// Start of the allocation, or null when nothing is allocated.
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.map_or(ptr::null(), |p| p.as_ptr().cast_const())
    }

    /// Mutable start of the allocation, or null when nothing is allocated.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Drops all bytes but keeps the allocation.
    pub fn clear(&mut self) {
        self.len = 0;
        self.fill(0..self.cap);
    }

    /// Drops all bytes and releases the allocation.
    pub fn clear_and_free(&mut self) {
        self.release();
    }

    /// Replaces the content with an independent copy of `src`.
    ///
    /// The current allocation is released first; `src` is not modified.
    pub fn copy_from(&mut self, src: &ByteVec) {
        self.release();
        self.options = src.options;
        self.extend_from_slice(src.as_slice());
    }

    /// Takes over the allocation of `src`, leaving `src` empty.
    ///
    /// `src` keeps its options. The previous content of `self` is released.
    pub fn move_from(&mut self, src: &mut ByteVec) {
        let reset = ByteVec::with_options(src.options);
        *self = core::mem::replace(src, reset);
    }

    /// Exchanges the contents of two buffers without copying bytes.
    pub fn swap(&mut self, other: &mut ByteVec) {
        core::mem::swap(self, other);
    }

    /// [`copy_from`](Self::copy_from) for callers holding raw pointers.
    ///
    /// Copying a buffer onto itself is a no-op.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for reads and writes and `src` valid for reads. They
    /// may be equal, but must not otherwise overlap.
    pub unsafe fn copy_raw(dst: *mut ByteVec, src: *const ByteVec) {
        if ptr::eq(dst, src) {
            return;
        }
        // SAFETY: distinct, valid pointers per the contract above.
        unsafe { (*dst).copy_from(&*src) }
    }

    /// [`move_from`](Self::move_from) for callers holding raw pointers.
    ///
    /// Moving a buffer onto itself is a no-op.
    ///
    /// # Safety
    ///
    /// Both pointers must be valid for reads and writes. They may be equal, but
    /// must not otherwise overlap.
    pub unsafe fn move_raw(dst: *mut ByteVec, src: *mut ByteVec) {
        if ptr::eq(dst, src) {
            return;
        }
        // SAFETY: distinct, valid pointers per the contract above.
        unsafe { (*dst).move_from(&mut *src) }
    }

    /// [`swap`](Self::swap) for callers holding raw pointers.
    ///
    /// Swapping a buffer with itself is a no-op.
    ///
    /// # Safety
    ///
    /// Both pointers must be valid for reads and writes. They may be equal, but
    /// must not otherwise overlap.
    pub unsafe fn swap_raw(a: *mut ByteVec, b: *mut ByteVec) {
        // SAFETY: `ptr::swap` allows `a == b`; validity is on the caller.
        unsafe { ptr::swap(a, b) }
    }

    /// Ensures the capacity is at least `min_bytes`; the size is unchanged.
    ///
    /// An unallocated buffer starts from the default capacity. The capacity
    /// then doubles until it is large enough.
    ///
    /// # Panics
    ///
    /// Panics if doubling overflows `usize` or the capacity exceeds the
    /// allocation limit.
    pub fn reserve(&mut self, min_bytes: usize) {
        if min_bytes <= self.cap {
            return;
        }

        let mut capacity = if self.cap == 0 {
            self.options.first_capacity()
        } else {
            self.cap
        };
        while capacity < min_bytes {
            capacity = capacity
                .checked_mul(2)
                .unwrap_or_else(|| fatal(FatalError::Overflow));
        }

        self.reallocate(capacity);
    }

    /// Sets the logical size to `new_len` bytes.
    ///
    /// Growing exposes bytes whose values are unspecified. Shrinking keeps the
    /// capacity.
    ///
    /// # Panics
    ///
    /// Panics if growing needs a capacity that cannot be reached.
    pub fn resize(&mut self, new_len: usize) {
        if new_len > self.len {
            self.reserve(new_len);
            self.fill(self.len..new_len);
        }
        self.len = new_len;
    }

    /// Halves the capacity while it is at least twice the size.
    ///
    /// Afterwards `capacity() < 2 * len()`, or nothing is allocated when the
    /// buffer is empty.
    pub fn shrink_to_fit(&mut self) {
        let mut capacity = self.cap;
        while capacity != 0 && capacity / 2 >= self.len {
            capacity /= 2;
        }
        self.reallocate(capacity);
    }

    /// Appends a copy of `data`.
    ///
    /// # Panics
    ///
    /// Panics if the new size overflows `usize`.
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        let old_len = self.len;
        let new_len = old_len
            .checked_add(data.len())
            .unwrap_or_else(|| fatal(FatalError::Overflow));
        self.reserve(new_len);

        // SAFETY: `reserve` made `[old_len, new_len)` part of the allocation, and
        // `data` cannot overlap it because `&mut self` is unique.
        unsafe {
            let dst = self.as_mut_ptr().add(old_len);
            ptr::copy_nonoverlapping(data.as_ptr(), dst, data.len());
        }
        self.len = new_len;
    }

    /// Appends the bytes of another buffer.
    pub fn extend_from_byte_vec(&mut self, src: &ByteVec) {
        self.extend_from_slice(src.as_slice());
    }

    /// Removes `count` bytes from the end.
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds the size.
    pub fn truncate_by(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.len = self
            .len
            .checked_sub(count)
            .unwrap_or_else(|| fatal(FatalError::Underflow));
    }

    /// Checks the structural invariants, panicking on violation.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn assert_invariants(&self) {
        assert!(self.len <= self.cap, "size {} > capacity {}", self.len, self.cap);
        assert_eq!(
            self.ptr.is_none(),
            self.cap == 0,
            "allocation present iff capacity is non-zero"
        );
        if let Some(p) = self.ptr {
            assert_eq!(p.as_ptr() as usize % Self::ALIGN, 0, "misaligned allocation");
        }
    }

    fn layout(capacity: usize) -> Layout {
        Layout::from_size_align(capacity, Self::ALIGN)
            .unwrap_or_else(|_| fatal(FatalError::CapacityLayout(capacity)))
    }

    /// Writes the fill byte over `range`, if one is configured.
    fn fill(&mut self, range: Range<usize>) {
        debug_assert!(range.start <= range.end && range.end <= self.cap);
        if let (Some(byte), Some(p)) = (self.options.fill_byte, self.ptr) {
            // SAFETY: `range` lies inside the allocation.
            unsafe { ptr::write_bytes(p.as_ptr().add(range.start), byte, range.len()) }
        }
    }

    fn release(&mut self) {
        self.fill(0..self.cap);
        if let Some(p) = self.ptr.take() {
            // SAFETY: `p` was allocated with exactly this layout.
            unsafe { heap::dealloc(p.as_ptr(), Self::layout(self.cap)) }
        }
        self.len = 0;
        self.cap = 0;
    }

    /// Moves the first `len` bytes into an allocation of exactly `capacity`
    /// bytes. A capacity of zero frees the allocation.
    fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        if capacity == self.cap {
            return;
        }
        if capacity == 0 {
            self.release();
            return;
        }

        tracing::trace!(
            from = self.cap,
            to = capacity,
            len = self.len,
            "reallocating byte vector"
        );

        let layout = Self::layout(capacity);
        let raw = match self.ptr {
            // SAFETY: `layout` has a non-zero size.
            None => unsafe { heap::alloc(layout) },
            // SAFETY: `p` was allocated with `layout(self.cap)`; the new size
            // was validated by `Self::layout` above.
            Some(p) => unsafe { heap::realloc(p.as_ptr(), Self::layout(self.cap), capacity) },
        };
        let Some(p) = NonNull::new(raw) else {
            handle_alloc_error(layout)
        };

        // Bytes past the old capacity are uninitialized; with a fill byte the
        // whole unused tail is overwritten.
        let fill = self.options.fill_byte;
        let fresh = if fill.is_some() {
            self.len
        } else {
            self.cap.min(capacity)
        };
        // SAFETY: `[fresh, capacity)` lies inside the new allocation.
        unsafe { ptr::write_bytes(p.as_ptr().add(fresh), fill.unwrap_or(0), capacity - fresh) }

        self.ptr = Some(p);
        self.cap = capacity;
    }
}

impl Drop for ByteVec {
    fn drop(&mut self) {
        self.release();
    }
}

impl Default for ByteVec {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ByteVec {
    fn clone(&self) -> Self {
        Self::from_byte_vec(self)
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}

impl Deref for ByteVec {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for ByteVec {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl AsRef<[u8]> for ByteVec {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for ByteVec {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl Borrow<[u8]> for ByteVec {
    fn borrow(&self) -> &[u8] {
        self.as_slice()
    }
}

impl BorrowMut<[u8]> for ByteVec {
    fn borrow_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl From<&[u8]> for ByteVec {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data)
    }
}

impl<const N: usize> From<&[u8; N]> for ByteVec {
    fn from(data: &[u8; N]) -> Self {
        Self::from_bytes(data)
    }
}

impl<'a> Extend<&'a u8> for ByteVec {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        for byte in iter {
            self.extend_from_slice(slice::from_ref(byte));
        }
    }
}

impl PartialEq for ByteVec {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteVec {}

impl PartialEq<[u8]> for ByteVec {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl hash::Hash for ByteVec {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for ByteVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteVec")
            .field("data", &self.as_slice().as_bstr())
            .field("capacity", &self.cap)
            .finish()
    }
}
