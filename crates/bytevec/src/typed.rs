//! Reinterpreting a buffer's bytes as an array of [`Element`]s.
//!
//! All typed operations assume the byte size is a multiple of the element
//! size. Mixing element types on one buffer is allowed as long as every view
//! respects that; a mismatch is caught by `debug_assert!` only.

use core::{
    marker::PhantomData,
    ops::{Index, IndexMut},
    ptr, slice,
};

use crate::{
    ByteVec,
    element::{Element, bytes_of, element_size},
    error::{FatalError, fatal},
};

/// A mutable view of a [`ByteVec`] as a growable array of `T`.
///
/// ```rust
/// use bytevec::ByteVec;
///
/// let mut v = ByteVec::new();
/// let mut words = v.typed::<u32>();
/// words.push(7);
/// words.extend_from_slice(&[8, 9]);
/// assert_eq!(words.len(), 3);
/// assert_eq!(words[1], 8);
/// assert_eq!(words.pop(), 9);
/// assert_eq!(v.len(), 8);
/// ```
pub struct Typed<'a, T: Element> {
    bytes: &'a mut ByteVec,
    _element: PhantomData<T>,
}

impl<T: Element> Typed<'_, T> {
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        elements_in::<T>(self.bytes)
    }

    /// Whether the view holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        as_elements(self.bytes)
    }

    /// The elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        if len == 0 {
            return &mut [];
        }
        // SAFETY: the allocation is aligned for `T` and holds `len` initialized
        // elements; any bit pattern is a valid `T`.
        unsafe { slice::from_raw_parts_mut(self.bytes.as_mut_ptr().cast::<T>(), len) }
    }

    /// Element at `index`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index`, or `None` when out of bounds.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len(), "index {index} out of bounds");
        // SAFETY: in bounds per the caller; alignment as in `as_mut_slice`.
        unsafe { &*self.bytes.as_ptr().cast::<T>().add(index) }
    }

    /// Mutable element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len(), "index {index} out of bounds");
        // SAFETY: as in `get_unchecked`.
        unsafe { &mut *self.bytes.as_mut_ptr().cast::<T>().add(index) }
    }

    /// First element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Last element, mutably.
    #[must_use]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Appends one element.
    pub fn push(&mut self, value: T) {
        self.bytes.extend_from_slice(bytes_of(slice::from_ref(&value)));
    }

    /// Appends a slice of elements.
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.bytes.extend_from_slice(bytes_of(values));
    }

    /// Removes and returns the last element.
    ///
    /// # Panics
    ///
    /// Panics if the buffer holds fewer bytes than one element.
    pub fn pop(&mut self) -> T {
        pop_element(self.bytes)
    }

    /// Sets the number of elements; new elements have unspecified values.
    ///
    /// # Panics
    ///
    /// Panics if the byte size overflows `usize`.
    pub fn resize(&mut self, count: usize) {
        self.bytes.resize(byte_len::<T>(count));
    }
}

impl<T: Element> Index<usize> for Typed<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Element> IndexMut<usize> for Typed<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

fn elements_in<T: Element>(bytes: &ByteVec) -> usize {
    let size = element_size::<T>();
    debug_assert!(
        bytes.len() % size == 0,
        "byte size {} is not a multiple of the element size {size}",
        bytes.len()
    );
    bytes.len() / size
}

fn as_elements<T: Element>(bytes: &ByteVec) -> &[T] {
    let len = elements_in::<T>(bytes);
    if len == 0 {
        return &[];
    }
    // SAFETY: the allocation is aligned to `ByteVec::ALIGN`, which is at least
    // `align_of::<T>()`, and holds `len` initialized elements.
    unsafe { slice::from_raw_parts(bytes.as_ptr().cast::<T>(), len) }
}

fn byte_len<T: Element>(count: usize) -> usize {
    count
        .checked_mul(element_size::<T>())
        .unwrap_or_else(|| fatal(FatalError::Overflow))
}

fn pop_element<T: Element>(bytes: &mut ByteVec) -> T {
    let size = element_size::<T>();
    let start = bytes
        .len()
        .checked_sub(size)
        .unwrap_or_else(|| fatal(FatalError::Underflow));
    // SAFETY: `[start, start + size)` is in bounds. The read is unaligned so
    // that a buffer whose size is not a multiple of `size` stays sound.
    let value = unsafe { ptr::read_unaligned(bytes.as_ptr().add(start).cast::<T>()) };
    bytes.truncate_by(size);
    value
}

impl ByteVec {
    /// Creates a buffer holding a copy of `values`.
    #[must_use]
    pub fn from_elements<T: Element>(values: &[T]) -> Self {
        let mut v = Self::new();
        v.extend_from_elements(values);
        v
    }

    /// Views the buffer as a growable array of `T`.
    #[must_use]
    pub fn typed<T: Element>(&mut self) -> Typed<'_, T> {
        Typed {
            bytes: self,
            _element: PhantomData,
        }
    }

    /// The bytes reinterpreted as a slice of `T`.
    #[must_use]
    pub fn as_elements<T: Element>(&self) -> &[T] {
        as_elements(self)
    }

    /// Number of `T` elements in the buffer.
    #[must_use]
    pub fn len_of<T: Element>(&self) -> usize {
        elements_in::<T>(self)
    }

    /// Appends the bytes of one value.
    pub fn push_value<T: Element>(&mut self, value: T) {
        self.typed::<T>().push(value);
    }

    /// Appends the bytes of `values`.
    pub fn extend_from_elements<T: Element>(&mut self, values: &[T]) {
        self.extend_from_slice(bytes_of(values));
    }

    /// Removes the trailing `T` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `size_of::<T>()` bytes are stored.
    pub fn pop_value<T: Element>(&mut self) -> T {
        pop_element(self)
    }

    /// The first `T` in the buffer.
    #[must_use]
    pub fn first_value<T: Element>(&self) -> Option<T> {
        as_elements::<T>(self).first().copied()
    }

    /// The last `T` in the buffer.
    #[must_use]
    pub fn last_value<T: Element>(&self) -> Option<T> {
        as_elements::<T>(self).last().copied()
    }

    /// Resizes the buffer to hold `count` elements of `T`.
    pub fn resize_elements<T: Element>(&mut self, count: usize) {
        self.resize(byte_len::<T>(count));
    }
}
