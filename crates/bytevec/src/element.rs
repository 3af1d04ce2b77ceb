use core::{mem, slice};

use crate::ByteVec;

/// A plain-old-data type that can be stored in a [`ByteVec`] by value.
///
/// # Safety
///
/// Implementors must guarantee that:
///
/// - every bit pattern of `size_of::<Self>()` bytes is a valid `Self`,
/// - `Self` has no padding bytes,
/// - `align_of::<Self>()` is at most [`ByteVec::ALIGN`].
///
/// Zero-sized types are rejected when first used with a buffer.
///
/// ```rust
/// use bytevec::{ByteVec, Element};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// #[repr(C)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// // SAFETY: two `i32` fields, no padding, any bit pattern is valid.
/// unsafe impl Element for Point {}
///
/// let mut v = ByteVec::new();
/// v.push_value(Point { x: 1, y: 2 });
/// assert_eq!(v.len(), 8);
/// assert_eq!(v.pop_value::<Point>(), Point { x: 1, y: 2 });
/// ```
pub unsafe trait Element: Copy + 'static {}

macro_rules! primitive_elements {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: primitive numbers have no padding and no invalid values.
            unsafe impl Element for $ty {}
        )*
    };
}

primitive_elements!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

// SAFETY: thin raw pointers are plain addresses; no validity requirement.
unsafe impl<T: 'static> Element for *const T {}
// SAFETY: as above.
unsafe impl<T: 'static> Element for *mut T {}
// SAFETY: arrays of padding-free elements are padding-free.
unsafe impl<T: Element, const N: usize> Element for [T; N] {}

/// Size of `T` in bytes, rejecting unusable element types at compile time.
pub(crate) const fn element_size<T: Element>() -> usize {
    const {
        assert!(mem::size_of::<T>() != 0, "zero-sized element type");
        assert!(
            mem::align_of::<T>() <= ByteVec::ALIGN,
            "element alignment exceeds ByteVec::ALIGN"
        );
    }
    mem::size_of::<T>()
}

/// The bytes of `values`.
pub(crate) fn bytes_of<T: Element>(values: &[T]) -> &[u8] {
    let len = values.len() * element_size::<T>();
    // SAFETY: `Element` types have no padding, so every byte is initialized.
    unsafe { slice::from_raw_parts(values.as_ptr().cast::<u8>(), len) }
}
