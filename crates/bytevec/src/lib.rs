//! A growable, contiguous byte buffer.
//!
//! [`ByteVec`] owns exactly one heap allocation and grows it by doubling.
//! On top of the raw byte engine sit three thin layers:
//!
//! - a typed view ([`Typed`]) that reinterprets the bytes as an array of any
//!   plain-old-data [`Element`],
//! - null-terminated narrow (`u8`) and wide ([`WideChar`]) strings,
//! - a formatted-text builder that renders [`core::fmt::Arguments`] into a
//!   buffer, growing it until the output fits.
//!
//! Violated internal limits (growth overflow, size underflow, allocation
//! failure) are fatal: they panic or abort instead of returning an error.
//!
//! ```rust
//! use bytevec::{ByteVec, bytevec_cat_format};
//!
//! let mut v = ByteVec::new();
//! v.cat_str("a");
//! v.cat_str("bb");
//! bytevec_cat_format!(v, "{}", 5);
//! v.cat_str("c");
//! assert_eq!(v.get_c_str().to_bytes(), b"abb5c");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod byte_vec;
mod element;
mod error;
mod format;
mod options;
mod text;
mod typed;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
mod tests;

pub use byte_vec::ByteVec;
pub use element::Element;
pub use error::FatalError;
pub use format::TruncatingWriter;
pub use options::ByteVecOptions;
pub use text::{TextUnit, WideChar};
pub use typed::Typed;

/// Renders narrow text into a new [`ByteVec`], like [`alloc::format!`].
///
/// ```rust
/// let v = bytevec::bytevec_format!("{}-{}", 1, "two");
/// assert_eq!(v.as_slice(), b"1-two\0");
/// ```
#[macro_export]
macro_rules! bytevec_format {
    ($($arg:tt)*) => {
        $crate::ByteVec::format_text::<u8>(::core::format_args!($($arg)*))
    };
}

/// Renders wide (UTF-16) text into a new [`ByteVec`].
///
/// ```rust
/// let mut v = bytevec::bytevec_wformat!("{}", 42);
/// assert_eq!(v.get_wide(), &[u16::from(b'4'), u16::from(b'2')]);
/// ```
#[macro_export]
macro_rules! bytevec_wformat {
    ($($arg:tt)*) => {
        $crate::ByteVec::format_text::<u16>(::core::format_args!($($arg)*))
    };
}

/// Appends rendered narrow text to an existing [`ByteVec`] string.
#[macro_export]
macro_rules! bytevec_cat_format {
    ($v:expr, $($arg:tt)*) => {
        $v.cat_format::<u8>(::core::format_args!($($arg)*))
    };
}

/// Appends rendered wide text to an existing [`ByteVec`] wide string.
#[macro_export]
macro_rules! bytevec_cat_wformat {
    ($v:expr, $($arg:tt)*) => {
        $v.cat_format::<u16>(::core::format_args!($($arg)*))
    };
}
