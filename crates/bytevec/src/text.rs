//! Null-terminated strings stored in a [`ByteVec`].
//!
//! A string view is valid once the buffer ends with a terminator (a zero
//! unit). The string itself runs up to the *first* terminator, so writing a
//! zero in the middle truncates it; [`ByteVec::shrink_to_text`] then reclaims
//! the hidden tail.
//!
//! Narrow strings use `u8` units; wide strings use [`WideChar`] (UTF-16) or
//! `u32` (UTF-32) units. All operations are generic over [`TextUnit`].

use core::ffi::CStr;

use bstr::{BStr, ByteSlice};

use crate::{ByteVec, Element, element::element_size};

/// The wide character type: a UTF-16 code unit.
pub type WideChar = u16;

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A character unit of a null-terminated string.
pub trait TextUnit: Element + Eq + private::Sealed {
    /// The terminator.
    const NUL: Self;

    /// Encodes `c` into `buf`, returning the number of units written.
    fn encode_char(c: char, buf: &mut [Self; 4]) -> usize;
}

impl TextUnit for u8 {
    const NUL: Self = 0;

    fn encode_char(c: char, buf: &mut [Self; 4]) -> usize {
        c.encode_utf8(buf).len()
    }
}

impl TextUnit for u16 {
    const NUL: Self = 0;

    fn encode_char(c: char, buf: &mut [Self; 4]) -> usize {
        c.encode_utf16(buf).len()
    }
}

impl TextUnit for u32 {
    const NUL: Self = 0;

    fn encode_char(c: char, buf: &mut [Self; 4]) -> usize {
        buf[0] = u32::from(c);
        1
    }
}

/// Length of the string in `units`, up to the first terminator.
pub(crate) fn text_len<C: TextUnit>(units: &[C]) -> usize {
    units.iter().position(|&c| c == C::NUL).unwrap_or(units.len())
}

impl ByteVec {
    /// Creates a buffer holding the string `s` and a terminator.
    ///
    /// `s` ends at its first terminator or at the end of the slice.
    #[must_use]
    pub fn from_text<C: TextUnit>(s: &[C]) -> Self {
        let mut v = Self::new();
        v.cat_text(s);
        v
    }

    /// Creates a narrow string buffer from `s`.
    #[must_use]
    pub fn from_text_str(s: &str) -> Self {
        Self::from_text(s.as_bytes())
    }

    /// Creates a wide string buffer from `s`, encoded as UTF-16.
    #[must_use]
    pub fn from_wide_str(s: &str) -> Self {
        let mut v = Self::new();
        v.cat_wide_str(s);
        v
    }

    /// Makes sure the buffer ends with a terminator and returns the string.
    ///
    /// A terminator is appended only when the buffer is empty or its last unit
    /// is not zero, so repeated calls never grow the buffer.
    pub fn get_text<C: TextUnit>(&mut self) -> &[C] {
        if self.last_value::<C>() != Some(C::NUL) {
            self.push_value(C::NUL);
        }
        let units = self.as_elements::<C>();
        &units[..text_len(units)]
    }

    /// [`get_text`](Self::get_text) for narrow strings, as a [`CStr`].
    pub fn get_c_str(&mut self) -> &CStr {
        let len = self.get_text::<u8>().len();
        // SAFETY: `len` is the position of the first zero byte, which exists
        // after `get_text`.
        unsafe { CStr::from_bytes_with_nul_unchecked(&self.as_slice()[..=len]) }
    }

    /// [`get_text`](Self::get_text) for narrow strings, as a [`BStr`].
    pub fn get_bstr(&mut self) -> &BStr {
        self.get_text::<u8>().as_bstr()
    }

    /// [`get_text`](Self::get_text) for wide strings.
    pub fn get_wide(&mut self) -> &[WideChar] {
        self.get_text::<WideChar>()
    }

    /// Cuts the buffer right after the first terminator and shrinks the
    /// capacity to fit.
    pub fn shrink_to_text<C: TextUnit>(&mut self) {
        let len = self.get_text::<C>().len();
        self.resize_elements::<C>(len + 1);
        self.shrink_to_fit();
    }

    /// Appends the string `s`, replacing the current trailing terminator.
    ///
    /// `s` ends at its first terminator or at the end of the slice. The result
    /// is always terminated.
    pub fn cat_text<C: TextUnit>(&mut self, s: &[C]) {
        self.pop_terminator::<C>();
        self.extend_from_elements(&s[..text_len(s)]);
        self.push_value(C::NUL);
    }

    /// Appends at most `n` units of `s`, then exactly one terminator.
    pub fn cat_text_bounded<C: TextUnit>(&mut self, s: &[C], n: usize) {
        self.pop_terminator::<C>();
        let s = &s[..n.min(s.len())];
        self.extend_from_elements(&s[..text_len(s)]);
        self.push_value(C::NUL);
    }

    /// Appends a single unit as a string.
    pub fn push_text_unit<C: TextUnit>(&mut self, c: C) {
        self.cat_text(&[c]);
    }

    /// Appends a narrow string.
    pub fn cat_str(&mut self, s: &str) {
        self.cat_text(s.as_bytes());
    }

    /// Appends a wide string, encoding `s` as UTF-16.
    pub fn cat_wide_str(&mut self, s: &str) {
        self.pop_terminator::<WideChar>();
        for unit in s.encode_utf16().take_while(|&u| u != 0) {
            self.push_value(unit);
        }
        self.push_value::<WideChar>(0);
    }

    fn pop_terminator<C: TextUnit>(&mut self) {
        if self.last_value::<C>() == Some(C::NUL) {
            self.truncate_by(element_size::<C>());
        }
    }
}
