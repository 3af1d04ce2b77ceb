//! Rendering `format_args!` output into null-terminated buffers.
//!
//! The builder formats into a fixed working buffer through
//! [`TruncatingWriter`]. When the output does not fit, the buffer doubles and
//! formatting starts over from scratch.

use core::fmt;

use crate::{
    ByteVec, ByteVecOptions,
    error::{FatalError, fatal},
    text::TextUnit,
};

/// A bounded [`fmt::Write`] sink over a slice of text units.
///
/// Output beyond `buf.len() - 1` units is silently dropped, and the written
/// text is always followed by a terminator. Narrow units receive UTF-8, `u16`
/// units UTF-16 and `u32` units UTF-32.
///
/// ```rust
/// use core::fmt::Write;
/// use bytevec::TruncatingWriter;
///
/// let mut buf = [0_u8; 4];
/// let mut w = TruncatingWriter::new(&mut buf);
/// write!(w, "{}", 12345).unwrap();
/// assert_eq!(w.as_units(), b"123");
/// assert!(w.is_truncated());
/// assert_eq!(buf, *b"123\0");
/// ```
#[derive(Debug)]
pub struct TruncatingWriter<'a, C: TextUnit> {
    buf: &'a mut [C],
    len: usize,
    truncated: bool,
}

impl<'a, C: TextUnit> TruncatingWriter<'a, C> {
    /// Starts writing at the beginning of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [C]) -> Self {
        if let Some(first) = buf.first_mut() {
            *first = C::NUL;
        }
        Self {
            buf,
            len: 0,
            truncated: false,
        }
    }

    /// Number of units written, excluding the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether some output was dropped.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The units written so far.
    #[must_use]
    pub fn as_units(&self) -> &[C] {
        &self.buf[..self.len]
    }

    fn room(&self) -> usize {
        self.buf.len().saturating_sub(1) - self.len
    }
}

impl<C: TextUnit> fmt::Write for TruncatingWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.write_char(c)?;
        }
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        let mut units = [C::NUL; 4];
        let n = C::encode_char(c, &mut units);
        let take = n.min(self.room());
        if take < n {
            self.truncated = true;
        }

        self.buf[self.len..self.len + take].copy_from_slice(&units[..take]);
        self.len += take;
        if let Some(end) = self.buf.get_mut(self.len) {
            *end = C::NUL;
        }
        Ok(())
    }
}

impl ByteVec {
    /// Renders `args` into a new null-terminated buffer of `C` units.
    ///
    /// # Panics
    ///
    /// Panics if a formatting trait implementation returns an error, or if the
    /// working buffer cannot grow any further.
    #[must_use]
    pub fn format_text<C: TextUnit>(args: fmt::Arguments<'_>) -> Self {
        Self::format_text_with::<C>(ByteVecOptions::default(), args)
    }

    /// [`format_text`](Self::format_text) with explicit options for the
    /// returned buffer and its working capacity.
    #[must_use]
    pub fn format_text_with<C: TextUnit>(
        options: ByteVecOptions,
        args: fmt::Arguments<'_>,
    ) -> Self {
        let mut rendered = Self::with_options(options);
        let mut capacity = options.first_format_capacity();
        let len = loop {
            rendered.resize_elements::<C>(capacity);
            let mut units = rendered.typed::<C>();
            let mut writer = TruncatingWriter::new(units.as_mut_slice());
            if fmt::write(&mut writer, args).is_err() {
                fatal(FatalError::Format);
            }
            if writer.len() < capacity - 1 {
                break writer.len();
            }

            capacity = capacity
                .checked_mul(2)
                .unwrap_or_else(|| fatal(FatalError::Overflow));
            tracing::trace!(capacity, "formatted text did not fit, retrying");
        };

        // The writer terminated the text at `len`; an interior NUL cuts it
        // shorter.
        rendered.resize_elements::<C>(len + 1);
        rendered.shrink_to_text::<C>();
        rendered
    }

    /// Renders `args` and appends the text to this string buffer.
    pub fn cat_format<C: TextUnit>(&mut self, args: fmt::Arguments<'_>) {
        let rendered = Self::format_text_with::<C>(*self.options(), args);
        self.cat_text(rendered.as_elements::<C>());
    }

    /// Replaces the content with the rendered text of `args`.
    pub fn assign_format<C: TextUnit>(&mut self, args: fmt::Arguments<'_>) {
        let mut rendered = Self::format_text_with::<C>(*self.options(), args);
        self.move_from(&mut rendered);
    }
}
