/// Tuning knobs carried by every [`ByteVec`](crate::ByteVec).
///
/// Options travel with the buffer: clones keep them, and moves and swaps
/// exchange them together with the allocation.
///
/// # Examples
///
/// ```rust
/// use bytevec::{ByteVec, ByteVecOptions};
///
/// let options = ByteVecOptions {
///     default_capacity: 1,
///     ..Default::default()
/// };
/// let mut v = ByteVec::with_options(options);
/// v.extend_from_slice(b"abc");
/// assert_eq!(v.capacity(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteVecOptions {
    /// Capacity in bytes of the first allocation.
    ///
    /// Larger requests double this value until they fit. A value of `0` is
    /// treated as `1`.
    ///
    /// # Default
    ///
    /// `16`
    pub default_capacity: usize,

    /// Initial capacity, in text units, of the working buffer used by the
    /// formatted-text builder.
    ///
    /// The builder doubles it whenever the rendered text does not fit. Values
    /// below `2` are raised to `2`.
    ///
    /// # Default
    ///
    /// `256`
    pub format_capacity: usize,

    /// Byte written over released, cleared and freshly exposed memory.
    ///
    /// This makes reads of stale data easy to spot. It is a diagnostic aid:
    /// the contents of newly exposed bytes are unspecified either way.
    ///
    /// # Default
    ///
    /// `Some(0xCD)` with `debug_assertions`, `None` otherwise.
    pub fill_byte: Option<u8>,
}

impl ByteVecOptions {
    /// Fill pattern used by debug builds.
    pub const DEBUG_FILL_BYTE: u8 = 0xCD;

    /// Returns the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_capacity: 16,
            format_capacity: 256,
            fill_byte: if cfg!(debug_assertions) {
                Some(Self::DEBUG_FILL_BYTE)
            } else {
                None
            },
        }
    }

    pub(crate) fn first_capacity(&self) -> usize {
        self.default_capacity.max(1)
    }

    pub(crate) fn first_format_capacity(&self) -> usize {
        self.format_capacity.max(2)
    }
}

impl Default for ByteVecOptions {
    fn default() -> Self {
        Self::new()
    }
}
