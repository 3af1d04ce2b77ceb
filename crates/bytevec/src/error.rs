use thiserror::Error;

/// Internal limit violations that a buffer cannot recover from.
///
/// These are never returned to callers. They describe why an operation was
/// aborted and form the message of the resulting panic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    /// Growing the size or capacity would wrap around `usize`.
    #[error("integer overflow")]
    Overflow,
    /// More bytes were removed than the buffer holds.
    #[error("integer underflow")]
    Underflow,
    /// The requested capacity cannot be described as an allocation layout.
    #[error("capacity {0} exceeds the allocation limit")]
    CapacityLayout(usize),
    /// A formatting trait implementation reported an error.
    #[error("a formatting trait implementation returned an error")]
    Format,
}

/// Aborts the current operation with `err`.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn fatal(err: FatalError) -> ! {
    tracing::error!(error = %err, "bytevector internal error");
    panic!("bytevector internal error: {err}")
}
