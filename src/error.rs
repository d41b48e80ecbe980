//! Error handling.

use core::fmt;

use allocator_api2::collections::{TryReserveError, TryReserveErrorKind};

use crate::alloc::Layout;

/// An enumeration of error types raised when owned storage could not be
/// obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// A memory allocation failed.
    AllocError(Layout),
    /// The requested capacity exceeds the maximum supported by the buffer.
    CapacityOverflow,
}

impl StorageError {
    /// Generic description of this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllocError(_) => "Allocation error",
            Self::CapacityOverflow => "Exceeded maximum capacity",
        }
    }

    /// Generate a panic with this error as the reason.
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        if let Self::AllocError(layout) = self {
            crate::alloc::handle_alloc_error(layout);
        } else {
            panic!("{}", self.as_str())
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TryReserveError> for StorageError {
    fn from(err: TryReserveError) -> Self {
        match err.kind() {
            TryReserveErrorKind::CapacityOverflow => Self::CapacityOverflow,
            TryReserveErrorKind::AllocError { layout, .. } => Self::AllocError(layout),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

/// An error raised by insertion operations when appropriate storage
/// was not available. Includes the value that was to be inserted.
#[derive(Clone)]
pub struct InsertionError<T> {
    pub(crate) error: StorageError,
    pub(crate) value: T,
}

impl<T> InsertionError<T> {
    pub(crate) fn new(error: StorageError, value: T) -> Self {
        Self { error, value }
    }

    /// Generic description of this error.
    pub fn as_str(&self) -> &'static str {
        "Insertion error"
    }

    /// Get a reference to the contained `StorageError`.
    pub fn error(&self) -> &StorageError {
        &self.error
    }

    /// Unwrap the inner value of this error.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Generate a panic with this error as the reason.
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        self.error.panic()
    }
}

impl<T> fmt::Debug for InsertionError<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertionError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for InsertionError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{}: {}", self.as_str(), self.error))
    }
}

#[cfg(feature = "std")]
impl<T> std::error::Error for InsertionError<T> {}

/// A checked element access referred to a position outside of the
/// live elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexError {
    pub(crate) index: usize,
    pub(crate) len: usize,
}

impl IndexError {
    pub(crate) const fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    /// The position which was requested.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of live elements at the time of the access.
    pub fn length(&self) -> usize {
        self.len
    }

    /// Generic description of this error.
    pub fn as_str(&self) -> &'static str {
        "Index out of range"
    }

    /// Generate a panic with this error as the reason.
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}", self)
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} is out of range [0, {})", self.index, self.len)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IndexError {}
