//! Vectors which borrow caller memory until they outgrow it.
//!
//! A [`SpanOrVec`] starts either as an ordinary owning vector, or as a view
//! over a caller-provided mutable slice. While it borrows, every operation
//! works in place within the slice. The first operation which needs more
//! room than the slice provides copies the live elements into a buffer
//! obtained from the container's allocator, and from then on it behaves as
//! a normal growable vector.
//!
//! ```
//! use span_or_vec::SpanOrVec;
//!
//! let mut buf = [1, 2, 3, 0, 0];
//! let mut v = SpanOrVec::from_span(&mut buf[..]);
//! v.truncate(3);
//! v.push(4);
//! assert!(v.is_borrowed());
//! v.extend_from_slice(&[5, 6]);
//! assert!(v.is_owned());
//! assert_eq!(v, [1, 2, 3, 4, 5, 6]);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod alloc;

pub(crate) mod error;

pub mod vec;

pub use allocator_api2;

pub use self::{
    error::{IndexError, InsertionError, StorageError},
    vec::SpanOrVec,
};
