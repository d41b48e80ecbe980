//! Support for memory allocation.
//!
//! Owned storage is always obtained through an [`Allocator`]. The borrowed
//! state carries its allocator as well, so that a later promotion allocates
//! from the same source the caller configured.

pub use allocator_api2::alloc::{AllocError, Allocator, Global, Layout};

#[cfg(not(test))]
pub use allocator_api2::alloc::handle_alloc_error;

#[cfg(test)]
/// Custom allocation error handler.
pub fn handle_alloc_error(layout: Layout) -> ! {
    panic!("memory allocation of {} bytes failed", layout.size());
}
