#![allow(dead_code)]

use core::alloc::Layout;
use core::cell::{Cell, RefCell};
use core::ptr::NonNull;
use core::slice;

use span_or_vec::alloc::{AllocError, Allocator, Global};

/// An allocator which counts requests, can be told to fail, and records
/// the contents of released buffers.
#[derive(Debug)]
pub struct TestAlloc<A: Allocator = Global> {
    alloc: A,
    allocs: Cell<usize>,
    live: Cell<usize>,
    fail: Cell<bool>,
    released: RefCell<Vec<Vec<u8>>>,
}

impl TestAlloc {
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<A: Allocator> TestAlloc<A> {
    pub fn new_in(alloc: A) -> Self {
        Self {
            alloc,
            allocs: Cell::new(0),
            live: Cell::new(0),
            fail: Cell::new(false),
            released: RefCell::new(Vec::new()),
        }
    }

    /// Total number of successful allocations.
    pub fn allocations(&self) -> usize {
        self.allocs.get()
    }

    /// Number of allocations not yet released.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.set(fail);
    }

    pub fn released(&self) -> Vec<Vec<u8>> {
        self.released.borrow().clone()
    }
}

unsafe impl<A: Allocator> Allocator for &TestAlloc<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        if self.fail.get() {
            return Err(AllocError);
        }
        let ptr = self.alloc.allocate(layout)?;
        self.allocs.set(self.allocs.get() + 1);
        self.live.set(self.live.get() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let cp = Vec::from(unsafe { slice::from_raw_parts(ptr.as_ptr(), layout.size()) });
        self.released.borrow_mut().push(cp);
        self.live.set(self.live.get() - 1);
        unsafe { self.alloc.deallocate(ptr, layout) }
    }
}

/// A value which tracks how many of its instances are alive.
#[derive(Debug)]
pub struct Tracked<'c> {
    pub value: u32,
    count: &'c Cell<usize>,
}

impl<'c> Tracked<'c> {
    pub fn new(value: u32, count: &'c Cell<usize>) -> Self {
        count.set(count.get() + 1);
        Self { value, count }
    }
}

impl Clone for Tracked<'_> {
    fn clone(&self) -> Self {
        Self::new(self.value, self.count)
    }
}

impl Drop for Tracked<'_> {
    fn drop(&mut self) {
        self.count.set(self.count.get() - 1);
    }
}

impl PartialEq for Tracked<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
