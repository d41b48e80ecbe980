use core::mem;
use core::ops::Range;

use allocator_api2::vec::Vec;

use crate::alloc::Allocator;
use crate::error::StorageError;

/// The borrowed state of a `SpanOrVec`.
///
/// `data` covers the whole region handed over by the caller, which is the
/// ceiling for this state. Only the first `len` elements are live. The
/// elements beyond `len` are still initialized values owned by the caller:
/// they are never dropped here, only overwritten when the view widens.
pub(crate) struct SpanBuf<'a, T, A> {
    data: &'a mut [T],
    len: usize,
    alloc: A,
}

impl<'a, T, A> SpanBuf<'a, T, A> {
    #[inline]
    pub fn new(data: &'a mut [T], alloc: A) -> Self {
        let len = data.len();
        Self { data, len, alloc }
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn spare(&self) -> usize {
        self.data.len() - self.len
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.len]
    }

    /// Narrow the view. Elements past the new length stay in the caller's
    /// buffer untouched.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// Lower the ceiling to the current length.
    pub fn shrink_to_fit(&mut self) {
        let data = mem::take(&mut self.data);
        self.data = &mut data[..self.len];
    }

    /// Move the end of the view to `new_len`, which must not exceed the
    /// ceiling. Slots exposed by widening are assigned from `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        debug_assert!(new_len <= self.capacity());
        if new_len > self.len {
            for slot in &mut self.data[self.len..new_len] {
                *slot = f();
            }
        }
        self.len = new_len;
    }

    #[inline]
    pub fn push_within(&mut self, value: T) -> Result<(), T> {
        if self.len == self.data.len() {
            return Err(value);
        }
        self.data[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Open a gap of `count` slots at `index` and assign it from `values`.
    /// The gap must fit within the ceiling.
    pub fn insert_within<I>(&mut self, index: usize, count: usize, values: I)
    where
        I: Iterator<Item = T>,
    {
        debug_assert!(index <= self.len && count <= self.spare());
        let new_len = self.len + count;
        // fill the spare slots first so a panicking source only touches them
        for (slot, value) in self.data[self.len..new_len].iter_mut().zip(values) {
            *slot = value;
        }
        self.data[index..new_len].rotate_right(count);
        self.len = new_len;
    }

    /// Remove `range` from the view, moving the tail down over it. The
    /// removed values end up just past the new end of the view.
    pub fn erase(&mut self, range: Range<usize>) {
        debug_assert!(range.start <= range.end && range.end <= self.len);
        let count = range.end - range.start;
        if count == 0 {
            return;
        }
        self.data[range.start..self.len].rotate_left(count);
        self.len -= count;
    }

    /// Replace the view with `count` values, which must fit within the ceiling.
    pub fn assign_within<I>(&mut self, count: usize, values: I)
    where
        I: Iterator<Item = T>,
    {
        debug_assert!(count <= self.capacity());
        for (slot, value) in self.data[..count].iter_mut().zip(values) {
            *slot = value;
        }
        self.len = count;
    }

    #[cfg(feature = "zeroize")]
    pub fn zeroize_all(&mut self)
    where
        T: zeroize::Zeroize,
    {
        use zeroize::Zeroize;

        self.data.iter_mut().zeroize();
        self.len = 0;
    }
}

impl<T: Clone, A: Allocator> SpanBuf<'_, T, A> {
    /// Copy the live elements into a new buffer from the carried allocator.
    pub fn into_vec(self) -> Vec<T, A> {
        let mut vec = Vec::with_capacity_in(self.len, self.alloc);
        vec.extend_from_slice(&self.data[..self.len]);
        vec
    }
}

impl<T: Clone, A: Allocator + Clone> SpanBuf<'_, T, A> {
    /// Allocate an empty owned buffer of exactly `capacity` elements.
    pub fn alloc_exact(&self, capacity: usize) -> Result<Vec<T, A>, StorageError> {
        let mut vec = Vec::new_in(self.alloc.clone());
        vec.try_reserve_exact(capacity)?;
        Ok(vec)
    }

    /// Copy the live elements into an owned buffer of exactly `capacity`
    /// elements.
    pub fn spill(&self, capacity: usize) -> Result<Vec<T, A>, StorageError> {
        debug_assert!(capacity >= self.len);
        let mut vec = self.alloc_exact(capacity)?;
        vec.extend_from_slice(self.as_slice());
        Ok(vec)
    }

    /// Copy the live elements into an owned buffer sized for the result of
    /// inserting `count` values at `index`, writing the values into the gap.
    /// Nothing is taken from `values` unless the allocation succeeds.
    pub fn spill_insert<I>(
        &self,
        index: usize,
        count: usize,
        values: I,
    ) -> Result<Vec<T, A>, StorageError>
    where
        I: Iterator<Item = T>,
    {
        let capacity = self
            .len
            .checked_add(count)
            .ok_or(StorageError::CapacityOverflow)?;
        let mut vec = self.alloc_exact(capacity)?;
        let (head, tail) = self.as_slice().split_at(index);
        vec.extend_from_slice(head);
        vec.extend(values.take(count));
        vec.extend_from_slice(tail);
        Ok(vec)
    }
}
