//! The [`SpanOrVec`] container.

use core::iter;
use core::mem;
use core::ops::{Bound, Range, RangeBounds};

use allocator_api2::vec::Vec;

use crate::alloc::{Allocator, Global};
use crate::error::{IndexError, InsertionError, StorageError};

use self::span::SpanBuf;

#[macro_use]
mod macros;

mod span;
mod traits;

#[cfg(feature = "zeroize")]
mod zeroize;

#[cold]
#[inline(never)]
pub(super) fn index_panic() -> ! {
    panic!("Invalid element index");
}

#[inline]
fn bounds_to_range(range: impl RangeBounds<usize>, length: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => i.saturating_add(1),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => i.saturating_add(1),
        Bound::Excluded(i) => *i,
    };
    if start > end || end > length {
        index_panic();
    }
    Range { start, end }
}

/// Restores the owned length if filling a gap is interrupted by a panic.
struct TruncateOnUnwind<'v, T, A: Allocator> {
    vec: &'v mut Vec<T, A>,
    len: usize,
}

impl<T, A: Allocator> Drop for TruncateOnUnwind<'_, T, A> {
    fn drop(&mut self) {
        self.vec.truncate(self.len);
    }
}

pub(crate) enum Inner<'a, T, A: Allocator> {
    Span(SpanBuf<'a, T, A>),
    Vec(Vec<T, A>),
}

/// A contiguous growable array which may borrow its initial storage.
///
/// A `SpanOrVec` is either *borrowed*, viewing a caller-provided `&'a mut [T]`
/// whose length is the capacity ceiling, or *owned*, holding an
/// [`allocator_api2::vec::Vec<T, A>`]. Any operation which needs more room
/// than a borrowed region provides copies the live elements into a new
/// buffer obtained from the container's allocator. The transition happens
/// at most once and is never reversed.
///
/// While borrowed, the elements past the current length remain in the
/// caller's buffer. Shrinking operations never drop them, and widening
/// operations overwrite them by assignment.
///
/// Promotion allocates exactly the needed capacity, except for zero-sized
/// `T` where the owned buffer always reports a capacity of `usize::MAX`.
pub struct SpanOrVec<'a, T, A: Allocator = Global> {
    pub(crate) inner: Inner<'a, T, A>,
}

impl<'a, T> SpanOrVec<'a, T, Global> {
    /// Constructs a new, empty owned `SpanOrVec`.
    ///
    /// No allocation is performed until elements are added.
    ///
    /// ```
    /// # #![allow(unused_mut)]
    /// use span_or_vec::SpanOrVec;
    ///
    /// let mut v: SpanOrVec<'_, i32> = SpanOrVec::new();
    /// assert!(v.is_owned());
    /// assert_eq!(v.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(data, Global)
    }

    pub fn from_elem(elem: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(elem, count, Global)
    }

    /// Constructs a borrowed `SpanOrVec` over `data`. The capacity ceiling
    /// and the initial length are both `data.len()`.
    ///
    /// ```
    /// use span_or_vec::SpanOrVec;
    ///
    /// let mut buf = [1, 2, 3];
    /// let v = SpanOrVec::from_span(&mut buf);
    /// assert!(v.is_borrowed());
    /// assert_eq!(v.capacity(), 3);
    /// assert_eq!(v, [1, 2, 3]);
    /// ```
    pub fn from_span(data: &'a mut [T]) -> Self {
        Self::from_span_in(data, Global)
    }
}

impl<'a, T, A: Allocator> SpanOrVec<'a, T, A> {
    pub const fn new_in(alloc: A) -> Self {
        Self {
            inner: Inner::Vec(Vec::new_in(alloc)),
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        match Self::try_with_capacity_in(capacity, alloc) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, StorageError> {
        let mut vec = Vec::new_in(alloc);
        vec.try_reserve_exact(capacity)?;
        Ok(Self::from_vec(vec))
    }

    #[inline]
    pub(crate) fn from_vec(vec: Vec<T, A>) -> Self {
        Self {
            inner: Inner::Vec(vec),
        }
    }

    /// Constructs a borrowed `SpanOrVec` over `data`, carrying `alloc` for a
    /// later promotion.
    pub fn from_span_in(data: &'a mut [T], alloc: A) -> Self {
        Self {
            inner: Inner::Span(SpanBuf::new(data, alloc)),
        }
    }

    pub fn from_slice_in(data: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        let mut vec = Vec::with_capacity_in(data.len(), alloc);
        vec.extend_from_slice(data);
        Self::from_vec(vec)
    }

    pub fn from_elem_in(elem: T, count: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut vec = Vec::with_capacity_in(count, alloc);
        vec.resize(count, elem);
        Self::from_vec(vec)
    }

    pub fn from_iter_in<I>(iter: I, alloc: A) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (min_cap, _) = iter.size_hint();
        let mut vec = Vec::with_capacity_in(min_cap, alloc);
        vec.extend(iter);
        Self::from_vec(vec)
    }

    /// Create an owned `SpanOrVec` from an array. An empty array performs
    /// no allocation.
    pub fn from_array_in<const N: usize>(data: [T; N], alloc: A) -> Self {
        Self::from_iter_in(data, alloc)
    }

    /// Move the elements of a vector with a different allocator into a new
    /// buffer obtained from `alloc`.
    pub fn from_vec_in<B: Allocator>(vec: Vec<T, B>, alloc: A) -> Self {
        Self::from_iter_in(vec, alloc)
    }
}

impl<'a, T, A: Allocator> SpanOrVec<'a, T, A> {
    /// Check whether the container is viewing caller-provided memory.
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.inner, Inner::Span(_))
    }

    /// Check whether the container holds its own buffer.
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self.inner, Inner::Vec(_))
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        match &self.inner {
            Inner::Span(span) => span.allocator(),
            Inner::Vec(vec) => vec.allocator(),
        }
    }

    /// The borrowed ceiling while borrowed, otherwise the capacity of the
    /// owned buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        match &self.inner {
            Inner::Span(span) => span.capacity(),
            Inner::Vec(vec) => vec.capacity(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match &self.inner {
            Inner::Span(span) => span.len(),
            Inner::Vec(vec) => vec.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.inner {
            Inner::Span(span) => span.as_slice(),
            Inner::Vec(vec) => vec.as_slice(),
        }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.inner {
            Inner::Span(span) => span.as_mut_slice(),
            Inner::Vec(vec) => vec.as_mut_slice(),
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        match &self.inner {
            Inner::Span(span) => span.as_ptr(),
            Inner::Vec(vec) => vec.as_ptr(),
        }
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.inner {
            Inner::Span(span) => span.as_mut_ptr(),
            Inner::Vec(vec) => vec.as_mut_ptr(),
        }
    }

    /// Bounds-checked access to the element at `index`.
    ///
    /// ```
    /// use span_or_vec::SpanOrVec;
    ///
    /// let v = SpanOrVec::from_slice(&[10, 20]);
    /// assert_eq!(v.at(1), Ok(&20));
    /// let err = v.at(2).unwrap_err();
    /// assert_eq!((err.index(), err.length()), (2, 2));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, IndexError> {
        let data = self.as_slice();
        data.get(index).ok_or(IndexError::new(index, data.len()))
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(IndexError::new(index, len))
    }

    /// Shorten the container to `len` elements. Has no effect if `len` is
    /// not less than the current length.
    ///
    /// Owned elements are dropped. Borrowed elements stay in the caller's
    /// buffer past the new length.
    pub fn truncate(&mut self, len: usize) {
        match &mut self.inner {
            Inner::Span(span) => span.truncate(len),
            Inner::Vec(vec) => vec.truncate(len),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Remove the element at `index`, shifting the following elements down.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn erase(&mut self, index: usize) {
        if index >= self.len() {
            index_panic();
        }
        self.erase_range(index..index + 1);
    }

    /// Remove the elements in `range`, shifting the following elements down.
    /// The capacity is unchanged and a borrowed container stays borrowed.
    ///
    /// # Panics
    /// Panics if the range is reversed or extends past the end.
    pub fn erase_range<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let range = bounds_to_range(range, self.len());
        match &mut self.inner {
            Inner::Span(span) => span.erase(range),
            Inner::Vec(vec) => {
                vec.drain(range);
            }
        }
    }

    /// Remove the last element, if any.
    pub fn pop_back(&mut self) {
        let len = self.len();
        if len > 0 {
            self.truncate(len - 1);
        }
    }

    /// Reduce the capacity to the current length. A borrowed container
    /// lowers its ceiling and gives up the rest of the caller's buffer.
    pub fn shrink_to_fit(&mut self) {
        match &mut self.inner {
            Inner::Span(span) => span.shrink_to_fit(),
            Inner::Vec(vec) => vec.shrink_to_fit(),
        }
    }

    /// Exchange the full state of two containers.
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.inner, &mut other.inner);
    }
}

impl<'a, T: Clone, A: Allocator + Clone> SpanOrVec<'a, T, A> {
    /// Make room for `additional` more elements. A borrowed container with
    /// too little room is promoted to a buffer of exactly the needed size.
    fn try_grow(&mut self, additional: usize, exact: bool) -> Result<(), StorageError> {
        match &mut self.inner {
            Inner::Span(span) => {
                if additional <= span.spare() {
                    return Ok(());
                }
                let capacity = span
                    .len()
                    .checked_add(additional)
                    .ok_or(StorageError::CapacityOverflow)?;
                let vec = span.spill(capacity)?;
                self.inner = Inner::Vec(vec);
            }
            Inner::Vec(vec) => {
                if exact {
                    vec.try_reserve_exact(additional)?;
                } else {
                    vec.try_reserve(additional)?;
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        match self.try_grow(additional, false) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), StorageError> {
        self.try_grow(additional, false)
    }

    #[inline]
    pub fn reserve_exact(&mut self, additional: usize) {
        match self.try_grow(additional, true) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), StorageError> {
        self.try_grow(additional, true)
    }

    #[inline]
    pub fn resize(&mut self, new_len: usize, value: T) {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), StorageError> {
        self.try_resize_with(new_len, || value.clone())
    }

    #[inline]
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match self.try_resize_with(new_len, f) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    pub fn try_resize_with<F>(&mut self, new_len: usize, f: F) -> Result<(), StorageError>
    where
        F: FnMut() -> T,
    {
        let len = self.len();
        if new_len > len {
            self.try_grow(new_len - len, false)?;
        }
        match &mut self.inner {
            Inner::Span(span) => span.resize_with(new_len, f),
            Inner::Vec(vec) => vec.resize_with(new_len, f),
        }
        Ok(())
    }

    /// Resize, filling new slots with `T::default()`.
    #[inline]
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Insert `count` values taken from `values` at `index`. Nothing is
    /// taken from `values` when storage could not be obtained.
    fn try_insert_with<I>(&mut self, index: usize, count: usize, values: I) -> Result<(), StorageError>
    where
        I: Iterator<Item = T>,
    {
        let len = self.len();
        if index > len {
            index_panic();
        }
        if count == 0 {
            return Ok(());
        }
        match &mut self.inner {
            Inner::Span(span) => {
                if count <= span.spare() {
                    span.insert_within(index, count, values);
                } else {
                    let vec = span.spill_insert(index, count, values)?;
                    self.inner = Inner::Vec(vec);
                }
            }
            Inner::Vec(vec) => {
                vec.try_reserve(count)?;
                let mut guard = TruncateOnUnwind { vec, len };
                guard.vec.extend(values.take(count));
                let new_len = guard.vec.len();
                guard.vec[index..].rotate_right(new_len - len);
                guard.len = new_len;
            }
        }
        Ok(())
    }

    #[inline]
    fn insert_with<I>(&mut self, index: usize, count: usize, values: I)
    where
        I: Iterator<Item = T>,
    {
        match self.try_insert_with(index, count, values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert `value` at `index`, shifting the following elements up.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert `value` at `index`, returning it inside the error when
    /// storage could not be obtained.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), InsertionError<T>> {
        let mut slot = Some(value);
        match self.try_insert_with(index, 1, iter::from_fn(|| slot.take())) {
            Ok(()) => Ok(()),
            Err(error) => match slot {
                Some(value) => Err(InsertionError::new(error, value)),
                None => error.panic(),
            },
        }
    }

    /// Insert `count` clones of `value` at `index`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T) {
        self.insert_with(index, count, iter::repeat(value).take(count))
    }

    pub fn insert_slice(&mut self, index: usize, values: &[T]) {
        self.insert_with(index, values.len(), values.iter().cloned())
    }

    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), StorageError> {
        self.try_insert_with(index, values.len(), values.iter().cloned())
    }

    pub fn insert_iter<I>(&mut self, index: usize, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let values = values.into_iter();
        let count = values.len();
        self.insert_with(index, count, values)
    }

    /// Move the values of an array into the container at `index`.
    ///
    /// ```
    /// use span_or_vec::SpanOrVec;
    ///
    /// let mut buf = [1, 2, 3, 4, 5];
    /// let mut v = SpanOrVec::from_span(&mut buf);
    /// v.emplace(1, [6, 7]);
    /// assert!(v.is_owned());
    /// assert_eq!(v, [1, 6, 7, 2, 3, 4, 5]);
    /// ```
    pub fn emplace<const N: usize>(&mut self, index: usize, values: [T; N]) {
        self.insert_with(index, N, values.into_iter())
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        match self.try_push(value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_push(&mut self, value: T) -> Result<(), InsertionError<T>> {
        let value = match &mut self.inner {
            Inner::Span(span) => match span.push_within(value) {
                Ok(()) => return Ok(()),
                Err(value) => value,
            },
            Inner::Vec(_) => value,
        };
        let len = self.len();
        self.try_insert(len, value)
    }

    #[inline]
    pub fn emplace_back<const N: usize>(&mut self, values: [T; N]) {
        let len = self.len();
        self.emplace(len, values)
    }

    #[inline]
    pub fn extend_from_slice(&mut self, values: &[T]) {
        let len = self.len();
        self.insert_slice(len, values)
    }

    #[inline]
    pub fn try_extend_from_slice(&mut self, values: &[T]) -> Result<(), StorageError> {
        let len = self.len();
        self.try_insert_slice(len, values)
    }

    /// Remove and return the last element. A borrowed container returns a
    /// clone, leaving the original in the caller's buffer.
    pub fn pop(&mut self) -> Option<T> {
        match &mut self.inner {
            Inner::Span(span) => {
                let last = span.as_slice().last()?.clone();
                span.truncate(span.len() - 1);
                Some(last)
            }
            Inner::Vec(vec) => vec.pop(),
        }
    }

    /// Remove and return the element at `index`, shifting the following
    /// elements down.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> T {
        if index >= self.len() {
            index_panic();
        }
        match &mut self.inner {
            Inner::Span(span) => {
                let value = span.as_slice()[index].clone();
                span.erase(index..index + 1);
                value
            }
            Inner::Vec(vec) => vec.remove(index),
        }
    }

    /// Replace the contents with `count` values. Old borrowed contents are
    /// not copied when a promotion is needed.
    fn try_assign_with<I>(&mut self, count: usize, values: I) -> Result<(), StorageError>
    where
        I: Iterator<Item = T>,
    {
        match &mut self.inner {
            Inner::Span(span) => {
                if count <= span.capacity() {
                    span.assign_within(count, values);
                } else {
                    let mut vec = span.alloc_exact(count)?;
                    vec.extend(values.take(count));
                    self.inner = Inner::Vec(vec);
                }
            }
            Inner::Vec(vec) => {
                vec.try_reserve_exact(count.saturating_sub(vec.len()))?;
                vec.clear();
                vec.extend(values.take(count));
            }
        }
        Ok(())
    }

    #[inline]
    fn assign_with<I>(&mut self, count: usize, values: I)
    where
        I: Iterator<Item = T>,
    {
        match self.try_assign_with(count, values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents with `count` clones of `value`.
    pub fn assign_elem(&mut self, count: usize, value: T) {
        self.assign_with(count, iter::repeat(value).take(count))
    }

    pub fn assign_slice(&mut self, values: &[T]) {
        self.assign_with(values.len(), values.iter().cloned())
    }

    pub fn try_assign_slice(&mut self, values: &[T]) -> Result<(), StorageError> {
        self.try_assign_with(values.len(), values.iter().cloned())
    }

    pub fn assign_iter<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let values = values.into_iter();
        let count = values.len();
        self.assign_with(count, values)
    }

    /// Copy the elements into a new vector using a clone of the allocator.
    pub fn to_vec(&self) -> Vec<T, A> {
        let mut vec = Vec::with_capacity_in(self.len(), self.allocator().clone());
        vec.extend_from_slice(self.as_slice());
        vec
    }
}

impl<'a, T: Clone, A: Allocator> SpanOrVec<'a, T, A> {
    /// Convert into an owned vector. An owned buffer is moved out, while a
    /// borrowed view is copied into a buffer from the carried allocator.
    pub fn into_vec(self) -> Vec<T, A> {
        match self.inner {
            Inner::Span(span) => span.into_vec(),
            Inner::Vec(vec) => vec,
        }
    }

    /// Detach from the caller's buffer, producing an owned container which
    /// may outlive it.
    pub fn into_owned<'b>(self) -> SpanOrVec<'b, T, A>
    where
        T: 'b,
    {
        SpanOrVec::from_vec(self.into_vec())
    }
}
