use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::slice::{self, SliceIndex};

use allocator_api2::vec::Vec;

use crate::alloc::{Allocator, Global};

use super::{Inner, SpanOrVec};

/// Cloning always produces an owned container with its own buffer, even
/// when the source is borrowed.
impl<'a, T: Clone, A: Allocator + Clone> Clone for SpanOrVec<'a, T, A> {
    fn clone(&self) -> Self {
        Self::from_vec(self.to_vec())
    }

    /// An owned destination reuses its buffer when it is large enough. A
    /// borrowed destination is promoted to a buffer of exactly
    /// `source.len()` elements from its own allocator.
    fn clone_from(&mut self, source: &Self) {
        match &mut self.inner {
            Inner::Span(span) => {
                let mut vec = Vec::with_capacity_in(source.len(), span.allocator().clone());
                vec.extend_from_slice(source.as_slice());
                self.inner = Inner::Vec(vec);
            }
            Inner::Vec(vec) => {
                vec.truncate(source.len());
                let (init, tail) = source.as_slice().split_at(vec.len());
                vec.clone_from_slice(init);
                vec.reserve_exact(tail.len());
                vec.extend_from_slice(tail);
            }
        }
    }
}

impl<'a, T, A: Allocator + Default> Default for SpanOrVec<'a, T, A> {
    #[inline]
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<'a, T, A: Allocator> Deref for SpanOrVec<'a, T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a, T, A: Allocator> DerefMut for SpanOrVec<'a, T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'a, T, A: Allocator> AsRef<[T]> for SpanOrVec<'a, T, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T, A: Allocator> AsMut<[T]> for SpanOrVec<'a, T, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, A: Allocator> Borrow<[T]> for SpanOrVec<'a, T, A> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T, A: Allocator> BorrowMut<[T]> for SpanOrVec<'a, T, A> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, A: Allocator, I: SliceIndex<[T]>> Index<I> for SpanOrVec<'a, T, A> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<'a, T, A: Allocator, I: SliceIndex<[T]>> IndexMut<I> for SpanOrVec<'a, T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<'s, 'a, T, A: Allocator> IntoIterator for &'s SpanOrVec<'a, T, A> {
    type Item = &'s T;
    type IntoIter = slice::Iter<'s, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'s, 'a, T, A: Allocator> IntoIterator for &'s mut SpanOrVec<'a, T, A> {
    type Item = &'s mut T;
    type IntoIter = slice::IterMut<'s, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<'a, T: fmt::Debug, A: Allocator> fmt::Debug for SpanOrVec<'a, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<'a, T: Hash, A: Allocator> Hash for SpanOrVec<'a, T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<'a, T> FromIterator<T> for SpanOrVec<'a, T, Global> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, Global)
    }
}

impl<'a, T: Clone, A: Allocator + Clone> Extend<T> for SpanOrVec<'a, T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (min_reserve, _) = iter.size_hint();
        self.reserve(min_reserve);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, 'r, T: Copy + 'r, A: Allocator + Clone> Extend<&'r T> for SpanOrVec<'a, T, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'r T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<'a, T, A: Allocator> From<Vec<T, A>> for SpanOrVec<'a, T, A> {
    #[inline]
    fn from(vec: Vec<T, A>) -> Self {
        Self::from_vec(vec)
    }
}

impl<'a, T: Clone, A: Allocator + Clone> From<&Vec<T, A>> for SpanOrVec<'a, T, A> {
    #[inline]
    fn from(vec: &Vec<T, A>) -> Self {
        Self::from_slice_in(vec.as_slice(), vec.allocator().clone())
    }
}

impl<'a, T, const N: usize> From<[T; N]> for SpanOrVec<'a, T, Global> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self::from_array_in(data, Global)
    }
}

impl<'a, T: Clone> From<&[T]> for SpanOrVec<'a, T, Global> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<'a, T> From<&'a mut [T]> for SpanOrVec<'a, T, Global> {
    #[inline]
    fn from(data: &'a mut [T]) -> Self {
        Self::from_span(data)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for SpanOrVec<'a, T, Global> {
    #[inline]
    fn from(data: &'a mut [T; N]) -> Self {
        Self::from_span(data.as_mut_slice())
    }
}

impl<'a, T: Clone, A: Allocator> From<SpanOrVec<'a, T, A>> for Vec<T, A> {
    #[inline]
    fn from(vec: SpanOrVec<'a, T, A>) -> Self {
        vec.into_vec()
    }
}

impl<'a, 'b, T1, A1, T2, A2> PartialEq<SpanOrVec<'b, T2, A2>> for SpanOrVec<'a, T1, A1>
where
    A1: Allocator,
    A2: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &SpanOrVec<'b, T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<'a, T: Eq, A: Allocator> Eq for SpanOrVec<'a, T, A> {}

impl<'a, 'b, T, A1, A2> PartialOrd<SpanOrVec<'b, T, A2>> for SpanOrVec<'a, T, A1>
where
    A1: Allocator,
    A2: Allocator,
    T: PartialOrd,
{
    #[inline]
    fn partial_cmp(&self, other: &SpanOrVec<'b, T, A2>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<'a, T: Ord, A: Allocator> Ord for SpanOrVec<'a, T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<'a, T1, A1, T2> PartialEq<[T2]> for SpanOrVec<'a, T1, A1>
where
    A1: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_slice().eq(other)
    }
}

impl<'a, T1, A1, T2> PartialEq<&[T2]> for SpanOrVec<'a, T1, A1>
where
    A1: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_slice().eq(*other)
    }
}

impl<'a, T1, A1, T2> PartialEq<&mut [T2]> for SpanOrVec<'a, T1, A1>
where
    A1: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &&mut [T2]) -> bool {
        self.as_slice().eq(&**other)
    }
}

impl<'a, T1, A1, T2, const N: usize> PartialEq<[T2; N]> for SpanOrVec<'a, T1, A1>
where
    A1: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<'a, T1, A1, T2, const N: usize> PartialEq<&[T2; N]> for SpanOrVec<'a, T1, A1>
where
    A1: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_slice().eq(&other[..])
    }
}

impl<'a, T1, A1, T2, A2> PartialEq<Vec<T2, A2>> for SpanOrVec<'a, T1, A1>
where
    A1: Allocator,
    A2: Allocator,
    T1: PartialEq<T2>,
{
    #[inline]
    fn eq(&self, other: &Vec<T2, A2>) -> bool {
        self.as_slice().eq(other.as_slice())
    }
}

impl<'b, T1, T2, A2> PartialEq<SpanOrVec<'b, T2, A2>> for [T1]
where
    A2: Allocator,
    T2: PartialEq<T1>,
{
    #[inline]
    fn eq(&self, other: &SpanOrVec<'b, T2, A2>) -> bool {
        other.eq(self)
    }
}

impl<'b, T1, T2, A2> PartialEq<SpanOrVec<'b, T2, A2>> for &[T1]
where
    A2: Allocator,
    T2: PartialEq<T1>,
{
    #[inline]
    fn eq(&self, other: &SpanOrVec<'b, T2, A2>) -> bool {
        other.eq(self)
    }
}

impl<'b, T1, T2, A2> PartialEq<SpanOrVec<'b, T2, A2>> for &mut [T1]
where
    A2: Allocator,
    T2: PartialEq<T1>,
{
    #[inline]
    fn eq(&self, other: &SpanOrVec<'b, T2, A2>) -> bool {
        other.eq(self)
    }
}

impl<'b, T1, T2, A2, const N: usize> PartialEq<SpanOrVec<'b, T2, A2>> for [T1; N]
where
    A2: Allocator,
    T2: PartialEq<T1>,
{
    #[inline]
    fn eq(&self, other: &SpanOrVec<'b, T2, A2>) -> bool {
        other.eq(self)
    }
}

impl<'b, T1, A1, T2, A2> PartialEq<SpanOrVec<'b, T2, A2>> for Vec<T1, A1>
where
    A1: Allocator,
    A2: Allocator,
    T2: PartialEq<T1>,
{
    #[inline]
    fn eq(&self, other: &SpanOrVec<'b, T2, A2>) -> bool {
        other.eq(self)
    }
}
