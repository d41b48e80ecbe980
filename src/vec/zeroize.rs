use zeroize::Zeroize;

use crate::alloc::Allocator;

use super::{Inner, SpanOrVec};

/// Zeroing keeps the current mode. An owned buffer is cleared and its whole
/// capacity overwritten. A borrowed container overwrites the caller's buffer
/// up to the ceiling, including elements past the current length.
impl<'a, T: Zeroize, A: Allocator> Zeroize for SpanOrVec<'a, T, A> {
    fn zeroize(&mut self) {
        match &mut self.inner {
            Inner::Span(span) => span.zeroize_all(),
            Inner::Vec(vec) => {
                vec.iter_mut().zeroize();
                vec.clear();
                vec.spare_capacity_mut().zeroize();
            }
        }
    }
}
