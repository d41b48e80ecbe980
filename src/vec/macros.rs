/// Create an owned [`SpanOrVec`](crate::SpanOrVec), mirroring `vec!`.
///
/// ```
/// use span_or_vec::{allocator_api2::alloc::Global, span_or_vec};
///
/// let v = span_or_vec![1, 2, 3];
/// assert!(v.is_owned());
/// let z = span_or_vec![0u8; 4];
/// assert_eq!(z, [0, 0, 0, 0]);
/// let a = span_or_vec![in Global; 'x', 'y'];
/// assert_eq!(a.capacity(), 2);
/// ```
#[macro_export]
macro_rules! span_or_vec {
    (in $alloc:expr $(;)?) => (
        $crate::vec::SpanOrVec::new_in($alloc)
    );
    (in $alloc:expr; $elem:expr; $n:expr) => (
        $crate::vec::SpanOrVec::from_elem_in($elem, $n, $alloc)
    );
    (in $alloc:expr; $($x:expr),+ $(,)?) => (
        $crate::vec::SpanOrVec::from_array_in([$($x),+], $alloc)
    );
    () => (
        $crate::vec::SpanOrVec::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::SpanOrVec::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::vec::SpanOrVec::from_array_in([$($x),+], $crate::alloc::Global)
    );
}
