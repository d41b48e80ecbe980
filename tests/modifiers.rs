use core::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use rstest::rstest;

use span_or_vec::SpanOrVec;

mod common;

use common::{TestAlloc, Tracked};

#[derive(Debug, Clone, Copy)]
enum Shrink {
    Erase,
    EraseRange,
    PopBack,
    Pop,
    Remove,
    Clear,
    Truncate,
}

fn shrink_by_op(v: &mut SpanOrVec<'_, u32>, op: Shrink) {
    match op {
        Shrink::Erase => v.erase(1),
        Shrink::EraseRange => v.erase_range(1..3),
        Shrink::PopBack => v.pop_back(),
        Shrink::Pop => assert_eq!(v.pop(), Some(5)),
        Shrink::Remove => assert_eq!(v.remove(0), 1),
        Shrink::Clear => v.clear(),
        Shrink::Truncate => v.truncate(2),
    }
}

#[rstest]
#[case::erase(Shrink::Erase, &[1, 3, 4, 5])]
#[case::erase_range(Shrink::EraseRange, &[1, 4, 5])]
#[case::pop_back(Shrink::PopBack, &[1, 2, 3, 4])]
#[case::pop(Shrink::Pop, &[1, 2, 3, 4])]
#[case::remove(Shrink::Remove, &[2, 3, 4, 5])]
#[case::clear(Shrink::Clear, &[])]
#[case::truncate(Shrink::Truncate, &[1, 2])]
fn shrinking_never_promotes(#[case] op: Shrink, #[case] expect: &[u32]) {
    let mut buf = [1u32, 2, 3, 4, 5];
    let ptr = buf.as_ptr();
    let mut v = SpanOrVec::from_span(&mut buf);
    shrink_by_op(&mut v, op);
    assert!(v.is_borrowed());
    assert_eq!(v.capacity(), 5);
    assert_eq!(v.as_ptr(), ptr);
    assert_eq!(v, expect);
}

#[rstest]
#[case::erase(Shrink::Erase, &[1, 3, 4, 5])]
#[case::erase_range(Shrink::EraseRange, &[1, 4, 5])]
#[case::pop_back(Shrink::PopBack, &[1, 2, 3, 4])]
#[case::pop(Shrink::Pop, &[1, 2, 3, 4])]
#[case::remove(Shrink::Remove, &[2, 3, 4, 5])]
#[case::clear(Shrink::Clear, &[])]
#[case::truncate(Shrink::Truncate, &[1, 2])]
fn shrinking_owned(#[case] op: Shrink, #[case] expect: &[u32]) {
    let mut v = SpanOrVec::from_slice(&[1u32, 2, 3, 4, 5]);
    shrink_by_op(&mut v, op);
    assert!(v.is_owned());
    assert_eq!(v.capacity(), 5);
    assert_eq!(v, expect);
}

#[test]
fn erase_rotates_within_caller_buffer() {
    let mut buf = [1, 2, 3, 4, 5];
    let mut v = SpanOrVec::from_span(&mut buf);
    v.erase_range(..2);
    assert_eq!(v, [3, 4, 5]);
    v.erase_range(1..1);
    assert_eq!(v, [3, 4, 5]);
    drop(v);
    // erased values are moved past the live end, not dropped
    assert_eq!(buf, [3, 4, 5, 1, 2]);
}

#[test]
fn erase_range_inclusive() {
    let mut buf = [1, 2, 3, 4, 5];
    let mut v = SpanOrVec::from_span(&mut buf);
    v.erase_range(1..=3);
    assert_eq!(v, [1, 5]);
    v.erase_range(..);
    assert!(v.is_empty());
    assert!(v.is_borrowed());
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn erase_out_of_bounds() {
    let mut buf = [1, 2];
    let mut v = SpanOrVec::from_span(&mut buf);
    v.erase(2);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn erase_range_past_end() {
    let mut v = SpanOrVec::from_slice(&[1, 2]);
    v.erase_range(1..3);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn insert_past_end() {
    let mut buf = [1, 2, 0];
    let mut v = SpanOrVec::from_span(&mut buf);
    v.truncate(2);
    v.insert(3, 9);
}

#[test]
fn pop_back_empty_is_noop() {
    let mut buf: [u8; 2] = [1, 2];
    let mut v = SpanOrVec::from_span(&mut buf);
    v.clear();
    v.pop_back();
    assert!(v.is_empty());
    assert_eq!(v.pop(), None);
    assert!(v.is_borrowed());
}

#[test]
fn insert_list_past_ceiling() {
    let alloc = TestAlloc::new();
    let mut buf = [1, 2, 3, 4, 5];
    let mut v = SpanOrVec::from_span_in(&mut buf, &alloc);
    v.insert_iter(1, [6, 7]);
    assert!(v.is_owned());
    assert_eq!(v, [1, 6, 7, 2, 3, 4, 5]);
    assert_eq!(v.capacity(), 7);
    assert_eq!(alloc.allocations(), 1);
}

#[rstest]
#[case::borrowed(true)]
#[case::owned(false)]
fn zero_count_insert_is_noop(#[case] borrowed: bool) {
    let alloc = TestAlloc::new();
    let mut buf = [1u8, 2, 3];
    let mut v = if borrowed {
        SpanOrVec::from_span_in(&mut buf, &alloc)
    } else {
        SpanOrVec::from_slice_in(&[1, 2, 3], &alloc)
    };
    let ptr = v.as_ptr();
    let allocs = alloc.allocations();
    v.insert_slice(1, &[]);
    v.insert_n(3, 0, 9);
    v.insert_iter(0, core::iter::empty());
    v.emplace(2, []);
    v.extend_from_slice(&[]);
    assert_eq!(v.is_borrowed(), borrowed);
    assert_eq!(v.as_ptr(), ptr);
    assert_eq!(v.capacity(), 3);
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(alloc.allocations(), allocs);
}

#[test]
fn owned_insert_forms() {
    let mut v = SpanOrVec::from_slice(&[1, 5]);
    v.insert(1, 2);
    v.insert_slice(2, &[3, 4]);
    v.emplace_back([6, 7]);
    v.insert_n(0, 2, 0);
    assert_eq!(v, [0, 0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn borrowed_pop_and_remove_clone_out() {
    let live = Cell::new(0);
    let mut buf = [
        Tracked::new(1, &live),
        Tracked::new(2, &live),
        Tracked::new(3, &live),
    ];
    let mut v = SpanOrVec::from_span(&mut buf);
    let last = v.pop().unwrap();
    assert_eq!(last.value, 3);
    let first = v.remove(0);
    assert_eq!(first.value, 1);
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].value, 2);
    // the caller still owns all three originals
    assert_eq!(live.get(), 5);
    drop((last, first, v));
    assert_eq!(live.get(), 3);
    assert_eq!(buf[0].value, 2);
}

#[test]
fn owned_elements_dropped_once() {
    let live = Cell::new(0);
    let mut buf = [Tracked::new(1, &live), Tracked::new(2, &live)];
    let mut v = SpanOrVec::from_span(&mut buf);
    v.push(Tracked::new(3, &live));
    assert!(v.is_owned());
    // two originals, two copies, one pushed
    assert_eq!(live.get(), 5);
    v.erase(0);
    assert_eq!(live.get(), 4);
    v.truncate(1);
    assert_eq!(live.get(), 3);
    drop(v);
    assert_eq!(live.get(), 2);
}

#[test]
fn borrowed_truncate_does_not_drop() {
    let live = Cell::new(0);
    let mut buf = [Tracked::new(1, &live), Tracked::new(2, &live)];
    let mut v = SpanOrVec::from_span(&mut buf);
    v.clear();
    assert_eq!(live.get(), 2);
    v.push(Tracked::new(5, &live));
    // the replaced original is dropped by assignment
    assert_eq!(live.get(), 2);
    drop(v);
    assert_eq!(buf[0].value, 5);
    assert_eq!(buf[1].value, 2);
}

#[derive(Debug, PartialEq)]
struct Fragile(u32);

impl Clone for Fragile {
    fn clone(&self) -> Self {
        if self.0 == 99 {
            panic!("clone failed");
        }
        Fragile(self.0)
    }
}

#[rstest]
#[case::borrowed(true)]
#[case::owned(false)]
fn insert_with_panicking_clone_keeps_contents(#[case] borrowed: bool) {
    let mut buf = [Fragile(1), Fragile(2), Fragile(3), Fragile(0), Fragile(0)];
    let mut v = if borrowed {
        let mut v = SpanOrVec::from_span(&mut buf);
        v.truncate(3);
        v
    } else {
        SpanOrVec::from_iter([Fragile(1), Fragile(2), Fragile(3)])
    };
    let values = [Fragile(7), Fragile(99)];
    let res = panic::catch_unwind(AssertUnwindSafe(|| v.insert_slice(1, &values)));
    assert!(res.is_err());
    assert_eq!(v.is_borrowed(), borrowed);
    assert_eq!(v, [Fragile(1), Fragile(2), Fragile(3)]);

    v.insert_slice(1, &[Fragile(7), Fragile(8)]);
    assert_eq!(
        v,
        [Fragile(1), Fragile(7), Fragile(8), Fragile(2), Fragile(3)]
    );
    drop(v);
    assert_eq!(buf[0], Fragile(1));
}
