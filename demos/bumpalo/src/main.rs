use allocator_api2::vec::Vec;
use bumpalo::Bump;
use span_or_vec::SpanOrVec;

fn main() {
    let bump = Bump::new();

    let mut buf = [0u32; 10];
    let mut vec = SpanOrVec::from_span_in(&mut buf, &bump);
    vec.clear();
    vec.extend(0..10);
    assert!(vec.is_borrowed());

    // outgrowing the stack buffer moves the contents into the arena
    vec.extend(10..10000);
    assert!(vec.is_owned());
    assert_eq!(vec.len(), 10000);
    assert!(bump.allocated_bytes() > 0);

    let owned: Vec<u32, &Bump> = vec.into_vec();
    assert_eq!(owned[9999], 9999);
    assert_eq!(buf[9], 9);
}
