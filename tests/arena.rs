// Unit tests for the bump arena (arena.rs).

use partmatch::arena::{Arena, ALIGNMENT};

#[test]
fn allocations_start_on_the_alignment_boundary() {
    let arena = Arena::with_capacity(4 * ALIGNMENT).unwrap();
    for _ in 0..3 {
        let slice = arena.alloc(1).unwrap();
        assert_eq!(slice.as_ptr() as usize % ALIGNMENT, 0);
    }
}

#[test]
fn allocations_are_disjoint() {
    let arena = Arena::with_capacity(4 * ALIGNMENT).unwrap();
    let a = arena.alloc(8).unwrap();
    let b = arena.alloc(8).unwrap();
    a.fill(0xAA);
    b.fill(0xBB);
    assert!(a.iter().all(|&x| x == 0xAA));
    assert!(b.iter().all(|&x| x == 0xBB));
}

#[test]
fn allocations_are_zeroed() {
    let arena = Arena::with_capacity(ALIGNMENT).unwrap();
    let slice = arena.alloc(ALIGNMENT).unwrap();
    assert!(slice.iter().all(|&x| x == 0));
}

#[test]
fn exhaustion_returns_none() {
    let arena = Arena::with_capacity(2 * ALIGNMENT).unwrap();
    assert!(arena.alloc(ALIGNMENT + 1).is_some()); // spans both slots
    assert!(arena.alloc(1).is_none()); // next slot would start past the end
}

#[test]
fn used_advances_with_padding() {
    let arena = Arena::with_capacity(4 * ALIGNMENT).unwrap();
    assert_eq!(arena.used(), 0);
    arena.alloc(1).unwrap();
    assert_eq!(arena.used(), 1);
    arena.alloc(1).unwrap();
    // Second allocation starts at the next boundary.
    assert_eq!(arena.used(), ALIGNMENT + 1);
    assert_eq!(arena.capacity(), 4 * ALIGNMENT);
}

#[test]
fn zero_sized_allocation_is_allowed() {
    let arena = Arena::with_capacity(ALIGNMENT).unwrap();
    let slice = arena.alloc(0).unwrap();
    assert!(slice.is_empty());
}

#[test]
fn concurrent_allocations_do_not_overlap() {
    let arena = Arena::with_capacity(64 * 1024).unwrap();
    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for worker in 0u8..8 {
            let arena = &arena;
            handles.push(scope.spawn(move || {
                let mut slices = Vec::new();
                for _ in 0..16 {
                    let slice = arena.alloc(16).unwrap();
                    slice.fill(worker);
                    slices.push(slice);
                }
                slices
            }));
        }
        for (worker, handle) in handles.into_iter().enumerate() {
            for slice in handle.join().unwrap() {
                assert!(slice.iter().all(|&x| x == worker as u8));
            }
        }
    });
}
