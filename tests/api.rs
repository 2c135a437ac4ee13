//! Facade-level behavior that doesn't depend on which algorithm is active.

use inplace_heap::{AlgorithmKind, CreateError, Facade};

const ALGORITHMS: [AlgorithmKind; 2] = [AlgorithmKind::Segregated, AlgorithmKind::Buddy];

#[test]
fn kind_matches_the_constructor_used() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 4096];
        let facade = Facade::create(&mut heap, kind).unwrap();
        assert_eq!(facade.kind(), kind);
    }
}

#[test]
fn a_too_small_region_is_rejected_for_every_algorithm() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 2];
        assert_eq!(Facade::create(&mut heap, kind).unwrap_err(), CreateError::RegionTooSmall);
    }
}

#[test]
fn basic_alloc_then_free_round_trips() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 1024 * 1024];
        let mut facade = Facade::create(&mut heap, kind).unwrap();

        let ptr = facade.alloc(64).expect("allocation should succeed");
        assert_eq!(facade.stats().total_allocations, 1);
        assert_eq!(facade.stats().failed_allocations, 0);

        unsafe { facade.free(ptr) };
        assert_eq!(facade.stats().total_frees, 1);
        assert_eq!(facade.stats().current_allocated, 0);
        assert_eq!(facade.stats().current_requested, 0);
    }
}

#[test]
fn multiple_allocations_stay_within_bounds_of_current_requested() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 1024 * 1024];
        let mut facade = Facade::create(&mut heap, kind).unwrap();

        let sizes = [16, 100, 4, 256, 1];
        let mut live = alloc_all(&mut facade, &sizes);

        let expected_requested: usize = sizes.iter().sum();
        assert_eq!(facade.stats().current_requested, expected_requested);
        assert!(facade.stats().current_allocated >= expected_requested);
        assert!(facade.stats().current_allocated <= facade.heap_size());

        for ptr in live.drain(..) {
            unsafe { facade.free(ptr) };
        }
        assert_eq!(facade.stats().current_requested, 0);
    }
}

#[test]
fn zero_size_allocation_always_fails_without_counting_a_failure() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 4096];
        let mut facade = Facade::create(&mut heap, kind).unwrap();
        assert!(facade.alloc(0).is_none());
        assert_eq!(facade.stats().failed_allocations, 0);
        assert_eq!(facade.stats().total_allocations, 0);
    }
}

#[test]
fn exhausting_the_heap_is_reported_as_a_failed_allocation() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 256];
        let mut facade = Facade::create(&mut heap, kind).unwrap();
        assert!(facade.alloc(10_000).is_none());
        assert_eq!(facade.stats().failed_allocations, 1);
    }
}

#[test]
fn reset_stats_zeroes_everything_but_heap_size() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 4096];
        let mut facade = Facade::create(&mut heap, kind).unwrap();
        let _ = facade.alloc(32);
        facade.reset_stats();

        let stats = facade.stats();
        assert_eq!(stats.total_allocations, 0);
        assert_eq!(stats.total_frees, 0);
        assert_eq!(stats.failed_allocations, 0);
        assert_eq!(stats.heap_size, facade.heap_size());
    }
}

#[test]
fn peak_counters_never_decrease_across_a_free() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 4096];
        let mut facade = Facade::create(&mut heap, kind).unwrap();

        let a = facade.alloc(200).unwrap();
        let peak_after_a = facade.stats().peak_requested;
        unsafe { facade.free(a) };
        assert_eq!(facade.stats().peak_requested, peak_after_a);
    }
}

#[test]
fn realloc_preserves_no_guarantee_about_old_bytes_but_returns_usable_memory() {
    for kind in ALGORITHMS {
        let mut heap = [0u8; 4096];
        let mut facade = Facade::create(&mut heap, kind).unwrap();

        let ptr = facade.alloc(8).unwrap();
        unsafe { ptr.as_ptr().write_bytes(0x42, 8) };
        let resized = unsafe { facade.realloc(ptr, 200) }.expect("resize should succeed");
        unsafe { resized.as_ptr().write_bytes(0x00, 200) };
        assert_eq!(facade.stats().current_requested, 200);
    }
}

fn alloc_all(facade: &mut Facade<'_>, sizes: &[usize]) -> Vec<core::ptr::NonNull<u8>> {
    sizes
        .iter()
        .map(|&size| facade.alloc(size).expect("allocation should succeed"))
        .collect()
}
