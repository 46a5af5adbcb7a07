//! # Randomized FIFO Workload
//!
//! Drives the allocator with a seeded mix of allocations and in-order frees
//! and checks that live regions stay inside the pool, never overlap, and
//! keep their contents until freed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ring_alloc::{Region, RingAllocator, RingError};
use std::collections::VecDeque;

const POOL_SIZE: usize = 1024;
const MAX_OUTSTANDING: usize = 32;
const STEPS: usize = 20_000;

/// Fill byte for the n-th allocation.
fn tag(serial: u64) -> u8 {
    (serial % 251) as u8 + 1
}

fn free_oldest(ring: &mut RingAllocator, live: &mut VecDeque<(Region, u8)>) {
    let (region, tag) = live.pop_front().expect("free_oldest called with nothing live");

    assert!(
        ring.bytes(region).unwrap().iter().all(|&b| b == tag),
        "contents of {region:?} were overwritten while live"
    );

    ring.free(region).unwrap();
}

fn run_workload(seed: u64, max_request: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ring = RingAllocator::new(POOL_SIZE, MAX_OUTSTANDING).unwrap();
    let mut live: VecDeque<(Region, u8)> = VecDeque::new();
    let mut serial = 0u64;
    let mut successes = 0usize;

    for _ in 0..STEPS {
        if live.is_empty() || rng.gen_bool(0.6) {
            let size = rng.gen_range(1..=max_request);

            match ring.allocate(size) {
                Ok(region) => {
                    assert_eq!(region.size(), size);
                    assert!(region.end() <= POOL_SIZE);
                    for (other, _) in &live {
                        assert!(!region.overlaps(*other), "{region:?} overlaps live {other:?}");
                    }

                    serial += 1;
                    let fill = tag(serial);
                    ring.bytes_mut(region).unwrap().fill(fill);
                    live.push_back((region, fill));
                    successes += 1;
                }
                Err(err) => {
                    assert!(err.is_recoverable(), "unexpected allocation error: {err}");
                    if let RingError::CapacityExceeded { .. } = err {
                        assert_eq!(live.len(), MAX_OUTSTANDING);
                    }
                    if !live.is_empty() {
                        free_oldest(&mut ring, &mut live);
                    }
                }
            }
        } else {
            free_oldest(&mut ring, &mut live);
        }

        assert_eq!(ring.live_count(), live.len());
        assert!(ring.live_offsets().eq(live.iter().map(|(r, _)| r.offset())));
    }

    while !live.is_empty() {
        free_oldest(&mut ring, &mut live);
    }

    assert!(successes > STEPS / 4, "workload made too little progress: {successes}");
    assert_eq!((ring.head(), ring.tail(), ring.carry_flag()), (0, 0, false));
    assert!(ring.allocate(POOL_SIZE).is_ok());
}

#[test]
fn test_random_small_requests() {
    run_workload(0x5EED, 64);
}

#[test]
fn test_random_large_requests() {
    run_workload(0xC0FFEE, 512);
}

#[test]
fn test_random_many_seeds() {
    for seed in 0..16 {
        run_workload(seed, 200);
    }
}
