use super::*;
use crate::kernel::{
    BitLoop, CHUNK_SIZE, Hardware, Kernighan, SelectedPopcount, TableKernel, WordKernel,
    count_bits_naive,
};

/// Deterministic pseudo-random bytes (64-bit LCG, top byte of state).
fn pseudo_random(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
        .collect()
}

fn kernels() -> Vec<Box<dyn WordKernel>> {
    vec![
        Box::new(BitLoop),
        Box::new(TableKernel::new()),
        Box::new(Kernighan),
        Box::new(Hardware::<SelectedPopcount>::new()),
    ]
}

// ──────────────────────────────────────────────────
// Serial reduction
// ──────────────────────────────────────────────────

#[test]
fn test_reduce_empty() {
    for k in kernels() {
        assert_eq!(reduce(k.as_ref(), b""), 0, "{}", k.name());
    }
}

#[test]
fn test_reduce_shorter_than_chunk() {
    let data = [0xFFu8; CHUNK_SIZE - 1];
    for k in kernels() {
        assert_eq!(reduce(k.as_ref(), &data), 8 * (CHUNK_SIZE as u64 - 1));
    }
}

#[test]
fn test_reduce_exact_chunks() {
    let data = [0xFFu8; CHUNK_SIZE * 4];
    for k in kernels() {
        assert_eq!(reduce(k.as_ref(), &data), 8 * 4 * CHUNK_SIZE as u64);
    }
}

#[test]
fn test_reduce_every_length_matches_naive() {
    let data = pseudo_random(4 * CHUNK_SIZE + 7, 1);
    for len in 0..=data.len() {
        let expected = count_bits_naive(&data[..len]);
        for k in kernels() {
            assert_eq!(reduce(k.as_ref(), &data[..len]), expected, "{} len={}", k.name(), len);
        }
    }
}

#[test]
fn test_reduce_every_start_offset() {
    // Shifted starts put chunk windows at non-word-aligned addresses.
    let data = pseudo_random(1024 + CHUNK_SIZE, 2);
    for offset in 0..CHUNK_SIZE {
        let slice = &data[offset..offset + 1000];
        let expected = count_bits_naive(slice);
        for k in kernels() {
            assert_eq!(reduce(k.as_ref(), slice), expected, "{} offset={}", k.name(), offset);
        }
    }
}

#[test]
fn test_reduce_remainder_counted() {
    // Only the tail has bits set.
    let mut data = vec![0u8; CHUNK_SIZE * 3 + 3];
    let n = data.len();
    data[n - 1] = 0xFF;
    data[n - 2] = 0x01;
    assert_eq!(reduce(&Kernighan, &data), 9);
}

// ──────────────────────────────────────────────────
// Partition plan
// ──────────────────────────────────────────────────

fn assert_exact_cover(plan: &Partition) {
    let mut cursor = 0;
    for span in plan.spans() {
        assert_eq!(span.start, cursor, "gap or overlap in {:?}", plan);
        assert_eq!(span.len % CHUNK_SIZE, 0);
        cursor = span.end();
    }
    assert_eq!(cursor, plan.covered);
    let leftover = plan.leftover();
    assert_eq!(leftover.start, plan.covered);
    assert_eq!(leftover.end(), plan.len);
}

#[test]
fn test_plan_even_division() {
    let plan = Partition::plan(CHUNK_SIZE * 8, 4);
    assert_eq!(plan.chunks_per_worker, 2);
    assert_eq!(plan.span_len, 2 * CHUNK_SIZE);
    assert_eq!(plan.covered, 8 * CHUNK_SIZE);
    assert!(plan.leftover().is_empty());
    assert_exact_cover(&plan);
}

#[test]
fn test_plan_uneven_division_and_tail() {
    // 10 chunks over 4 workers: 2 each, 2 chunks + 3 bytes left over.
    let plan = Partition::plan(CHUNK_SIZE * 10 + 3, 4);
    assert_eq!(plan.chunks_per_worker, 2);
    assert_eq!(plan.covered, 8 * CHUNK_SIZE);
    assert_eq!(plan.leftover().len, 2 * CHUNK_SIZE + 3);
    assert_exact_cover(&plan);
}

#[test]
fn test_plan_oversubscribed() {
    let plan = Partition::plan(CHUNK_SIZE * 3, 16);
    assert_eq!(plan.chunks_per_worker, 0);
    assert_eq!(plan.covered, 0);
    assert!(plan.spans().all(|s| s.is_empty()));
    assert_eq!(plan.leftover().len, 3 * CHUNK_SIZE);
    assert_exact_cover(&plan);
}

#[test]
fn test_plan_zero_workers_is_single_span() {
    let plan = Partition::plan(CHUNK_SIZE * 5 + 1, 0);
    assert_eq!(plan.worker_count, 1);
    assert_eq!(plan.span(0), Span { start: 0, len: 5 * CHUNK_SIZE });
    assert_eq!(plan.leftover().len, 1);
    assert_exact_cover(&plan);
}

#[test]
fn test_plan_many_shapes() {
    for len in [0, 1, CHUNK_SIZE, 97, 1000, 4096 + 5] {
        for workers in 0..12 {
            assert_exact_cover(&Partition::plan(len, workers));
        }
    }
}

// ──────────────────────────────────────────────────
// Parallel reduction
// ──────────────────────────────────────────────────

#[test]
fn test_parallel_matches_serial_for_all_worker_counts() {
    let data = pseudo_random(10_000 + 3, 3);
    let expected = count_bits_naive(&data);
    for k in kernels() {
        for workers in 0..=17 {
            assert_eq!(
                parallel_reduce(k.as_ref(), &data, workers),
                expected,
                "{} workers={}",
                k.name(),
                workers
            );
        }
    }
}

#[test]
fn test_parallel_oversubscription() {
    let data = pseudo_random(CHUNK_SIZE * 2 + 1, 4);
    let expected = count_bits_naive(&data);
    assert_eq!(parallel_reduce(&Kernighan, &data, 1000), expected);
}

#[test]
fn test_parallel_empty() {
    for workers in 0..4 {
        assert_eq!(parallel_reduce(&TableKernel::new(), b"", workers), 0);
    }
}

#[test]
fn test_parallel_all_ones() {
    let data = vec![0xFFu8; 65_537];
    assert_eq!(
        parallel_reduce(&Hardware::<SelectedPopcount>::new(), &data, 8),
        8 * 65_537
    );
}

#[test]
fn test_parallel_unaligned_start() {
    let data = pseudo_random(50_000, 5);
    let shifted = &data[1..];
    assert_eq!(
        parallel_reduce(&TableKernel::new(), shifted, 6),
        count_bits_naive(shifted)
    );
}

#[test]
fn test_parallel_reduce_in_pool() {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(3)
        .build()
        .unwrap();
    let data = pseudo_random(12_345, 6);
    assert_eq!(
        parallel_reduce_in(&pool, &Kernighan, &data, 3),
        count_bits_naive(&data)
    );
}
