use super::*;
use crate::kernel::count_bits_naive;

// ──────────────────────────────────────────────────
// Table contents
// ──────────────────────────────────────────────────

#[test]
fn test_table_matches_bit_loop_for_every_byte() {
    let table = LookupTable::build();
    for v in 0..=255u8 {
        assert_eq!(
            table.lookup(v) as u64,
            count_bits_naive(&[v]),
            "byte={:#04x}",
            v
        );
    }
}

#[test]
fn test_table_boundary_entries() {
    let table = LookupTable::build();
    assert_eq!(table.lookup(0x00), 0);
    assert_eq!(table.lookup(0xFF), 8);
    assert_eq!(table.lookup(0x80), 1);
    assert_eq!(table.lookup(0x01), 1);
    assert_eq!(table.lookup(0xAA), 4);
    assert_eq!(table.lookup(0x55), 4);
}

#[test]
fn test_table_entries_in_range() {
    let table = LookupTable::build();
    assert!(table.as_array().iter().all(|&c| c <= 8));
}

#[test]
fn test_table_count_bytes() {
    let table = LookupTable::build();
    assert_eq!(table.count_bytes(b""), 0);
    assert_eq!(table.count_bytes(&[0xFF; 10]), 80);
    assert_eq!(table.count_bytes(&[0x0F, 0xF0, 0x00]), 8);
}

// ──────────────────────────────────────────────────
// Shared initialization
// ──────────────────────────────────────────────────

#[test]
fn test_initialize_is_idempotent() {
    let a = initialize();
    let b = initialize();
    assert!(std::ptr::eq(a, b));
    assert!(is_initialized());
}

#[test]
fn test_shared_table_equals_fresh_build() {
    assert_eq!(initialize(), &LookupTable::build());
}

#[test]
fn test_free_lookup() {
    assert_eq!(lookup(0x00), 0);
    assert_eq!(lookup(0x07), 3);
    assert_eq!(lookup(0xFF), 8);
}

#[test]
fn test_concurrent_first_use_sees_complete_table() {
    let expected = LookupTable::build();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| initialize().as_array().to_vec()))
            .collect();
        for h in handles {
            let seen = h.join().unwrap();
            assert_eq!(seen.as_slice(), expected.as_array().as_slice());
        }
    });
}
