//! Table Tests
//!
//! Tests verify:
//! - Field validation
//! - Find/insert/overwrite/remove
//! - Duplicate rejection
//! - Compaction on remove
//! - Each overflow policy at capacity

use ictkv::config::{Config, OverflowPolicy};
use ictkv::table::{Entry, Field, Table, MAX_ELEMENT, MAX_FIELD_LEN};
use ictkv::IctError;

// =============================================================================
// Helper Functions
// =============================================================================

fn entry(key: &str, value: &str) -> Entry {
    Entry::new(
        Field::new(key.as_bytes()).unwrap(),
        Field::new(value.as_bytes()).unwrap(),
    )
}

fn keys(table: &Table) -> Vec<String> {
    table.iter().map(|e| e.key.to_string()).collect()
}

fn fill(table: &mut Table, count: usize) {
    for i in 0..count {
        table
            .insert(entry(&format!("key{}", i), &format!("value{}", i)))
            .unwrap();
    }
}

// =============================================================================
// Field Tests
// =============================================================================

#[test]
fn test_field_accepts_bounds() {
    assert!(Field::new(b"k").is_ok());
    assert!(Field::new(&[b'v'; MAX_FIELD_LEN]).is_ok());
}

#[test]
fn test_field_rejects_empty_and_oversized() {
    assert!(matches!(Field::new(b""), Err(IctError::Malformed(_))));
    assert!(matches!(
        Field::new(&[b'v'; MAX_FIELD_LEN + 1]),
        Err(IctError::Malformed(_))
    ));
}

#[test]
fn test_field_rejects_delimiter_and_nul() {
    assert!(matches!(Field::new(b"a|b"), Err(IctError::Malformed(_))));
    assert!(matches!(Field::new(b"a\0b"), Err(IctError::Malformed(_))));
}

#[test]
fn test_field_display_and_compare() {
    let field = Field::new(b"hello").unwrap();
    assert_eq!(field.to_string(), "hello");
    assert_eq!(field.len(), 5);
    assert!(field == *b"hello".as_slice());
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_table_is_empty() {
    let table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
    assert_eq!(table.max_index(), None);
    assert_eq!(table.capacity(), 50);
}

#[test]
fn test_from_config() {
    let config = Config::builder()
        .capacity(7)
        .overflow_policy(OverflowPolicy::Reject)
        .build();
    let table = Table::from_config(&config);

    assert_eq!(table.capacity(), 7);
    assert_eq!(table.overflow_policy(), OverflowPolicy::Reject);
}

#[test]
fn test_insert_and_find() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);

    assert_eq!(table.insert(entry("a", "1")).unwrap(), 0);
    assert_eq!(table.insert(entry("b", "2")).unwrap(), 1);

    assert_eq!(table.find(b"a"), Some(0));
    assert_eq!(table.find(b"b"), Some(1));
    assert_eq!(table.find(b"c"), None);
    assert_eq!(table.max_index(), Some(1));
}

#[test]
fn test_find_is_exact_match() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    table.insert(entry("key", "v")).unwrap();

    assert_eq!(table.find(b"ke"), None);
    assert_eq!(table.find(b"key1"), None);
    assert_eq!(table.find(b"KEY"), None);
}

#[test]
fn test_insert_duplicate_rejected() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    table.insert(entry("k", "v1")).unwrap();

    assert!(matches!(table.insert(entry("k", "v2")), Err(IctError::Duplicate)));
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(0).unwrap().value.as_bytes(), b"v1");
}

#[test]
fn test_overwrite_in_place() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    table.insert(entry("a", "1")).unwrap();
    table.insert(entry("b", "2")).unwrap();

    table.overwrite(0, entry("a", "updated")).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0).unwrap().value.as_bytes(), b"updated");
    assert_eq!(keys(&table), vec!["a", "b"]);
}

#[test]
fn test_overwrite_out_of_range() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    assert!(matches!(table.overwrite(0, entry("a", "1")), Err(IctError::NotFound)));
}

#[test]
fn test_remove_compacts() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    table.insert(entry("A", "1")).unwrap();
    table.insert(entry("B", "2")).unwrap();
    table.insert(entry("C", "3")).unwrap();

    let removed = table.remove(1).unwrap();

    assert_eq!(removed, entry("B", "2"));
    assert_eq!(keys(&table), vec!["A", "C"]);
    assert_eq!(table.find(b"C"), Some(1));
    assert_eq!(table.max_index(), Some(1));
}

#[test]
fn test_remove_out_of_range() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    table.insert(entry("A", "1")).unwrap();

    assert!(matches!(table.remove(1), Err(IctError::NotFound)));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_slot_reused_after_remove() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    table.insert(entry("A", "1")).unwrap();
    table.remove(0).unwrap();

    assert_eq!(table.insert(entry("A", "2")).unwrap(), 0);
    assert_eq!(table.get(0).unwrap().value.as_bytes(), b"2");
}

// =============================================================================
// Overflow Policy Tests
// =============================================================================

#[test]
fn test_reset_policy_discards_everything_then_inserts() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    fill(&mut table, MAX_ELEMENT);
    assert!(table.is_full());

    let index = table.insert(entry("overflow", "x")).unwrap();

    assert_eq!(index, 0);
    assert_eq!(table.len(), 1);
    assert_eq!(keys(&table), vec!["overflow"]);
    assert_eq!(table.find(b"key0"), None);
}

#[test]
fn test_reject_policy_returns_full() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reject);
    fill(&mut table, MAX_ELEMENT);

    assert!(matches!(table.insert(entry("overflow", "x")), Err(IctError::Full)));
    assert_eq!(table.len(), MAX_ELEMENT);
    assert_eq!(table.find(b"overflow"), None);
}

#[test]
fn test_evict_oldest_policy() {
    let mut table = Table::new(3, OverflowPolicy::EvictOldest);
    fill(&mut table, 3);

    let index = table.insert(entry("new", "x")).unwrap();

    assert_eq!(index, 2);
    assert_eq!(keys(&table), vec!["key1", "key2", "new"]);
}

#[test]
fn test_duplicate_checked_before_overflow() {
    let mut table = Table::new(3, OverflowPolicy::Reset);
    fill(&mut table, 3);

    assert!(matches!(table.insert(entry("key1", "again")), Err(IctError::Duplicate)));
    assert_eq!(table.len(), 3);
}

#[test]
fn test_clear() {
    let mut table = Table::new(MAX_ELEMENT, OverflowPolicy::Reset);
    fill(&mut table, 5);
    table.clear();

    assert!(table.is_empty());
    assert_eq!(table.capacity(), MAX_ELEMENT);
}
