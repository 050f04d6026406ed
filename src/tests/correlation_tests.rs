// src/tests/correlation_tests.rs

//! tests for `correlation.rs`

use crate::matchers::macaddress::MacAddress;
use crate::merge::correlation::{CorrelationIndex, RecordFilter};
use crate::tests::common::MAC_FILTER;

fn new_filter() -> RecordFilter {
    RecordFilter::new(Some(MacAddress::parse(MAC_FILTER).unwrap()))
}

#[test]
fn test_index() {
    let mut index = CorrelationIndex::new();
    assert!(index.is_empty());
    assert!(index.insert(b"X"));
    assert!(!index.insert(b"X"));
    assert!(index.contains(b"X"));
    assert!(!index.contains(b"x"));
    assert!(!index.contains(b"X "));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_no_filter_accepts_all() {
    let mut filter = RecordFilter::new(None);
    assert!(filter.emits_all());
    assert!(filter.accept(b" anything\n"));
    assert!(filter.accept(b" UUID: broken"));
    assert!(filter.accept(b""));
    assert!(filter.index().is_empty());
    assert_eq!(filter.malformed(), 0);
}

#[test]
fn test_filter_sequence() {
    let mut filter = new_filter();
    assert!(!filter.emits_all());
    // nothing is registered yet
    assert!(!filter.accept(b" early UUID: X, before\n"));
    // registers X, and is itself emitted
    assert!(filter.accept(b" (appctx): session UUID: X, mac AA:BB:CC:DD:EE:FF\n"));
    assert!(filter.index().contains(b"X"));
    assert!(filter.accept(b" request UUID: X, path /a\n"));
    assert!(!filter.accept(b" request UUID: Y, path /b\n"));
    assert!(!filter.accept(b" request without identifier\n"));
    // another MAC does not register
    assert!(!filter.accept(b" (appctx): session UUID: Z, mac 11:22:33:44:55:66\n"));
    assert!(!filter.index().contains(b"Z"));
    // the MAC without the appctx marker does not register
    assert!(!filter.accept(b" session UUID: W, mac AA:BB:CC:DD:EE:FF\n"));
    assert_eq!(filter.index().len(), 1);
}

#[test]
fn test_filter_short_form_mac_registers() {
    let mut filter = RecordFilter::new(Some(MacAddress::parse("0a:0b:0c:0d:0e:0f").unwrap()));
    assert!(filter.accept(b" (appctx): UUID: 77, client a:b:c:d:e:f\n"));
    assert!(filter.accept(b" UUID: 77, again\n"));
}

#[test]
fn test_filter_malformed_before_registration_not_counted() {
    let mut filter = new_filter();
    // not registering, and nothing is registered; no identifier is extracted
    assert!(!filter.accept(b" request UUID: broken\n"));
    assert_eq!(filter.malformed(), 0);
    assert!(filter.accept(b" (appctx): AA:BB:CC:DD:EE:FF UUID: ok,\n"));
    assert!(!filter.accept(b" request UUID: broken\n"));
    assert_eq!(filter.malformed(), 1);
}

#[test]
fn test_filter_malformed() {
    let mut filter = new_filter();
    // registering record without a delimiter
    assert!(!filter.accept(b" (appctx): AA:BB:CC:DD:EE:FF UUID: broken\n"));
    assert_eq!(filter.malformed(), 1);
    assert!(filter.index().is_empty());
    assert!(filter.accept(b" (appctx): AA:BB:CC:DD:EE:FF UUID: ok,\n"));
    assert!(!filter.accept(b" UUID: broken again\n"));
    assert_eq!(filter.malformed(), 2);
}
