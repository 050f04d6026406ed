// src/tests/timestamp_tests.rs

//! tests for `timestamp.rs` functions

use crate::common::{FileOffset, TS_GRAMMAR_LEN};
use crate::data::timestamp::{find_boundary, find_boundary_from, timestamp_at};

use ::test_case::test_case;

#[test_case("01/02 03:04:05.678 x", 0, true; "at start")]
#[test_case("xx01/02 03:04:05.678 x", 2, true; "after text")]
#[test_case("001/02 03:04:05.678 z", 1, true; "after a digit")]
#[test_case("01/02 03:04:05.67 x 01/02 03:04:05.678 y", 20, true; "after a near miss")]
#[test_case("12/31 23:59:59.999 ", 0, true; "exact length")]
#[test_case("01/02 03:04:05.678", 18, false; "no trailing space")]
#[test_case("01/02 03:04:05.678\n", 19, false; "newline instead of space")]
#[test_case("1/02 03:04:05.678 abc", 21, false; "one digit month")]
#[test_case("01-02 03:04:05.678 abc", 22, false; "wrong separator")]
#[test_case("abc", 3, false; "short")]
#[test_case("", 0, false; "empty")]
fn test_find_boundary(data: &str, expect_at: FileOffset, expect_matched: bool) {
    let (at, matched) = find_boundary(data.as_bytes());
    assert_eq!(matched, expect_matched, "matched for {:?}", data);
    assert_eq!(at, expect_at, "offset for {:?}", data);
}

#[test]
fn test_find_boundary_from_next_record() {
    let data = b"01/01 00:00:01.000 a\n01/01 00:00:02.000 b\n";
    assert_eq!(find_boundary_from(data, 0), (0, true));
    // searching past the first timestamp finds the second
    assert_eq!(find_boundary_from(data, 18), (21, true));
    assert_eq!(find_boundary_from(data, 22), (data.len(), false));
}

#[test]
fn test_find_boundary_from_past_end() {
    let data = b"01/01 00:00:01.000 a\n";
    assert_eq!(find_boundary_from(data, data.len()), (data.len(), false));
    assert_eq!(find_boundary_from(data, data.len() + 5), (data.len(), false));
}

#[test]
fn test_timestamp_at() {
    assert!(timestamp_at(b"09/30 12:00:00.000 "));
    assert!(timestamp_at(b"09/30 12:00:00.000 trailing text"));
    assert!(!timestamp_at(b"09/30 12:00:00.000"));
    assert!(!timestamp_at(b"09/30 12:00:00,000 "));
    assert!(!timestamp_at(b"x9/30 12:00:00.000 "));
    assert_eq!(TS_GRAMMAR_LEN, 19);
}
