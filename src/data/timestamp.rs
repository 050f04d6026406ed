// src/data/timestamp.rs

//! Byte-level recognizer of the record timestamp `MM/DD HH:MM:SS.mmm `.
//!
//! The recognizer runs directly on mapped bytes. It is used both to find the
//! first record of a file and to find the end of the current record, which
//! is the start of the next record.

use crate::common::{FileOffset, TS_GRAMMAR_LEN};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// One position of the timestamp grammar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TsByte {
    Digit,
    Lit(u8),
}

use TsByte::{Digit, Lit};

/// The timestamp grammar, `DD/DD DD:DD:DD.DDD `, one entry per byte.
const TS_GRAMMAR: [TsByte; TS_GRAMMAR_LEN] = [
    // month
    Digit, Digit, Lit(b'/'),
    // day
    Digit, Digit, Lit(b' '),
    // hour
    Digit, Digit, Lit(b':'),
    // minute
    Digit, Digit, Lit(b':'),
    // second
    Digit, Digit, Lit(b'.'),
    // millisecond
    Digit, Digit, Digit,
    Lit(b' '),
];

/// Result of [`find_boundary`]: the offset reached and whether a timestamp
/// begins there.
///
/// When not matched the offset is the end of the scanned buffer.
pub type Boundary = (FileOffset, bool);

/// Does a timestamp begin at the start of `candidate`?
///
/// Matching is left to right and stops at the first byte that violates the
/// grammar.
#[inline(always)]
pub fn timestamp_at(candidate: &[u8]) -> bool {
    if candidate.len() < TS_GRAMMAR_LEN {
        return false;
    }
    for (byte, expect) in candidate.iter().zip(TS_GRAMMAR.iter()) {
        let ok: bool = match expect {
            Digit => byte.is_ascii_digit(),
            Lit(lit) => byte == lit,
        };
        if !ok {
            return false;
        }
    }

    true
}

/// Scan `buffer` forward for the first timestamp.
///
/// On a grammar violation the scan advances one byte and retries.
/// Returns `(offset, true)` where the timestamp begins, or
/// `(buffer.len(), false)` if no timestamp exists in `buffer`.
pub fn find_boundary(buffer: &[u8]) -> Boundary {
    defn!("(buffer len {})", buffer.len());
    if buffer.len() < TS_GRAMMAR_LEN {
        defx!("buffer too short; return ({}, false)", buffer.len());
        return (buffer.len(), false);
    }
    let last: FileOffset = buffer.len() - TS_GRAMMAR_LEN;
    let mut at: FileOffset = 0;
    while at <= last {
        // a timestamp must begin with a digit; skip ahead cheaply
        if !buffer[at].is_ascii_digit() {
            at += 1;
            continue;
        }
        if timestamp_at(&buffer[at..]) {
            defx!("return ({}, true)", at);
            return (at, true);
        }
        at += 1;
    }
    defx!("return ({}, false)", buffer.len());

    (buffer.len(), false)
}

/// Scan `buffer` for the first timestamp at or after offset `from`.
///
/// Offsets in the returned [`Boundary`] are relative to the start of
/// `buffer`, not to `from`.
pub fn find_boundary_from(buffer: &[u8], from: FileOffset) -> Boundary {
    if from >= buffer.len() {
        defñ!("from {} >= len {}", from, buffer.len());
        return (buffer.len(), false);
    }
    let (at, matched) = find_boundary(&buffer[from..]);

    (from + at, matched)
}
