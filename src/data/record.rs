// src/data/record.rs

//! A [`Record`] is one timestamp-prefixed unit of log text, held as offsets
//! into the buffer of the file it was found in.
//!
//! A [`RecordKey`] is the merge-ordering key of a file's current record.

use std::cmp::Ordering;
use std::fmt;

use crate::common::{FileOffset, TS_LEN};
use crate::debug::printers::buffer_to_String_noraw;

/// Offsets `[start, end)` of one record within a mapped buffer.
///
/// Offsets are relative to the start of the buffer so a record never holds
/// an address into a mapping. A record lives for one merge step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Record {
    start: FileOffset,
    end: FileOffset,
}

impl Record {
    /// Create a new `Record`. A record is at least one timestamp long.
    pub fn new(start: FileOffset, end: FileOffset) -> Record {
        debug_assert!(
            start + TS_LEN <= end,
            "bad record offsets [{}, {}); shorter than TS_LEN {}",
            start,
            end,
            TS_LEN
        );

        Record { start, end }
    }

    #[inline(always)]
    pub const fn start(&self) -> FileOffset {
        self.start
    }

    #[inline(always)]
    pub const fn end(&self) -> FileOffset {
        self.end
    }

    /// Length of the entire record, timestamp included.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole record within `buffer`.
    #[inline(always)]
    pub fn bytes<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.start..self.end]
    }

    /// The `TS_LEN` timestamp bytes within `buffer`.
    #[inline(always)]
    pub fn timestamp<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.start..self.start + TS_LEN]
    }

    /// Everything after the timestamp prefix within `buffer`.
    #[inline(always)]
    pub fn payload<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.start + TS_LEN..self.end]
    }

    /// Copy the timestamp into an ordering key for file `file_index`.
    pub fn key(&self, buffer: &[u8], file_index: usize) -> RecordKey {
        let mut ts = [0_u8; TS_LEN];
        ts.copy_from_slice(self.timestamp(buffer));

        RecordKey { ts, file_index }
    }

    /// Human-readable rendering, for debugging.
    #[allow(non_snake_case)]
    pub fn to_String_noraw(&self, buffer: &[u8]) -> String {
        buffer_to_String_noraw(self.bytes(buffer), 80)
    }
}

/// Heap entry of a file with an active record.
///
/// Ordered by the timestamp bytes, then by `file_index`, so files with
/// equal timestamps are emitted in the order they were given.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct RecordKey {
    pub ts: [u8; TS_LEN],
    pub file_index: usize,
}

impl Ord for RecordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ts
            .cmp(&other.ts)
            .then(self.file_index.cmp(&other.file_index))
    }
}

impl PartialOrd for RecordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RecordKey")
            .field("ts", &String::from_utf8_lossy(&self.ts))
            .field("file_index", &self.file_index)
            .finish()
    }
}
