// src/tests/common.rs

//! Data shared by tests.

use crate::common::FileOffset;
use crate::data::timestamp::find_boundary_from;

/// three records, one of two lines
pub const LOG_A: &str = "\
01/01 00:00:01.000 alpha one\n\
01/01 00:00:03.000 alpha two\n\
\x20 continued line of alpha two\n\
01/01 00:00:05.000 alpha three\n";

pub const LOG_A_RECORDS: [&str; 3] = [
    "01/01 00:00:01.000 alpha one\n",
    "01/01 00:00:03.000 alpha two\n  continued line of alpha two\n",
    "01/01 00:00:05.000 alpha three\n",
];

pub const LOG_B: &str = "\
01/01 00:00:02.000 beta one\n\
01/01 00:00:04.000 beta two\n\
01/01 00:00:06.000 beta three\n";

/// `LOG_A` and `LOG_B` merged
pub const LOG_AB: &str = "\
01/01 00:00:01.000 alpha one\n\
01/01 00:00:02.000 beta one\n\
01/01 00:00:03.000 alpha two\n\
\x20 continued line of alpha two\n\
01/01 00:00:04.000 beta two\n\
01/01 00:00:05.000 alpha three\n\
01/01 00:00:06.000 beta three\n";

/// text before the first timestamp, last record without a newline
pub const LOG_GARBAGE_HEAD: &str = "\
not a record\n\
01/01 00:00:01.500 gamma one\n\
01/01 00:00:02.500 gamma two";

pub const LOG_NO_TIMESTAMPS: &str = "\
no timestamp here\n\
1/1 0:0:1.0 still not a timestamp\n";

/// correlation filter: registers `X` for MAC `AA:BB:CC:DD:EE:FF`
pub const LOG_APPCTX: &str = "\
01/01 00:00:01.000 (appctx): session UUID: X, mac AA:BB:CC:DD:EE:FF\n\
01/01 00:00:05.000 (appctx): session UUID: Z, mac 11:22:33:44:55:66\n";

pub const LOG_REFERENCES: &str = "\
01/01 00:00:00.500 early UUID: X, before registration\n\
01/01 00:00:02.000 request UUID: X, path /a\n\
01/01 00:00:03.000 request UUID: Y, path /b\n\
01/01 00:00:04.000 request without identifier\n\
01/01 00:00:06.000 request UUID: Z, path /c\n\
01/01 00:00:07.000 response UUID: X, status 200\n";

pub const LOG_CORRELATED: &str = "\
01/01 00:00:01.000 (appctx): session UUID: X, mac AA:BB:CC:DD:EE:FF\n\
01/01 00:00:02.000 request UUID: X, path /a\n\
01/01 00:00:07.000 response UUID: X, status 200\n";

pub const MAC_FILTER: &str = "AA:BB:CC:DD:EE:FF";

/// Split `buffer` into its records.
pub fn split_records(buffer: &[u8]) -> Vec<&[u8]> {
    let mut records: Vec<&[u8]> = Vec::new();
    let (mut start, mut matched) = find_boundary_from(buffer, 0);
    while matched {
        let (end, matched_next): (FileOffset, bool) =
            find_boundary_from(buffer, start + crate::common::TS_LEN);
        records.push(&buffer[start..end]);
        start = end;
        matched = matched_next;
    }

    records
}
