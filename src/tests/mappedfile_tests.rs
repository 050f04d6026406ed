// src/tests/mappedfile_tests.rs

//! tests for `mappedfile.rs`

use crate::common::{FPath, MergeError, MAX_COMPRESSION_RATIO};
use crate::debug::helpers::{
    create_temp_file,
    create_temp_file_bytes,
    create_temp_file_bytes_with_suffix,
    create_temp_file_gz,
    gzip_bytes,
    ntf_fpath,
};
use crate::readers::mappedfile::{is_gz, MappedFile, GZ_MAGIC};
use crate::tests::common::LOG_A;

use ::test_case::test_case;

#[test_case(&[0x1F, 0x8B, 0x08], true; "gzip header")]
#[test_case(&GZ_MAGIC, true; "magic only")]
#[test_case(&[0x1F], false; "one byte")]
#[test_case(&[0x8B, 0x1F], false; "swapped")]
#[test_case(b"01/01 00:00:01.000 ", false; "text")]
#[test_case(&[], false; "empty")]
fn test_is_gz(bytes: &[u8], expect: bool) {
    assert_eq!(is_gz(bytes), expect);
}

#[test]
fn test_open_plain() {
    let ntf = create_temp_file(LOG_A);
    let path: FPath = ntf_fpath(&ntf);
    let mapped = MappedFile::open(&path, MAX_COMPRESSION_RATIO).unwrap();
    assert_eq!(mapped.path(), &path);
    assert!(!mapped.is_gz());
    assert_eq!(mapped.bytes(), LOG_A.as_bytes());
    assert_eq!(mapped.len(), LOG_A.len());
    assert_eq!(mapped.filesz(), LOG_A.len() as u64);
    mapped.close();
}

#[test]
fn test_open_empty() {
    let ntf = create_temp_file("");
    let mapped = MappedFile::open(&ntf_fpath(&ntf), MAX_COMPRESSION_RATIO).unwrap();
    assert!(mapped.is_empty());
    assert_eq!(mapped.bytes(), b"");
    assert_eq!(mapped.filesz(), 0);
}

#[test]
fn test_open_gz() {
    let ntf = create_temp_file_gz(LOG_A);
    let mapped = MappedFile::open(&ntf_fpath(&ntf), MAX_COMPRESSION_RATIO).unwrap();
    assert!(mapped.is_gz());
    assert_eq!(mapped.bytes(), LOG_A.as_bytes());
    assert_ne!(mapped.filesz(), LOG_A.len() as u64);
}

#[test]
fn test_open_gz_without_suffix() {
    // detection uses the magic bytes, not the file name
    let ntf = create_temp_file_bytes(&gzip_bytes(LOG_A.as_bytes()));
    let mapped = MappedFile::open(&ntf_fpath(&ntf), MAX_COMPRESSION_RATIO).unwrap();
    assert!(mapped.is_gz());
    assert_eq!(mapped.bytes(), LOG_A.as_bytes());
}

#[test]
fn test_open_gz_multiple_members() {
    let mut data: Vec<u8> = gzip_bytes(b"01/01 00:00:01.000 first member\n");
    data.extend_from_slice(&gzip_bytes(b"01/01 00:00:02.000 second member\n"));
    let ntf = create_temp_file_bytes_with_suffix(&data, ".gz");
    let mapped = MappedFile::open(&ntf_fpath(&ntf), MAX_COMPRESSION_RATIO).unwrap();
    assert_eq!(
        mapped.bytes(),
        b"01/01 00:00:01.000 first member\n01/01 00:00:02.000 second member\n"
    );
}

#[test]
fn test_open_gz_ratio_exceeded() {
    // highly compressible, far more than 16 times
    let data: Vec<u8> = vec![b'a'; 1 << 16];
    let ntf = create_temp_file_bytes_with_suffix(&gzip_bytes(&data), ".gz");
    match MappedFile::open(&ntf_fpath(&ntf), 16) {
        Err(MergeError::Decompress { .. }) => {}
        other => panic!("unexpected {:?}", other),
    }
    // a generous ratio allows it
    let mapped = MappedFile::open(&ntf_fpath(&ntf), 10_000).unwrap();
    assert_eq!(mapped.len(), data.len());
}

#[test]
fn test_open_gz_truncated() {
    let mut data: Vec<u8> = gzip_bytes(LOG_A.as_bytes());
    data.truncate(data.len() - 8);
    let ntf = create_temp_file_bytes_with_suffix(&data, ".gz");
    match MappedFile::open(&ntf_fpath(&ntf), MAX_COMPRESSION_RATIO) {
        Err(err @ MergeError::Decompress { .. }) => assert!(!err.is_recoverable()),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_open_gz_corrupt_header() {
    let ntf = create_temp_file_bytes(b"\x1F\x8Bnot really gzip data at all");
    assert!(matches!(
        MappedFile::open(&ntf_fpath(&ntf), MAX_COMPRESSION_RATIO),
        Err(MergeError::Decompress { .. })
    ));
}

#[test]
fn test_open_missing() {
    let path = FPath::from("/this/path/does/not/exist/msort.log");
    match MappedFile::open(&path, MAX_COMPRESSION_RATIO) {
        Err(MergeError::Io { path: err_path, .. }) => assert_eq!(err_path, path),
        other => panic!("unexpected {:?}", other),
    }
}
