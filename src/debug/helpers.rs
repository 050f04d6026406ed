// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use crate::common::FPath;

use std::io::Write; // for `NamedTempFile.write_all`

use ::flate2::write::GzEncoder;
use ::flate2::Compression;
use ::lazy_static::lazy_static;
#[allow(unused_imports)]
use ::si_trace_print::{defo, defñ};

#[doc(hidden)]
pub use ::tempfile::tempdir;
#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-msort-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    FPath::from(ntf.path().to_str().unwrap())
}

/// Testing helper function to write a `[u8]` to a temporary file with
/// the optional `suffix`.
pub fn create_temp_file_bytes_with_suffix(data: &[u8], suffix: &str) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .suffix::<str>(suffix)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new()..tempfile() return Err {}", err);
        }
    };
    match ntf.write_all(data) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }
    match ntf.flush() {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::flush() return Err {}", err);
        }
    }
    defo!("created {:?} ({} bytes)", ntf.path(), data.len());

    ntf
}

/// Testing helper function to write a `[u8]` to a temporary file.
pub fn create_temp_file_bytes(data: &[u8]) -> NamedTempFile {
    create_temp_file_bytes_with_suffix(data, "")
}

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    create_temp_file_bytes(data.as_bytes())
}

/// Return `data` compressed as a gzip stream.
pub fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::<u8>::new(), Compression::default());
    encoder.write_all(data).unwrap();

    encoder.finish().unwrap()
}

/// Testing helper function to write `data`, gzip compressed, to a
/// temporary file named `*.gz`.
pub fn create_temp_file_gz(data: &str) -> NamedTempFile {
    defñ!("({} bytes)", data.len());
    create_temp_file_bytes_with_suffix(&gzip_bytes(data.as_bytes()), ".gz")
}
