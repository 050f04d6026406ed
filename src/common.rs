// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

//! Common imports, type aliases, constants, and the error type shared by all
//! modules of _msortlib_.

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;
pub use std::path::Path;

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;
pub type FileMetadata = std::fs::Metadata;
pub type FileOpenOptions = std::fs::OpenOptions;
/// File size in bytes
pub type FileSz = u64;
/// Offset into a mapped buffer in bytes
pub type FileOffset = usize;
/// Sequence of Bytes
pub type Bytes = Vec<u8>;
/// General purpose counter
pub type Count = u64;

/// Global allocator chosen at compile time, see `src/bin/msort.rs`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AllocatorChosen {
    System,
    Jemalloc,
    Mimalloc,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// limits and sizes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Length of the comparable timestamp prefix `MM/DD HH:MM:SS.mmm`.
pub const TS_LEN: usize = 18;
/// Bytes inspected by the timestamp recognizer; the prefix plus the
/// mandatory trailing space.
pub const TS_GRAMMAR_LEN: usize = TS_LEN + 1;
/// Maximum count of input files merged at once.
pub const MAX_FILES: usize = 8192;
/// Maximum expansion of a gzip input, relative to its compressed size.
pub const MAX_COMPRESSION_RATIO: usize = 16;
/// Initial size of a mapped output file.
pub const BASE_SIZE: usize = 8 * 1024 * 1024;
/// Size step of growing a mapped output file.
pub const GROWTH_SIZE: usize = 4 * 1024 * 1024;
/// Longest identifier accepted by the UUID extractor.
pub const UUID_STR_LEN: usize = 64;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors of the merge engine.
///
/// `MalformedRecord` is the only recoverable kind; it is confined to one
/// record. All others end the merge.
#[derive(Debug)]
pub enum MergeError {
    /// open, stat, mmap, or write failed
    Io {
        path: FPath,
        source: std::io::Error,
    },
    /// corrupt or truncated gzip stream, or expansion bound exceeded
    Decompress {
        path: FPath,
        reason: String,
    },
    /// more input files than the heap can hold
    Capacity {
        count: usize,
        max: usize,
    },
    /// a value could not be extracted from within the record bounds
    MalformedRecord {
        reason: &'static str,
    },
    /// a filter value that is not a 6-octet MAC address
    InvalidMacAddress(String),
    /// merge state broke an invariant, e.g. a heap entry without its file
    Internal {
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, MergeError>;

impl MergeError {
    /// Wrap `source` with the path it occurred on.
    pub fn io(path: &FPath, source: std::io::Error) -> Self {
        MergeError::Io {
            path: path.clone(),
            source,
        }
    }

    pub fn decompress(path: &FPath, reason: impl Into<String>) -> Self {
        MergeError::Decompress {
            path: path.clone(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if processing may continue past this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, MergeError::MalformedRecord { .. })
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::Io { path, source } => write!(f, "{} for file {:?}", source, path),
            MergeError::Decompress { path, reason } => {
                write!(f, "gzip decompression failed for file {:?}: {}", path, reason)
            }
            MergeError::Capacity { count, max } => {
                write!(f, "{} input files given; at most {} are supported", count, max)
            }
            MergeError::MalformedRecord { reason } => write!(f, "malformed record: {}", reason),
            MergeError::InvalidMacAddress(val) => write!(f, "not a MAC address {:?}", val),
            MergeError::Internal { reason } => write!(f, "internal error: {}", reason),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MergeError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        MergeError::Io {
            path: FPath::new(),
            source: err,
        }
    }
}
