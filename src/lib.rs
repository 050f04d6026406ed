// src/lib.rs

//! _msortlib_ merges many log files, each sorted by a record timestamp, into
//! one chronologically ordered stream.
//!
//! Files are memory-mapped and gzip files inflated on open. Records are
//! found directly on the mapped bytes and merged with a binary heap, so no
//! file is sorted or copied in memory.
//!
//! Optionally only records correlated to a MAC address are kept; see
//! [`correlation`].
//!
//! The binary program is _msort_.
//!
//! [`correlation`]: crate::merge::correlation

pub mod common;
pub mod data;
pub mod debug;
pub mod matchers;
pub mod merge;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
