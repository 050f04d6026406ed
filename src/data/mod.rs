// src/data/mod.rs

//! The `data` module is the timestamp recognizer and the record types
//! derived from it.
//!
//! ## Definitions of data
//!
//! ### Timestamp
//!
//! A "timestamp" is the fixed-width text `MM/DD HH:MM:SS.mmm` followed by
//! one space. Only the first [`TS_LEN`] bytes are compared when ordering.
//!
//! ### Record
//!
//! A "record" is the sequence of bytes that:
//!
//! * begins with a timestamp.
//! * ends at the next timestamp or the end of the file.
//!
//! A record may span many lines. A "record" is represented by a [`Record`];
//! it is only a pair of offsets into a [`MappedFile`] buffer.
//!
//! [`TS_LEN`]: crate::common::TS_LEN
//! [`Record`]: crate::data::record::Record
//! [`MappedFile`]: crate::readers::mappedfile::MappedFile

pub mod record;
pub mod timestamp;
