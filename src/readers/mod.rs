// src/readers/mod.rs

//! "Readers" for _msortlib_.
//!
//! ## Overview of readers
//!
//! * A [`LogFile`] walks the [`Record`]s of one input file, in file order.
//! * A `LogFile` owns a [`MappedFile`], the memory-mapped (and, for gzip
//!   files, inflated) bytes of that file.
//!
//! <br/>
//!
//! * A `MappedFile` only handles `u8` bytes. Record boundaries are found
//!   directly on mapped bytes, nothing is copied.
//! * A `LogFile` is consumed when it runs out of records, which unmaps the
//!   file. A closed file can not be read.
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`Record`]: crate::data::record::Record
//! [`LogFile`]: crate::readers::logfile::LogFile
//! [`MappedFile`]: crate::readers::mappedfile::MappedFile

pub mod helpers;
pub mod logfile;
pub mod mappedfile;
