// src/printer/mod.rs

//! The `printer` module is for writing merged records to their destination
//! ([`OutputSink`]) and for the `--summary` report.
//!
//! [`OutputSink`]: crate::printer::sink::OutputSink

pub mod sink;
pub mod summary;
