// src/merge/mod.rs

//! The k-way merge of many record streams into one.
//!
//! * [`MergeHeap`] orders the active files by the timestamp of their
//!   current record.
//! * [`CorrelationIndex`] and [`RecordFilter`] decide which records are
//!   emitted when a MAC address filter is given.
//! * [`MergeDriver`] opens the files, drives the heap, and writes accepted
//!   records to an [`OutputSink`].
//!
//! [`MergeHeap`]: crate::merge::mergeheap::MergeHeap
//! [`CorrelationIndex`]: crate::merge::correlation::CorrelationIndex
//! [`RecordFilter`]: crate::merge::correlation::RecordFilter
//! [`MergeDriver`]: crate::merge::mergedriver::MergeDriver
//! [`OutputSink`]: crate::printer::sink::OutputSink

pub mod correlation;
pub mod mergedriver;
pub mod mergeheap;
