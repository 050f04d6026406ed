// src/tests/mod.rs

//! Tests for _msortlib_.
//!
//! Tests are placed at `src/tests/`, inside the `msortlib`, for
//! crate-internal visibility.

pub mod common;
pub mod correlation_tests;
pub mod mappedfile_tests;
pub mod summary_tests;
pub mod timestamp_tests;
