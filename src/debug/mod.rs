// src/debug/mod.rs

//! The `debug` module is stderr printing macros, debug renderers of raw
//! bytes, and temporary file helpers for tests.

#[cfg(test)]
pub mod helpers;

pub mod printers;
