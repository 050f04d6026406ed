// src/matchers/mod.rs

//! Matchers that decide whether a record takes part in the correlation
//! filter.
//!
//! * [`ByteMatcher`] is a linear-time substring search. All other matchers
//!   build on it or on plain byte scanning.
//! * [`MacAddressMatcher`] finds a MAC address token equal to a target,
//!   after normalizing single-digit octets.
//! * [`UuidExtractor`] finds the `UUID: ` marker and returns the value that
//!   follows it.
//!
//! [`ByteMatcher`]: crate::matchers::bytematcher::ByteMatcher
//! [`MacAddressMatcher`]: crate::matchers::macaddress::MacAddressMatcher
//! [`UuidExtractor`]: crate::matchers::uuid::UuidExtractor

pub mod bytematcher;
pub mod macaddress;
pub mod uuid;
