// src/merge/correlation.rs

//! The correlation filter.
//!
//! A record "registers" its identifier when its text holds the
//! `(appctx):` marker and a MAC address equal to the filter. Any record,
//! registering or not, is emitted only if its own identifier was
//! registered. Registration happens before the lookup, so a registering
//! record is itself emitted.
//!
//! Without a filter every record is emitted.

use std::collections::HashSet;

use crate::common::{Bytes, Count};
use crate::de_wrn;
use crate::matchers::macaddress::{MacAddress, MacAddressMatcher};
use crate::matchers::uuid::UuidExtractor;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Set of registered identifiers, compared byte-exact.
///
/// Only grows during a merge.
#[derive(Debug, Default)]
pub struct CorrelationIndex {
    ids: HashSet<Bytes>,
}

impl CorrelationIndex {
    pub fn new() -> CorrelationIndex {
        CorrelationIndex {
            ids: HashSet::with_capacity(256),
        }
    }

    /// Register `id`. Returns `true` if it was not yet registered.
    pub fn insert(&mut self, id: &[u8]) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        defñ!("{:?}", String::from_utf8_lossy(id));

        self.ids.insert(id.to_vec())
    }

    pub fn contains(&self, id: &[u8]) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Decides, per record, whether it is emitted.
#[derive(Debug)]
pub struct RecordFilter {
    /// `None` means emit every record
    mac: Option<MacAddressMatcher>,
    extractor: UuidExtractor,
    index: CorrelationIndex,
    /// records with a `UUID: ` marker but no extractable identifier, seen
    /// after the first registration; identifiers are not extracted before
    malformed: Count,
}

impl RecordFilter {
    pub fn new(mac_filter: Option<MacAddress>) -> RecordFilter {
        RecordFilter {
            mac: mac_filter.map(MacAddressMatcher::new),
            extractor: UuidExtractor::new(),
            index: CorrelationIndex::new(),
            malformed: 0,
        }
    }

    /// Returns `true` if every record is emitted.
    pub const fn emits_all(&self) -> bool {
        self.mac.is_none()
    }

    pub fn index(&self) -> &CorrelationIndex {
        &self.index
    }

    pub const fn malformed(&self) -> Count {
        self.malformed
    }

    /// Should the record with text `payload` be emitted?
    ///
    /// `payload` is the record after its timestamp. May register the
    /// record's identifier.
    pub fn accept(&mut self, payload: &[u8]) -> bool {
        let matcher: &MacAddressMatcher = match &self.mac {
            Some(val) => val,
            None => return true,
        };
        let registers: bool = self.extractor.has_appctx(payload) && matcher.scan(payload);
        if !registers && self.index.is_empty() {
            return false;
        }
        let id: &[u8] = match self.extractor.extract(payload) {
            Ok(Some(val)) => val,
            Ok(None) => return false,
            Err(_err) => {
                de_wrn!("{}; treated as no identifier", _err);
                self.malformed += 1;
                return false;
            }
        };
        if registers {
            defo!("register {:?}", String::from_utf8_lossy(id));
            self.index.insert(id);
        }

        self.index.contains(id)
    }
}
