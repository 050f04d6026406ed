// src/matchers/uuid.rs

//! Extract the identifier that follows the literal marker `UUID: `, and
//! detect the `(appctx):` marker.
//!
//! The identifier is every byte after the marker up to, not including, the
//! next `,`. The search for `,` never leaves the record.

use crate::common::{MergeError, Result, UUID_STR_LEN};
use crate::matchers::bytematcher::ByteMatcher;

use ::memchr::memchr;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Marker preceding an identifier.
pub const UUID_MARKER: &[u8] = b"UUID: ";
/// Delimiter ending an identifier.
pub const UUID_DELIMITER: u8 = b',';
/// Marker of records that may register an identifier.
pub const APPCTX_MARKER: &[u8] = b"(appctx):";

/// Finds identifiers in record text. Holds the prepared marker search so it
/// may be reused for every record.
#[derive(Clone, Debug)]
pub struct UuidExtractor {
    marker: ByteMatcher<'static>,
    appctx: ByteMatcher<'static>,
}

impl Default for UuidExtractor {
    fn default() -> Self {
        UuidExtractor::new()
    }
}

impl UuidExtractor {
    pub fn new() -> UuidExtractor {
        UuidExtractor {
            marker: ByteMatcher::new(UUID_MARKER),
            appctx: ByteMatcher::new(APPCTX_MARKER),
        }
    }

    /// Return the identifier following the first `UUID: ` in
    /// `record_text`.
    ///
    /// `Ok(None)` if there is no marker. `Err(MalformedRecord)` if no `,`
    /// follows the marker before the end of `record_text`, or the
    /// identifier is longer than [`UUID_STR_LEN`].
    pub fn extract<'t>(&self, record_text: &'t [u8]) -> Result<Option<&'t [u8]>> {
        let (at, matched) = self.marker.find(record_text);
        if !matched {
            return Ok(None);
        }
        let value_start: usize = at + UUID_MARKER.len();
        let rest: &[u8] = &record_text[value_start..];
        let len: usize = match memchr(UUID_DELIMITER, rest) {
            Some(len) => len,
            None => {
                defñ!("no delimiter in {} bytes after marker", rest.len());
                return Err(MergeError::MalformedRecord {
                    reason: "no ',' after \"UUID: \" within the record",
                });
            }
        };
        if len > UUID_STR_LEN {
            defñ!("identifier length {} > {}", len, UUID_STR_LEN);
            return Err(MergeError::MalformedRecord {
                reason: "identifier after \"UUID: \" is too long",
            });
        }

        Ok(Some(&rest[..len]))
    }

    /// Does `record_text` contain `(appctx):`?
    #[inline(always)]
    pub fn has_appctx(&self, record_text: &[u8]) -> bool {
        self.appctx.is_in(record_text)
    }
}
