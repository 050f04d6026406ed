// src/readers/logfile.rs

//! A [`LogFile`] is the merge state of one input file: its mapped bytes and
//! the offsets of its current [`Record`].
//!
//! A file is either active, holding a current record, or exhausted, in
//! which case it has been closed and is gone. See [`FileState`].

use crate::common::{Bytes, FileOffset, FPath, TS_LEN};
use crate::data::record::{Record, RecordKey};
use crate::data::timestamp::{find_boundary, find_boundary_from};
use crate::readers::helpers::fpath_to_label;
use crate::readers::mappedfile::MappedFile;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Result of opening or advancing a [`LogFile`].
#[derive(Debug)]
pub enum FileState {
    /// the file has a current record
    Active(LogFile),
    /// the file has no more records and was closed
    Exhausted,
}

impl FileState {
    pub const fn is_active(&self) -> bool {
        matches!(self, FileState::Active(_))
    }

    pub const fn is_exhausted(&self) -> bool {
        matches!(self, FileState::Exhausted)
    }
}

/// One input file during a merge.
#[derive(Debug)]
pub struct LogFile {
    /// position of the file among all inputs; the heap tie-break
    index: usize,
    /// inserted after the timestamp of emitted records, may be empty
    label: Bytes,
    mapped: MappedFile,
    /// the current record
    record: Record,
}

impl LogFile {
    /// Find the first record of `mapped`.
    ///
    /// Bytes before the first timestamp are skipped. A file without any
    /// timestamp is closed and `FileState::Exhausted` returned.
    pub fn new(mapped: MappedFile, index: usize, add_label: bool) -> FileState {
        defn!("({:?}, index {}, add_label {})", mapped.path(), index, add_label);
        let (start, matched) = find_boundary(mapped.bytes());
        if !matched {
            defx!("no timestamp in {:?}; Exhausted", mapped.path());
            mapped.close();
            return FileState::Exhausted;
        }
        defo!("first timestamp at {}", start);
        let label: Bytes = match add_label {
            true => fpath_to_label(mapped.path()),
            false => Bytes::with_capacity(0),
        };
        let end: FileOffset = record_end(mapped.bytes(), start);
        let logfile = LogFile {
            index,
            label,
            mapped,
            record: Record::new(start, end),
        };
        defx!("Active, record [{}, {})", start, end);

        FileState::Active(logfile)
    }

    /// Move to the record after the current one.
    ///
    /// Consumes the `LogFile`. If there is no next record the file is closed
    /// and `FileState::Exhausted` returned.
    pub fn advance(mut self) -> FileState {
        let len: usize = self.mapped.len();
        if self.record.end() >= len {
            defñ!("{:?} exhausted at {}", self.mapped.path(), len);
            self.mapped.close();
            return FileState::Exhausted;
        }
        let start: FileOffset = self.record.end();
        let end: FileOffset = record_end(self.mapped.bytes(), start);
        self.record = Record::new(start, end);
        defñ!(
            "{:?} record [{}, {}) {:?}",
            self.mapped.path(),
            start,
            end,
            self.record.to_String_noraw(self.mapped.bytes())
        );

        FileState::Active(self)
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &FPath {
        self.mapped.path()
    }

    pub fn label(&self) -> &[u8] {
        &self.label
    }

    pub const fn record(&self) -> Record {
        self.record
    }

    pub const fn is_gz(&self) -> bool {
        self.mapped.is_gz()
    }

    /// The current record.
    pub fn record_bytes(&self) -> &[u8] {
        self.record.bytes(self.mapped.bytes())
    }

    /// The timestamp of the current record.
    pub fn timestamp(&self) -> &[u8] {
        self.record.timestamp(self.mapped.bytes())
    }

    /// The current record after its timestamp.
    pub fn payload(&self) -> &[u8] {
        self.record.payload(self.mapped.bytes())
    }

    /// The heap key of the current record.
    pub fn key(&self) -> RecordKey {
        self.record.key(self.mapped.bytes(), self.index)
    }
}

/// End of the record beginning at `start`: the next timestamp after the
/// record's own, or the end of `bytes`.
fn record_end(bytes: &[u8], start: FileOffset) -> FileOffset {
    let (end, _matched) = find_boundary_from(bytes, start + TS_LEN);

    end
}
