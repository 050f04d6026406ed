// src/merge/mergedriver.rs

//! The [`MergeDriver`] merges the records of many files into one sink in
//! timestamp order.
//!
//! Each input file is assumed sorted by its record timestamps. The driver
//! never sorts within a file. At any time the heap holds one entry per
//! active file, keyed by that file's current record. A merge step pops the
//! least entry, filters and emits its record, advances that file, and
//! re-inserts it unless the file is exhausted.
//!
//! Entries with equal timestamps are ordered by file index, that is, the
//! order the paths were given.

use crate::common::{Count, FPaths, MergeError, Result, MAX_COMPRESSION_RATIO, MAX_FILES};
use crate::data::record::RecordKey;
use crate::matchers::macaddress::MacAddress;
use crate::merge::correlation::RecordFilter;
use crate::merge::mergeheap::{HeapError, OrdHeap};
use crate::printer::sink::OutputSink;
use crate::readers::logfile::{FileState, LogFile};
use crate::readers::mappedfile::MappedFile;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Settings of one merge.
#[derive(Clone, Debug)]
pub struct MergeConfig {
    /// input files, in tie-break order
    pub paths: FPaths,
    /// insert `" " + basename` after each emitted timestamp
    pub add_filename: bool,
    /// enable the correlation filter for this MAC address
    pub mac_filter: Option<MacAddress>,
    /// gzip inputs may inflate to at most this multiple of their size
    pub max_compression_ratio: usize,
    /// most input files accepted
    pub max_files: usize,
}

impl MergeConfig {
    pub fn new(paths: FPaths) -> MergeConfig {
        MergeConfig {
            paths,
            add_filename: false,
            mac_filter: None,
            max_compression_ratio: MAX_COMPRESSION_RATIO,
            max_files: MAX_FILES,
        }
    }
}

/// Counts gathered during a merge.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MergeSummary {
    pub files_given: usize,
    pub files_opened: usize,
    /// files without any timestamp, closed right after opening
    pub files_no_timestamp: usize,
    pub files_gz: usize,
    pub records_read: Count,
    pub records_emitted: Count,
    pub bytes_written: Count,
    /// identifiers registered by the correlation filter
    pub identifiers: usize,
    /// records with a `UUID: ` marker but no extractable identifier, seen
    /// by a registering record or after the first registration
    pub records_malformed: Count,
}

/// Processing stage of a [`MergeDriver`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeStage {
    /// created; no file is open
    Unopened,
    /// files are open and the heap is seeded
    Merging,
    /// all files are exhausted
    Done,
}

/// Owns the open files, the heap, and the filter of one merge.
pub struct MergeDriver {
    config: MergeConfig,
    /// indexed by `RecordKey::file_index`; `None` while popped or once
    /// exhausted
    files: Vec<Option<LogFile>>,
    heap: OrdHeap<RecordKey>,
    filter: RecordFilter,
    stage: MergeStage,
    summary: MergeSummary,
}

impl std::fmt::Debug for MergeDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("MergeDriver")
            .field("files", &self.config.paths.len())
            .field("heap", &self.heap)
            .field("stage", &self.stage)
            .finish()
    }
}

impl MergeDriver {
    /// Create a driver for `config`.
    ///
    /// Fails with `MergeError::Capacity` if more than `config.max_files`
    /// paths are given. No file is opened.
    pub fn new(config: MergeConfig) -> Result<MergeDriver> {
        defn!("({} paths)", config.paths.len());
        if config.paths.len() > config.max_files {
            defx!("too many files");
            return Err(MergeError::Capacity {
                count: config.paths.len(),
                max: config.max_files,
            });
        }
        let filter = RecordFilter::new(config.mac_filter);
        let heap = OrdHeap::<RecordKey>::new(config.max_files);
        let summary = MergeSummary {
            files_given: config.paths.len(),
            ..Default::default()
        };
        let driver = MergeDriver {
            files: Vec::with_capacity(config.paths.len()),
            config,
            heap,
            filter,
            stage: MergeStage::Unopened,
            summary,
        };
        defx!();

        Ok(driver)
    }

    pub const fn stage(&self) -> MergeStage {
        self.stage
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Count of files with a current record.
    pub fn active(&self) -> usize {
        self.heap.len()
    }

    /// Summary so far.
    pub fn summary(&self) -> MergeSummary {
        let mut summary = self.summary;
        summary.identifiers = self.filter.index().len();
        summary.records_malformed = self.filter.malformed();

        summary
    }

    /// Open every file, find its first record, and seed the heap.
    ///
    /// Any failure to open, map, or inflate a file is returned at once.
    pub fn open_all(&mut self) -> Result<()> {
        defn!();
        if self.stage != MergeStage::Unopened {
            defx!("stage {:?}; nothing to do", self.stage);
            return Ok(());
        }
        for (index, path) in self.config.paths.iter().enumerate() {
            let mapped: MappedFile = match MappedFile::open(path, self.config.max_compression_ratio) {
                Ok(val) => val,
                Err(err) => {
                    defx!("MappedFile::open({:?}) Error, return {}", path, err);
                    return Err(err);
                }
            };
            self.summary.files_opened += 1;
            if mapped.is_gz() {
                self.summary.files_gz += 1;
            }
            match LogFile::new(mapped, index, self.config.add_filename) {
                FileState::Active(logfile) => {
                    let key: RecordKey = logfile.key();
                    defo!("seed {:?}", key);
                    self.files.push(Some(logfile));
                    if let Err(_err) = self.heap.push_unordered(key) {
                        defx!("push_unordered Error {}", _err);
                        return Err(MergeError::Capacity {
                            count: self.config.paths.len(),
                            max: self.heap.capacity(),
                        });
                    }
                }
                FileState::Exhausted => {
                    defo!("no timestamp in {:?}", path);
                    self.summary.files_no_timestamp += 1;
                    self.files.push(None);
                }
            }
        }
        self.heap.heapify();
        self.stage = MergeStage::Merging;
        defx!("{} active files", self.heap.len());

        Ok(())
    }

    /// Do one merge step: pop the earliest record, emit it to `sink` if the
    /// filter accepts it, then advance its file.
    ///
    /// Returns `false` when there are no more records.
    pub fn step<S>(&mut self, sink: &mut S) -> Result<bool>
    where
        S: OutputSink + ?Sized,
    {
        if self.stage != MergeStage::Merging {
            return Ok(false);
        }
        let key: RecordKey = match self.heap.pop_min() {
            Ok(val) => val,
            Err(HeapError::Empty) | Err(HeapError::Capacity { .. }) => {
                defñ!("heap empty; Done");
                self.stage = MergeStage::Done;
                return Ok(false);
            }
        };
        let index: usize = key.file_index;
        let logfile: LogFile = match self.files.get_mut(index).and_then(Option::take) {
            Some(val) => val,
            None => {
                defñ!("heap entry {:?} has no active file", key);
                self.stage = MergeStage::Done;
                return Err(MergeError::Internal {
                    reason: format!("heap entry {:?} has no active file", key),
                });
            }
        };
        self.summary.records_read += 1;
        if self.filter.accept(logfile.payload()) {
            emit(&logfile, sink)?;
            self.summary.records_emitted += 1;
            self.summary.bytes_written += (logfile.record().len() + logfile.label().len()) as Count;
        }
        match logfile.advance() {
            FileState::Active(logfile) => {
                let key_next: RecordKey = logfile.key();
                if key_next.ts < key.ts {
                    crate::de_wrn!(
                        "file {:?} is not sorted; {:?} follows {:?}",
                        logfile.path(),
                        key_next,
                        key
                    );
                }
                self.files[index] = Some(logfile);
                if let Err(_err) = self.heap.insert(key_next) {
                    return Err(MergeError::Capacity {
                        count: self.config.paths.len(),
                        max: self.heap.capacity(),
                    });
                }
            }
            FileState::Exhausted => {
                defñ!("file {} exhausted; {} remain", index, self.heap.len());
            }
        }

        Ok(true)
    }

    /// Remove the file at `index` without removing its heap entry.
    #[cfg(test)]
    pub(crate) fn take_file(&mut self, index: usize) -> Option<LogFile> {
        self.files.get_mut(index).and_then(Option::take)
    }

    /// Merge all records of all files into `sink`, then finish `sink`.
    pub fn run<S>(&mut self, sink: &mut S) -> Result<MergeSummary>
    where
        S: OutputSink + ?Sized,
    {
        defn!();
        self.open_all()?;
        while self.step(sink)? {}
        sink.finish()?;
        let summary = self.summary();
        defx!("{:?}", summary);

        Ok(summary)
    }
}

/// Write the current record of `logfile` as timestamp, label, and payload.
fn emit<S>(logfile: &LogFile, sink: &mut S) -> Result<()>
where
    S: OutputSink + ?Sized,
{
    sink.append(logfile.timestamp())?;
    if !logfile.label().is_empty() {
        sink.append(logfile.label())?;
    }
    sink.append(logfile.payload())
}

/// Merge the files of `config` into `sink`.
pub fn merge_files<S>(config: MergeConfig, sink: &mut S) -> Result<MergeSummary>
where
    S: OutputSink + ?Sized,
{
    let mut driver = MergeDriver::new(config)?;

    driver.run(sink)
}
