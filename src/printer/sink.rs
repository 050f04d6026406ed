// src/printer/sink.rs

//! Destinations of merged records.
//!
//! An [`OutputSink`] accepts raw bytes appended in order and nothing else.
//!
//! * [`StdoutSink`] writes to STDOUT.
//! * [`MappedOutputFile`] writes to a file through a writable mapping that
//!   grows as bytes are appended.
//! * `Vec<u8>` collects bytes in memory.

use std::io::{BufWriter, Error, ErrorKind, Stdout, Write};

use crate::common::{
    File,
    FileOpenOptions,
    FileSz,
    FPath,
    MergeError,
    Result,
    BASE_SIZE,
    GROWTH_SIZE,
};
use crate::readers::helpers::fpath_to_path;

use ::memmap2::MmapMut;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// A destination for merged record bytes.
///
/// `Vec<u8>` has its own inherent `append`, so call the trait method
/// explicitly on a `Vec`:
///
/// ```
/// use msortlib::printer::sink::OutputSink;
///
/// let mut sink: Vec<u8> = Vec::new();
/// OutputSink::append(&mut sink, b"01/01 00:00:01.000 a\n").unwrap();
/// OutputSink::finish(&mut sink).unwrap();
/// assert_eq!(sink, b"01/01 00:00:01.000 a\n");
/// ```
pub trait OutputSink {
    /// Append `bytes` after all previously appended bytes.
    fn append(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flush and release the destination. No `append` may follow.
    fn finish(&mut self) -> Result<()>;
}

impl OutputSink for Vec<u8> {
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

const STDOUT_FPATH: &str = "<stdout>";

/// Buffered STDOUT.
pub struct StdoutSink {
    writer: BufWriter<Stdout>,
}

impl Default for StdoutSink {
    fn default() -> Self {
        StdoutSink::new()
    }
}

impl StdoutSink {
    pub fn new() -> StdoutSink {
        StdoutSink {
            writer: BufWriter::with_capacity(1 << 16, std::io::stdout()),
        }
    }
}

impl OutputSink for StdoutSink {
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        match self.writer.write_all(bytes) {
            Ok(_) => Ok(()),
            Err(err) => Err(MergeError::io(&FPath::from(STDOUT_FPATH), err)),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self.writer.flush() {
            Ok(_) => Ok(()),
            Err(err) => Err(MergeError::io(&FPath::from(STDOUT_FPATH), err)),
        }
    }
}

/// An output file written through a shared writable mapping.
///
/// The file is created at `base_size` bytes. An append that does not fit
/// grows the file by whole `growth_size` steps and maps it again. The write
/// position is an offset, so it survives the remap. [`finish`] truncates the
/// file to the bytes written.
///
/// [`finish`]: OutputSink::finish
pub struct MappedOutputFile {
    path: FPath,
    file: File,
    /// `None` after `finish`
    mmap: Option<MmapMut>,
    /// current file and mapping size
    size: usize,
    write_offset: usize,
    growth_size: usize,
}

impl std::fmt::Debug for MappedOutputFile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("MappedOutputFile")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("write_offset", &self.write_offset)
            .field("growth_size", &self.growth_size)
            .field("finished", &self.mmap.is_none())
            .finish()
    }
}

impl MappedOutputFile {
    /// Create or truncate the file at `path` using the default
    /// [`BASE_SIZE`] and [`GROWTH_SIZE`].
    pub fn create(path: &FPath) -> Result<MappedOutputFile> {
        MappedOutputFile::create_with_sizes(path, BASE_SIZE, GROWTH_SIZE)
    }

    pub fn create_with_sizes(
        path: &FPath,
        base_size: usize,
        growth_size: usize,
    ) -> Result<MappedOutputFile> {
        defn!("({:?}, base_size {}, growth_size {})", path, base_size, growth_size);
        if base_size == 0 || growth_size == 0 {
            defx!("bad sizes");
            return Err(MergeError::io(
                path,
                Error::new(
                    ErrorKind::InvalidInput,
                    format!("bad output sizes base {} growth {}", base_size, growth_size),
                ),
            ));
        }
        let mut open_options = FileOpenOptions::new();
        // a shared writable mapping requires read access
        let file: File = match open_options
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(fpath_to_path(path))
        {
            Ok(val) => val,
            Err(err) => {
                defx!("open_options.open({:?}) Error, return {:?}", path, err);
                return Err(MergeError::io(path, err));
            }
        };
        let mmap: MmapMut = map_sized(path, &file, base_size)?;
        let output = MappedOutputFile {
            path: path.clone(),
            file,
            mmap: Some(mmap),
            size: base_size,
            write_offset: 0,
            growth_size,
        };
        defx!("return {:?}", output);

        Ok(output)
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }

    /// Count of bytes appended so far.
    pub const fn written(&self) -> usize {
        self.write_offset
    }

    /// Current size of the file and its mapping.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Grow the file and mapping to hold at least `needed` bytes.
    fn grow(&mut self, needed: usize) -> Result<()> {
        defn!("(needed {}) size {}", needed, self.size);
        let steps: usize = (needed - self.size).div_ceil(self.growth_size);
        let size_new: usize = match steps
            .checked_mul(self.growth_size)
            .and_then(|grow| grow.checked_add(self.size))
        {
            Some(val) => val,
            None => {
                defx!("size overflow");
                return Err(MergeError::io(
                    &self.path,
                    Error::new(
                        ErrorKind::InvalidInput,
                        format!("output size overflow growing {} to fit {}", self.size, needed),
                    ),
                ));
            }
        };
        if let Some(mmap) = self.mmap.take() {
            if let Err(err) = mmap.flush() {
                defx!("mmap.flush() Error, return {:?}", err);
                self.mmap = Some(mmap);
                return Err(MergeError::io(&self.path, err));
            }
            // unmap before resizing
            drop(mmap);
        }
        let mmap: MmapMut = match map_sized(&self.path, &self.file, size_new) {
            Ok(val) => val,
            Err(err) => {
                // no mapping remains for `finish` to truncate
                if let Err(_err_trunc) = self.file.set_len(self.write_offset as FileSz) {
                    crate::de_err!("file.set_len({}) failed {}", self.write_offset, _err_trunc);
                }
                self.size = self.write_offset;
                defx!("map_sized({}) Error, return {}", size_new, err);
                return Err(err);
            }
        };
        self.mmap = Some(mmap);
        self.size = size_new;
        defx!("size {}", self.size);

        Ok(())
    }

    /// Flush, unmap, and truncate the file to the written length.
    /// Returns the final file size.
    pub fn close(mut self) -> Result<FileSz> {
        self.finish()?;

        Ok(self.write_offset as FileSz)
    }
}

/// Set the length of `file` to `size` and map it writable.
fn map_sized(path: &FPath, file: &File, size: usize) -> Result<MmapMut> {
    if let Err(err) = file.set_len(size as FileSz) {
        defñ!("file.set_len({}) Error {:?}", size, err);
        return Err(MergeError::io(path, err));
    }
    // SAFETY: the file was created by this process and is only accessed
    //         through this mapping until it is unmapped.
    match unsafe { MmapMut::map_mut(file) } {
        Ok(val) => Ok(val),
        Err(err) => {
            defñ!("MmapMut::map_mut() size {} Error {:?}", size, err);
            Err(MergeError::io(path, err))
        }
    }
}

impl OutputSink for MappedOutputFile {
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        if self.mmap.is_none() {
            return Err(MergeError::io(
                &self.path,
                Error::new(ErrorKind::Other, "append after finish"),
            ));
        }
        let end: usize = self.write_offset + bytes.len();
        if end > self.size {
            self.grow(end)?;
        }
        match self.mmap.as_mut() {
            Some(mmap) => {
                mmap[self.write_offset..end].copy_from_slice(bytes);
            }
            None => {
                return Err(MergeError::io(
                    &self.path,
                    Error::new(ErrorKind::Other, "mapping lost while growing"),
                ));
            }
        }
        self.write_offset = end;

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        defn!("({:?}) write_offset {}", self.path, self.write_offset);
        let mmap: MmapMut = match self.mmap.take() {
            Some(val) => val,
            None => {
                defx!("already finished");
                return Ok(());
            }
        };
        if let Err(err) = mmap.flush() {
            defx!("mmap.flush() Error, return {:?}", err);
            return Err(MergeError::io(&self.path, err));
        }
        drop(mmap);
        if self.write_offset < self.size {
            if let Err(err) = self.file.set_len(self.write_offset as FileSz) {
                defx!("file.set_len({}) Error, return {:?}", self.write_offset, err);
                return Err(MergeError::io(&self.path, err));
            }
            self.size = self.write_offset;
        }
        defx!();

        Ok(())
    }
}

impl Drop for MappedOutputFile {
    fn drop(&mut self) {
        if self.mmap.is_some() {
            if let Err(_err) = self.finish() {
                crate::de_err!("MappedOutputFile::drop finish failed {}", _err);
            }
        }
    }
}
