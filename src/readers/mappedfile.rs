// src/readers/mappedfile.rs

//! A [`MappedFile`] is the read-only memory-mapped view of one input file.
//!
//! Gzip files, detected by the magic bytes `0x1F 0x8B`, are inflated when
//! opened into an anonymous mapping of at most `max_ratio` times the
//! compressed size. Afterwards only the inflated bytes are visible.

use std::io::{ErrorKind, Read};

use crate::common::{
    File,
    FileMetadata,
    FileOpenOptions,
    FileSz,
    FPath,
    MergeError,
    Result,
};
use crate::readers::helpers::fpath_to_path;

// `flate2` is for gzip files.
use ::flate2::bufread::MultiGzDecoder;
use ::memmap2::{Mmap, MmapMut};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// gzip magic bytes, see <https://datatracker.ietf.org/doc/html/rfc1952#page-5>
pub const GZ_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Returns `true` if `bytes` begin with the gzip magic bytes.
#[inline(always)]
pub fn is_gz(bytes: &[u8]) -> bool {
    bytes.len() >= GZ_MAGIC.len() && bytes[..GZ_MAGIC.len()] == GZ_MAGIC
}

/// The bytes behind a `MappedFile`.
enum MappedBuffer {
    /// zero-length file; nothing is mapped
    Empty,
    /// the file mapped as-is
    Raw(Mmap),
    /// anonymous mapping holding the inflated file. `len` is the inflated
    /// length, not the mapping size.
    Inflated {
        inflated: MmapMut,
        len: usize,
    },
}

/// An open, mapped input file.
///
/// Dropping or [`close`]-ing a `MappedFile` unmaps its buffers and releases
/// the file descriptor.
///
/// [`close`]: MappedFile::close
pub struct MappedFile {
    path: FPath,
    /// held so the descriptor lives as long as the mapping
    #[allow(dead_code)]
    file: File,
    /// size of the file on disk
    filesz: FileSz,
    buffer: MappedBuffer,
}

impl std::fmt::Debug for MappedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("MappedFile")
            .field("path", &self.path)
            .field("filesz", &self.filesz)
            .field("len", &self.len())
            .field("gz", &self.is_gz())
            .finish()
    }
}

impl MappedFile {
    /// Open and map the file at `path`. Gzip files are inflated, bounded by
    /// `max_ratio` times the file size.
    pub fn open(path: &FPath, max_ratio: usize) -> Result<MappedFile> {
        defn!("({:?}, max_ratio {})", path, max_ratio);
        let mut open_options = FileOpenOptions::new();
        let file: File = match open_options
            .read(true)
            .open(fpath_to_path(path))
        {
            Ok(val) => val,
            Err(err) => {
                defx!("open_options.read({:?}) Error, return {:?}", path, err);
                return Err(MergeError::io(path, err));
            }
        };
        let metadata: FileMetadata = match file.metadata() {
            Ok(val) => val,
            Err(err) => {
                defx!("file.metadata() Error, return {:?}", err);
                return Err(MergeError::io(path, err));
            }
        };
        let filesz: FileSz = metadata.len();
        defo!("filesz {}", filesz);
        if filesz == 0 {
            defx!("empty file; return MappedBuffer::Empty");
            return Ok(MappedFile {
                path: path.clone(),
                file,
                filesz,
                buffer: MappedBuffer::Empty,
            });
        }
        // SAFETY: the mapping is read-only. Input files are expected to not
        //         be truncated by other processes during a merge.
        let raw: Mmap = match unsafe { Mmap::map(&file) } {
            Ok(val) => val,
            Err(err) => {
                defx!("Mmap::map() Error, return {:?}", err);
                return Err(MergeError::io(path, err));
            }
        };
        let buffer: MappedBuffer = if is_gz(&raw) {
            defo!("gzip magic found; inflate");
            let (inflated, len) = inflate(path, &raw, max_ratio)?;
            drop(raw);
            MappedBuffer::Inflated { inflated, len }
        } else {
            MappedBuffer::Raw(raw)
        };
        let mappedfile = MappedFile {
            path: path.clone(),
            file,
            filesz,
            buffer,
        };
        defx!("return {:?}", mappedfile);

        Ok(mappedfile)
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }

    /// Size of the file on disk.
    pub const fn filesz(&self) -> FileSz {
        self.filesz
    }

    /// Returns `true` if the file was gzip compressed.
    pub const fn is_gz(&self) -> bool {
        matches!(self.buffer, MappedBuffer::Inflated { .. })
    }

    /// The live bytes; for gzip files, only the inflated bytes.
    pub fn bytes(&self) -> &[u8] {
        match &self.buffer {
            MappedBuffer::Empty => &[],
            MappedBuffer::Raw(raw) => &raw[..],
            MappedBuffer::Inflated { inflated, len } => &inflated[..*len],
        }
    }

    /// Length of the live bytes.
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unmap all buffers and close the file.
    pub fn close(self) {
        defñ!("({:?})", self.path);
        drop(self);
    }
}

/// Inflate the gzip stream `compressed` into a new anonymous mapping of
/// `compressed.len() * max_ratio` bytes.
///
/// Returns the mapping and the inflated length. Fails if the stream is
/// corrupt or truncated, or inflates to more than the mapping holds.
fn inflate(path: &FPath, compressed: &[u8], max_ratio: usize) -> Result<(MmapMut, usize)> {
    defn!("({:?}, compressed len {}, max_ratio {})", path, compressed.len(), max_ratio);
    let capacity: usize = match compressed.len().checked_mul(max_ratio) {
        Some(val) if val > 0 => val,
        _ => {
            defx!("bad capacity");
            return Err(MergeError::decompress(
                path,
                format!("bad inflate buffer size {} × {}", compressed.len(), max_ratio),
            ));
        }
    };
    let mut inflated: MmapMut = match MmapMut::map_anon(capacity) {
        Ok(val) => val,
        Err(err) => {
            defx!("MmapMut::map_anon({}) Error, return {:?}", capacity, err);
            return Err(MergeError::io(path, err));
        }
    };
    let mut decoder = MultiGzDecoder::new(compressed);
    let mut len: usize = 0;
    loop {
        if len == capacity {
            // buffer full; any further byte exceeds the bound
            let mut extra: [u8; 1] = [0; 1];
            match decoder.read(&mut extra) {
                Ok(0) => break,
                Ok(_) => {
                    defx!("inflated size exceeds {}", capacity);
                    return Err(MergeError::decompress(
                        path,
                        format!(
                            "inflated size exceeds {} bytes ({} × compressed size {})",
                            capacity,
                            max_ratio,
                            compressed.len()
                        ),
                    ));
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    defx!("decoder.read() Error, return {:?}", err);
                    return Err(MergeError::decompress(path, err.to_string()));
                }
            }
        }
        match decoder.read(&mut inflated[len..]) {
            Ok(0) => break,
            Ok(readsz) => {
                len += readsz;
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                defx!("decoder.read() Error after {} bytes, return {:?}", len, err);
                return Err(MergeError::decompress(path, err.to_string()));
            }
        }
    }
    defx!("inflated {} bytes into buffer of {}", len, capacity);

    Ok((inflated, len))
}
