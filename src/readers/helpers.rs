// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

use crate::common::{Bytes, FPath};

/// Return the basename of an `FPath`.
pub fn basename(path: &FPath) -> FPath {
    let mut riter = path.rsplit(std::path::MAIN_SEPARATOR);

    FPath::from(riter.next().unwrap_or(""))
}

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}

/// The label inserted after each timestamp when file names are added;
/// one space then the basename of `path`.
pub fn fpath_to_label(path: &FPath) -> Bytes {
    let name: FPath = basename(path);
    let mut label: Bytes = Bytes::with_capacity(name.len() + 1);
    label.push(b' ');
    label.extend_from_slice(name.as_bytes());

    label
}
