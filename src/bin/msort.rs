// src/bin/msort.rs
//
// ‥ … ≤ ≥ ≠ ≟ ×

//! Driver program _msort_ drives the [_msortlib_].
//!
//! Processes user-passed command-line arguments, then merges the passed
//! files with one [`MergeDriver`]. Records are written to STDOUT, or with
//! `--output` to a memory-mapped file that grows as needed.
//!
//! Merging is single-threaded. Any failure to open, map, or inflate a file,
//! or to write the output, ends the program with a non-zero exit code.
//!
//! If passed CLI option `--summary`, a [`MergeSummary`] is printed to
//! stderr after merging.
//!
//! `msort.rs` should be the only module that prints records.
//!
//! [_msortlib_]: msortlib
//! [`MergeDriver`]: msortlib::merge::mergedriver::MergeDriver
//! [`MergeSummary`]: msortlib::merge::mergedriver::MergeSummary

#![allow(non_camel_case_types)]

// first setup the custom global allocator
use ::msortlib::common::AllocatorChosen;

cfg_if::cfg_if! {
    if #[cfg(feature = "jemalloc")] {
        use ::tikv_jemallocator::Jemalloc;
        #[global_allocator]
        static GLOBAL: Jemalloc = Jemalloc;
        const ALLOCATOR_CHOSEN: AllocatorChosen = AllocatorChosen::Jemalloc;
        const CLI_HELP_AFTER_ALLOCATOR: &str = "jemalloc";
    }
    else if #[cfg(feature = "mimalloc")] {
        use ::mimalloc::MiMalloc;
        #[global_allocator]
        static GLOBAL: MiMalloc = MiMalloc;
        const ALLOCATOR_CHOSEN: AllocatorChosen = AllocatorChosen::Mimalloc;
        const CLI_HELP_AFTER_ALLOCATOR: &str = "mimalloc";
    }
    else {
        const ALLOCATOR_CHOSEN: AllocatorChosen = AllocatorChosen::System;
        const CLI_HELP_AFTER_ALLOCATOR: &str = "system";
    }
}

use std::process::ExitCode;
use std::time::Instant;

use ::anyhow::Context;
use ::clap::Parser;
use ::const_format::concatcp;

use ::msortlib::common::{FPath, FPaths, MAX_COMPRESSION_RATIO, MAX_FILES};
use ::msortlib::debug::printers::{e_err, e_wrn};
use ::msortlib::matchers::macaddress::MacAddress;
use ::msortlib::merge::mergedriver::{MergeConfig, MergeDriver, MergeSummary};
use ::msortlib::printer::sink::{MappedOutputFile, StdoutSink};
use ::msortlib::printer::summary::print_summary;

use ::si_trace_print::stack::stack_offset_set;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// --------------------
// command-line parsing

#[cfg(debug_assertions)]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "\nDEBUG BUILD";
#[cfg(not(debug_assertions))]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "";

const CLI_HELP_AFTER: &str = concatcp!(
    r#"
Each input file must be sorted by its record timestamps. A record begins with
a timestamp of the form

    MM/DD HH:MM:SS.mmm

followed by one space, and continues until the next timestamp or the end of
the file. Bytes before the first timestamp of a file are not printed.

Files beginning with the gzip magic bytes are decompressed. A gzip file may
decompress to at most MAX_COMPRESSION_RATIO times its compressed size.

With --filter, a record that contains "(appctx):" and the MAC address
registers the value following "UUID: " (up to the next ","). Only records
whose "UUID: " value was registered are printed. MAC addresses within records
may have one or two hex digits per octet, e.g. "a:b:c:d:e:f" matches
"0a:0b:0c:0d:0e:0f".

At most "#, MAX_FILES, r#" files may be merged.

---

Version: "#, env!("CARGO_PKG_VERSION"), r#"
MSRV: "#, env!("CARGO_PKG_RUST_VERSION"), r#"
Allocator: "#, CLI_HELP_AFTER_ALLOCATOR, r#"
License: "#, env!("CARGO_PKG_LICENSE"), r#"
"#,
    CLI_HELP_AFTER_NOTE_DEBUG,
);

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    name = "msort",
    // write expanded information for the `--version` output
    version = concatcp!(
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "Allocator: ", CLI_HELP_AFTER_ALLOCATOR, "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of log files, each sorted by record timestamp.
    /// Files are merged in the order given when timestamps are equal.
    #[clap(
        required = true,
        verbatim_doc_comment,
    )]
    paths: Vec<String>,

    /// Write merged records to this file instead of STDOUT.
    #[clap(
        short = 'o',
        long = "output",
        verbatim_doc_comment,
    )]
    output: Option<String>,

    /// Insert a space and the file basename after every record timestamp.
    #[clap(
        short = 'a',
        long = "addfilename",
        verbatim_doc_comment,
    )]
    add_filename: bool,

    /// Only print records correlated to this MAC address,
    /// e.g. "AA:BB:CC:DD:EE:FF".
    #[clap(
        short = 'f',
        long = "filter",
        verbatim_doc_comment,
        value_parser = cli_parse_mac,
    )]
    filter: Option<MacAddress>,

    /// Largest allowed ratio of decompressed size to compressed size for
    /// gzip files.
    #[clap(
        long = "max-compression-ratio",
        verbatim_doc_comment,
        default_value_t = MAX_COMPRESSION_RATIO,
        value_parser = cli_parse_ratio,
    )]
    max_compression_ratio: usize,

    /// Print a summary of files processed to stderr.
    #[clap(
        short,
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// `clap` argument processor for `--filter`.
fn cli_parse_mac(mac: &str) -> std::result::Result<MacAddress, String> {
    match MacAddress::parse(mac) {
        Ok(val) => Ok(val),
        Err(err) => Err(format!("{}; expected six octets of one or two hex digits, e.g. \"0a:0b:0c:0d:0e:0f\"", err)),
    }
}

/// `clap` argument processor for `--max-compression-ratio`.
fn cli_parse_ratio(ratio: &str) -> std::result::Result<usize, String> {
    match ratio.parse::<usize>() {
        Ok(0) => Err(String::from("must be 1 or more")),
        Ok(val) => Ok(val),
        Err(err) => Err(format!("{}", err)),
    }
}

/// Process the user-passed command-line arguments into a [`MergeConfig`].
fn cli_process_args() -> (MergeConfig, Option<FPath>, bool) {
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let paths: FPaths = args.paths;
    let config = MergeConfig {
        paths,
        add_filename: args.add_filename,
        mac_filter: args.filter,
        max_compression_ratio: args.max_compression_ratio,
        max_files: MAX_FILES,
    };

    (config, args.output, args.summary)
}

// -------------------------------------------------------------------------------------------------

pub fn main() -> ExitCode {
    let start_time = Instant::now();
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let (config, output, cli_opt_summary) = cli_process_args();

    let exitcode = match processing(&config, output.as_ref()) {
        Ok(summary) => {
            if summary.files_no_timestamp > 0 {
                e_wrn!("{} file(s) without any timestamp", summary.files_no_timestamp);
            }
            if cli_opt_summary {
                print_summary(&summary, &config, output.as_ref(), start_time, ALLOCATOR_CHOSEN);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            e_err!("{:#}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

/// Merge the files of `config` into `output`, or STDOUT if `None`.
fn processing(config: &MergeConfig, output: Option<&FPath>) -> anyhow::Result<MergeSummary> {
    defn!("({:?}, {:?})", config, output);
    let mut driver = MergeDriver::new(config.clone())
        .context("cannot start merge")?;
    let summary: MergeSummary = match output {
        Some(path) => {
            let mut sink = MappedOutputFile::create(path)
                .with_context(|| format!("cannot create output file {:?}", path))?;
            let summary = driver
                .run(&mut sink)
                .context("merge failed")?;
            let _filesz = sink
                .close()
                .with_context(|| format!("cannot close output file {:?}", path))?;
            defo!("output file {:?} size {}", path, _filesz);

            summary
        }
        None => {
            let mut sink = StdoutSink::new();

            driver
                .run(&mut sink)
                .context("merge failed")?
        }
    };
    defx!("{:?}", summary);

    Ok(summary)
}
