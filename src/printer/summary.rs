// src/printer/summary.rs

//! CLI option `--summary` printing functions.
//! Only used by `msort.rs`.

use std::time::{Duration, Instant};

use crate::common::{AllocatorChosen, FPath};
use crate::merge::mergedriver::{MergeConfig, MergeSummary};

use ::si_trace_print::defñ;

/// Write the `summary` of a merge to `out`, one aligned field per line.
pub fn write_summary<W: std::io::Write>(
    out: &mut W,
    summary: &MergeSummary,
    config: &MergeConfig,
    output_path: Option<&FPath>,
    elapsed: Duration,
    allocator_chosen: AllocatorChosen,
) -> std::io::Result<()> {
    writeln!(out, "Program Summary:\n")?;
    writeln!(out, "Files given            : {}", summary.files_given)?;
    writeln!(out, "Files opened           : {}", summary.files_opened)?;
    writeln!(out, "Files gzip             : {}", summary.files_gz)?;
    writeln!(out, "Files w/o timestamps   : {}", summary.files_no_timestamp)?;
    writeln!(out, "Records read           : {}", summary.records_read)?;
    writeln!(out, "Records printed        : {}", summary.records_emitted)?;
    writeln!(out, "Printed bytes          : {}", summary.bytes_written)?;
    match &config.mac_filter {
        Some(mac) => {
            writeln!(out, "Filter MAC address     : {}", mac)?;
            writeln!(out, "Identifiers collected  : {}", summary.identifiers)?;
            writeln!(out, "Records malformed      : {}", summary.records_malformed)?;
        }
        None => {
            writeln!(out, "Filter MAC address     :")?;
        }
    }
    match output_path {
        Some(path) => writeln!(out, "Output                 : {:?}", path)?,
        None => writeln!(out, "Output                 : STDOUT")?,
    }
    writeln!(out, "Max compression ratio  : {}", config.max_compression_ratio)?;
    writeln!(out, "Allocator              : {:?}", allocator_chosen)?;
    writeln!(out, "Program run time       : {:.3} seconds", elapsed.as_secs_f64())?;

    Ok(())
}

/// Print the `summary` of a merge to stderr.
pub fn print_summary(
    summary: &MergeSummary,
    config: &MergeConfig,
    output_path: Option<&FPath>,
    start_time: Instant,
    allocator_chosen: AllocatorChosen,
) {
    defñ!();
    let elapsed: Duration = Instant::now().duration_since(start_time);
    let mut stderr_lock = std::io::stderr().lock();
    if let Err(_err) = write_summary(
        &mut stderr_lock,
        summary,
        config,
        output_path,
        elapsed,
        allocator_chosen,
    ) {
        crate::de_err!("write_summary failed {}", _err);
    }
}
