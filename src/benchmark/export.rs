/*!
 * CSV Export
 *
 * Header and per-field precision are consumed by downstream plotting and
 * must stay fixed.
 */

use super::result::AlgorithmResult;
use crate::core::errors::BenchResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub const CSV_HEADER: &str = "algorithm,avg_allocation_time,avg_deallocation_time,\
memory_efficiency,internal_fragmentation,failed_allocations,total_time";

/// Write the header and one row per result
pub fn write_csv<W: Write>(mut writer: W, results: &[AlgorithmResult]) -> std::io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for entry in results {
        let r = &entry.result;
        writeln!(
            writer,
            "{},{:.10},{:.10},{:.4},{},{},{:.10}",
            entry.name(),
            r.avg_allocation_time,
            r.avg_deallocation_time,
            r.memory_efficiency,
            r.internal_fragmentation,
            r.failed_allocations,
            r.total_time
        )?;
    }
    writer.flush()
}

/// Create (or truncate) `path` and write the results
pub fn export_csv(path: &Path, results: &[AlgorithmResult]) -> BenchResult<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), results)?;
    info!(path = %path.display(), rows = results.len(), "Benchmark results exported");
    Ok(())
}
