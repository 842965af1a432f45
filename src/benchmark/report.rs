/*!
 * Console Report
 * Per-engine result blocks, summary table and comparison analysis
 */

use super::result::{AlgorithmResult, BenchmarkResult};
use crate::core::types::Size;
use crate::memory::AllocatorKind;
use std::fmt;

const RULE: &str =
    "────────────────────────────────────────────────────────────────────────────────────";

const BOX_TOP: &str = "╔════════════════════════════════════════════════════════════════╗";
const BOX_BOTTOM: &str = "╚════════════════════════════════════════════════════════════════╝";

/// Result block for one engine
pub struct ResultReport<'a> {
    pub name: &'a str,
    pub result: &'a BenchmarkResult,
}

impl fmt::Display for ResultReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let r = self.result;
        writeln!(f, "=== {} Results ===", self.name)?;
        writeln!(f, "Average Allocation Time:   {:.6} seconds", r.avg_allocation_time)?;
        writeln!(f, "Average Deallocation Time: {:.6} seconds", r.avg_deallocation_time)?;
        writeln!(f, "Internal Fragmentation:    {} bytes", r.internal_fragmentation)?;
        writeln!(f, "Memory Efficiency:         {:.2}%", r.memory_efficiency)?;
        writeln!(f, "Failed Allocations:        {}", r.failed_allocations)?;
        writeln!(f, "Total Time:                {:.6} seconds", r.total_time)?;
        write!(f, "===============================")
    }
}

/// Full comparison: banner, per-engine blocks, summary table and analysis
pub struct ComparisonReport<'a> {
    pub pool_size: Size,
    pub allocations: usize,
    pub results: &'a [AlgorithmResult],
}

impl ComparisonReport<'_> {
    fn write_summary(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", BOX_TOP)?;
        writeln!(f, "║                    Summary Comparison                         ║")?;
        writeln!(f, "{}", BOX_BOTTOM)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<25} {:<15} {:<15} {:<15} {:<15}",
            "Algorithm", "Avg Alloc (s)", "Efficiency (%)", "Failed", "Total Time (s)"
        )?;
        writeln!(f, "{}", RULE)?;
        for entry in self.results {
            writeln!(
                f,
                "{:<25} {:<15.6} {:<15.2} {:<15} {:<15.6}",
                entry.name(),
                entry.result.avg_allocation_time,
                entry.result.memory_efficiency,
                entry.result.failed_allocations,
                entry.result.total_time
            )?;
        }
        writeln!(f, "{}", RULE)
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", BOX_TOP)?;
        writeln!(f, "║       Memory Allocation Algorithms Comparison                 ║")?;
        writeln!(f, "║   McKusick-Karels vs Power-of-2 (Buddy System)                ║")?;
        writeln!(f, "{}", BOX_BOTTOM)?;
        writeln!(f)?;
        writeln!(f, "Pool Size: {} bytes", self.pool_size)?;
        writeln!(f, "Number of Allocations: {}", self.allocations)?;

        for entry in self.results {
            writeln!(f)?;
            let block = ResultReport {
                name: entry.algorithm.name(),
                result: &entry.result,
            };
            writeln!(f, "{}", block)?;
        }

        writeln!(f)?;
        self.write_summary(f)?;

        let lines = analysis(self.results);
        if !lines.is_empty() {
            writeln!(f)?;
            writeln!(f, "Analysis:")?;
            for line in lines {
                writeln!(f, "  • {}", line)?;
            }
        }
        Ok(())
    }
}

/// Result block for one engine as text
pub fn render_result(name: &str, result: &BenchmarkResult) -> String {
    ResultReport { name, result }.to_string()
}

/// Full comparison as text
pub fn render_comparison(
    pool_size: Size,
    allocations: usize,
    results: &[AlgorithmResult],
) -> String {
    ComparisonReport {
        pool_size,
        allocations,
        results,
    }
    .to_string()
}

/// Head-to-head verdicts; empty unless both engines are present
///
/// Ties go to the buddy engine, matching a strict "segregated wins" test.
pub fn analysis(results: &[AlgorithmResult]) -> Vec<String> {
    let find = |kind| results.iter().find(|r| r.algorithm == kind).map(|r| &r.result);
    let (Some(mk), Some(p2)) = (find(AllocatorKind::Segregated), find(AllocatorKind::Buddy)) else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(3);
    if mk.memory_efficiency > p2.memory_efficiency {
        lines.push(format!(
            "McKusick-Karels shows better memory efficiency ({:.2}% vs {:.2}%)",
            mk.memory_efficiency, p2.memory_efficiency
        ));
    } else {
        lines.push(format!(
            "Power-of-2 shows better memory efficiency ({:.2}% vs {:.2}%)",
            p2.memory_efficiency, mk.memory_efficiency
        ));
    }

    if mk.avg_allocation_time < p2.avg_allocation_time {
        lines.push("McKusick-Karels is faster at allocation".to_string());
    } else {
        lines.push("Power-of-2 is faster at allocation".to_string());
    }

    if mk.internal_fragmentation < p2.internal_fragmentation {
        lines.push("McKusick-Karels has lower internal fragmentation".to_string());
    } else {
        lines.push("Power-of-2 has lower internal fragmentation".to_string());
    }
    lines
}
