//! Output formatting for query results and index statistics

use crate::index::IndexStats;
use serde::Serialize;
use std::io::{self, Write};

/// Offsets found for one pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub pattern: String,
    pub offsets: Vec<usize>,
}

/// Print reports one per line as `pattern: o1 o2 ...`, or as a JSON array
pub fn print_reports<W: Write>(out: &mut W, reports: &[QueryReport], json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, reports)?;
        writeln!(out)?;
        return Ok(());
    }

    for report in reports {
        write!(out, "{}:", report.pattern)?;
        if report.offsets.is_empty() {
            write!(out, " (no matches)")?;
        }
        for offset in &report.offsets {
            write!(out, " {}", offset)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_stats<W: Write>(out: &mut W, stats: &IndexStats, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, stats)?;
    } else {
        write!(out, "{}", stats)?;
    }
    writeln!(out)
}
