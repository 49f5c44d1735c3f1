//! Results table.
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    QuickSelect,
    CountInversions,
    ClosestPair,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::QuickSelect => "Quick Select",
            Algorithm::CountInversions => "Count Inversions",
            Algorithm::ClosestPair => "Closest Pair",
        };
        f.pad(name)
    }
}

/// Outcome of cross-checking a result against a reference computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Passed,
    Failed,
    /// No reference was run (disabled, or the input is too large for it).
    Skipped,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Check::Passed => "ok",
            Check::Failed => "FAILED",
            Check::Skipped => "-",
        };
        f.pad(label)
    }
}

/// One measured call.
#[derive(Debug, Clone)]
pub struct Row {
    pub algorithm: Algorithm,
    pub size: usize,
    pub elapsed: Duration,
    /// Peak heap bytes above the pre-call baseline, when a tracker is installed.
    pub peak_bytes: Option<usize>,
    pub result: String,
    pub check: Check,
}

impl Row {
    fn cells(&self) -> [String; 6] {
        [
            self.algorithm.to_string(),
            self.size.to_string(),
            format!("{:.2}", self.elapsed.as_secs_f64() * 1e6),
            self.peak_bytes
                .map_or_else(|| "-".to_string(), |b| format!("{:.2}", b as f64 / 1024.0)),
            self.result.clone(),
            self.check.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    rows: Vec<Row>,
}

impl Report {
    const HEADER: [&'static str; 6] = [
        "Algorithm",
        "n",
        "Time (µs)",
        "Memory (KiB)",
        "Result",
        "Check",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows whose result disagreed with the reference.
    pub fn failures(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.check == Check::Failed)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body: Vec<[String; 6]> = self.rows.iter().map(Row::cells).collect();

        let mut widths = Self::HEADER.map(|h| h.chars().count());
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        // Text columns are left aligned, numeric ones right aligned.
        let write_line = |f: &mut fmt::Formatter<'_>, cells: [&str; 6]| -> fmt::Result {
            for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                match i {
                    1..=3 => write!(f, "{cell:>width$}")?,
                    _ => write!(f, "{cell:<width$}")?,
                }
            }
            writeln!(f)
        };

        write_line(f, Self::HEADER)?;
        let rule = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
        writeln!(f, "{}", "-".repeat(rule))?;
        for cells in &body {
            write_line(f, cells.each_ref().map(String::as_str))?;
        }
        Ok(())
    }
}
