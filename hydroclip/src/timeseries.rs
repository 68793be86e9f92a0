//! Merging of gauge time series into one table.
//!
//! Each source is a CSV file with a `timestamp,value` header and rows sorted by ascending timestamp. The merge reads
//! every source exactly once, front to back, and stops reading a source at its first timestamp after the end of the
//! window. A source that is not sorted therefore loses every row after the first out-of-window timestamp.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::HydroclipError;

/// Inclusive range of timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First timestamp to include.
    pub start: i64,
    /// Last timestamp to include.
    pub end: i64,
}

impl TimeWindow {
    /// Creates a window. The limits are swapped if `start > end`.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }
}

/// One row of a source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Time of the observation.
    pub timestamp: i64,
    /// Observed value.
    pub value: f64,
}

struct Source<R: Read> {
    rows: csv::DeserializeRecordsIntoIter<R, Observation>,
    current: Option<Observation>,
    window: TimeWindow,
}

impl<R: Read> Source<R> {
    fn new(reader: R, window: TimeWindow) -> Result<Self, HydroclipError> {
        let mut source = Self {
            rows: csv::Reader::from_reader(reader).into_deserialize(),
            current: None,
            window,
        };
        source.advance()?;
        Ok(source)
    }

    /// Moves to the next row within the window. Once a row after the window is seen, the source is exhausted.
    fn advance(&mut self) -> Result<(), HydroclipError> {
        self.current = None;
        for row in self.rows.by_ref() {
            let row = row?;
            if row.timestamp < self.window.start {
                continue;
            }
            if row.timestamp <= self.window.end {
                self.current = Some(row);
            }
            break;
        }

        Ok(())
    }
}

/// Merges sources into a CSV with a `timestamp` column followed by one value column per source.
///
/// Every distinct timestamp becomes one output row, with empty cells for sources without a value at that time.
/// Returns the number of rows written, not counting the header.
pub fn merge<R: Read, W: Write>(
    sources: Vec<(String, R)>,
    window: TimeWindow,
    output: W,
) -> Result<usize, HydroclipError> {
    let mut writer = csv::Writer::from_writer(output);

    let mut header = Vec::with_capacity(sources.len() + 1);
    header.push("timestamp".to_string());
    let mut readers = Vec::with_capacity(sources.len());
    for (name, reader) in sources {
        header.push(name);
        readers.push(Source::new(reader, window)?);
    }
    writer.write_record(&header)?;

    let mut row_count = 0;
    while let Some(timestamp) = readers
        .iter()
        .filter_map(|s| s.current.map(|o| o.timestamp))
        .min()
    {
        let mut record = Vec::with_capacity(readers.len() + 1);
        record.push(timestamp.to_string());
        for source in &mut readers {
            match source.current {
                Some(observation) if observation.timestamp == timestamp => {
                    record.push(observation.value.to_string());
                    source.advance()?;
                }
                _ => record.push(String::new()),
            }
        }

        writer.write_record(&record)?;
        row_count += 1;
    }

    writer.flush()?;
    debug!("Merged {row_count} time steps");
    Ok(row_count)
}

/// Merges CSV files into one output file. Value columns are named after the file stems.
pub fn merge_files(
    inputs: &[impl AsRef<Path>],
    window: TimeWindow,
    output: &Path,
) -> Result<usize, HydroclipError> {
    let mut sources = Vec::with_capacity(inputs.len());
    for input in inputs {
        let path = input.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        sources.push((name, File::open(path)?));
    }

    let file = File::create(output)?;
    match merge(sources, window, file) {
        Ok(count) => Ok(count),
        Err(e) => {
            let _ = std::fs::remove_file(output);
            Err(e)
        }
    }
}
