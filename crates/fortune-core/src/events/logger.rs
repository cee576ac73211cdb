//! Field Logger
//!
//! Append-only JSONL log of the event field drawn at each iteration, for
//! plotting or replaying a run outside the simulation.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use fortune_events::FieldRecord;

/// Writes one `FieldRecord` per line
pub struct FieldLogger {
    writer: Option<BufWriter<File>>,
    record_count: u64,
}

impl FieldLogger {
    /// Create a new logger writing to the given path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            record_count: 0,
        })
    }

    /// Create a logger that discards records
    pub fn null() -> Self {
        Self {
            writer: None,
            record_count: 0,
        }
    }

    /// Whether records are actually written anywhere
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Log a record to the file
    pub fn log(&mut self, record: &FieldRecord) -> std::io::Result<()> {
        self.record_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = record.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FieldLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush field logger: {}", e);
        }
    }
}

/// Read every record back from a JSONL field log
pub fn read_field_log(path: impl AsRef<Path>) -> std::io::Result<Vec<FieldRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(FieldRecord::from_jsonl(&line)?);
    }
    Ok(records)
}
