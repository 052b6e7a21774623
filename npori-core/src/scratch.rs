//! Spill buffer between the streaming pass and gene consolidation.
//!
//! Accepted records are appended to an anonymous temporary file as a
//! serialized JSON array, in emission order, so the streaming pass keeps
//! O(1) records resident. Consolidation reads the whole array back once
//! streaming is done.

use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};

use serde_json::Value;

use crate::errors::ConvertError;

/// Append-only serialized array of emitted records; write-once per record,
/// read back in full by the second pass.
#[derive(Debug)]
pub struct ScratchBuffer {
    writer: BufWriter<File>,
    count: usize,
}

impl ScratchBuffer {
    pub fn create() -> Result<Self, ConvertError> {
        let mut writer = BufWriter::new(tempfile::tempfile()?);
        writer.write_all(b"[\n")?;
        Ok(ScratchBuffer { writer, count: 0 })
    }

    /// Append one record, separated from the previous one by a comma.
    pub fn push(&mut self, record: &Value) -> Result<(), ConvertError> {
        if self.count > 0 {
            self.writer.write_all(b",\n")?;
        }
        serde_json::to_writer_pretty(&mut self.writer, record)?;
        self.count += 1;
        Ok(())
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Close the array and read every record back, in emission order.
    pub fn into_records(mut self) -> Result<Vec<Value>, ConvertError> {
        self.writer.write_all(b"\n]")?;
        self.writer.flush()?;
        let mut file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.seek(SeekFrom::Start(0))?;
        let records = serde_json::from_reader(BufReader::new(file))?;
        Ok(records)
    }
}
