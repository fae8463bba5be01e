//! Summary file writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::schema::SummaryRecord;
use crate::Result;

/// Writer for per-event analysis summaries.
pub struct SummaryWriter {
    writer: BufWriter<File>,
}

impl SummaryWriter {
    /// Creates a new summary writer.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Writes all summaries as a JSON array.
    pub fn write_summaries(&mut self, summaries: &[SummaryRecord]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, summaries)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes the writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_events;
    use tempfile::NamedTempFile;
    use voxana_core::ScoredTrack;

    #[test]
    fn test_write_and_reread_summaries() {
        let file = NamedTempFile::new().unwrap();

        let summaries = vec![SummaryRecord {
            event: 3,
            new_energies: vec![6.0, 0.0, 3.0],
            associations: vec![Some(0), None, Some(0)],
            selected: vec![ScoredTrack {
                energy: 9.0,
                length: 10.0,
                track: 0,
            }],
        }];

        let mut writer = SummaryWriter::create(file.path()).unwrap();
        writer.write_summaries(&summaries).unwrap();
        drop(writer);

        let reread: Vec<SummaryRecord> =
            serde_json::from_reader(std::fs::File::open(file.path()).unwrap()).unwrap();
        assert_eq!(reread, summaries);
    }

    #[test]
    fn test_missing_input_file_is_io_error() {
        let err = read_events("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
