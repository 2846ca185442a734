//! CSV input reader producing [`CommunityUpdate`] records.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::domain::entities::CommunityUpdate;
use crate::error::InputError;

/// Lazy, forward-only sequence of community updates read from comma-separated rows.
///
/// Every row is data unless `has_headers` is set, in which case the first row
/// is skipped. Rows must all have the same number of fields (the csv crate's
/// strict mode); any decode or I/O error is returned once and ends iteration.
pub struct CsvSource<R> {
    reader: Reader<R>,
    record: StringRecord,
    finished: bool,
}

impl CsvSource<File> {
    /// Opens `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Open`] if the file cannot be opened.
    pub fn open(path: &Path, has_headers: bool) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|source| InputError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_reader(file, has_headers))
    }
}

impl<R: io::Read> CsvSource<R> {
    pub fn from_reader(reader: R, has_headers: bool) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(has_headers)
            .from_reader(reader);

        Self {
            reader,
            record: StringRecord::new(),
            finished: false,
        }
    }

    fn read_next(&mut self) -> Result<Option<CommunityUpdate>, InputError> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }

        CommunityUpdate::from_record(&self.record).map(Some)
    }
}

impl<R: io::Read> Iterator for CsvSource<R> {
    type Item = Result<CommunityUpdate, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_next() {
            Ok(Some(update)) => Some(Ok(update)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
