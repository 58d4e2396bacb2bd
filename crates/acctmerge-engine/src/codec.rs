//! CSV record codec for account input and enriched output.
//!
//! Both sides disable the `csv` crate's implicit header handling: the input
//! header is read and validated explicitly, and the output header is written
//! explicitly, so neither depends on struct field names.

use std::io::{self, Read, Write};

use acctmerge_types::{InputRow, OutputRow, INPUT_HEADER, OUTPUT_HEADER};
use csv::StringRecord;

use crate::errors::{MergeError, MergePhase};

/// Check a header record against [`INPUT_HEADER`] (length, order, exact case).
///
/// # Errors
///
/// Returns [`MergeError::InvalidHeader`] carrying the fields actually found.
pub fn validate_input_header(record: &StringRecord) -> Result<(), MergeError> {
    let matches = record.len() == INPUT_HEADER.len()
        && record.iter().zip(INPUT_HEADER).all(|(found, expected)| found == expected);
    if matches {
        Ok(())
    } else {
        Err(MergeError::InvalidHeader {
            found: record.iter().map(str::to_string).collect(),
        })
    }
}

/// Lazy, forward-only reader of [`InputRow`]s.
pub struct RecordReader<R: Read> {
    inner: csv::Reader<R>,
    record: StringRecord,
}

impl<R: Read> RecordReader<R> {
    pub fn new(input: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(input);
        Self {
            inner,
            record: StringRecord::new(),
        }
    }

    /// Read and validate the header line. Must be called once, before any row.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Read`] if the input is empty or unreadable, and
    /// [`MergeError::InvalidHeader`] if the columns do not match.
    pub fn read_header(&mut self) -> Result<Vec<String>, MergeError> {
        let read = self
            .inner
            .read_record(&mut self.record)
            .map_err(|source| MergeError::Read {
                phase: MergePhase::Header,
                source,
            })?;
        if !read {
            return Err(MergeError::Read {
                phase: MergePhase::Header,
                source: csv::Error::from(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input is empty",
                )),
            });
        }
        validate_input_header(&self.record)?;
        Ok(self.record.iter().map(str::to_string).collect())
    }

    /// Read the next data row, or `None` at end of input.
    ///
    /// Rows whose field count differs from the header are read errors.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Read`] on I/O or decode failure.
    pub fn read_row(&mut self) -> Result<Option<InputRow>, MergeError> {
        let read_err = |source| MergeError::Read {
            phase: MergePhase::Row,
            source,
        };
        if !self.inner.read_record(&mut self.record).map_err(read_err)? {
            return Ok(None);
        }
        self.record.deserialize(None).map(Some).map_err(read_err)
    }
}

/// Buffered writer of [`OutputRow`]s.
///
/// Output is buffered; call [`RecordWriter::finish`] once after the last row.
/// Dropping an unfinished writer still pushes buffered bytes to the sink on a
/// best-effort basis and discards any error, so output left behind by a
/// failed run must be thrown away by the caller.
pub struct RecordWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(output: W) -> Self {
        let inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(output);
        Self { inner }
    }

    /// # Errors
    ///
    /// Returns [`MergeError::Write`] with phase `header`.
    pub fn write_header(&mut self) -> Result<(), MergeError> {
        self.inner
            .write_record(OUTPUT_HEADER)
            .map_err(|source| MergeError::Write {
                phase: MergePhase::Header,
                source,
            })
    }

    /// # Errors
    ///
    /// Returns [`MergeError::Write`] with phase `row`.
    pub fn write_row(&mut self, row: &OutputRow) -> Result<(), MergeError> {
        self.inner.serialize(row).map_err(|source| MergeError::Write {
            phase: MergePhase::Row,
            source,
        })
    }

    /// Flush buffered bytes once and hand back the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Flush`] if the buffered bytes cannot be written out.
    pub fn finish(self) -> Result<W, MergeError> {
        self.inner
            .into_inner()
            .map_err(|err| MergeError::Flush(err.into_error()))
    }
}
