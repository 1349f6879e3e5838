use std::fs::File;
use std::path::Path;

use decoder_api::{Row, RowSource, StageError};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::reader::RowIter;

use super::convert::{check_schema, row_from_record};

// ════════════════════════════════════════════════════════════════
//  ParquetSource
// ════════════════════════════════════════════════════════════════

/// Sequential row reader over a local Parquet file.
///
/// Owns the file handle; it is closed when the source is dropped.
pub struct ParquetSource {
    row_count: usize,
    rows: RowIter<'static>,
    next_index: usize,
}

impl ParquetSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StageError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            StageError::io(format!("failed to open parquet file '{}': {e}", path.display()))
        })?;
        let reader = SerializedFileReader::new(file).map_err(|e| {
            StageError::io(format!("failed to create parquet reader for '{}': {e}", path.display()))
        })?;

        let metadata = reader.metadata();
        let file_metadata = metadata.file_metadata();
        check_schema(file_metadata.schema_descr())?;

        let num_rows = file_metadata.num_rows();
        let row_count = usize::try_from(num_rows).map_err(|_| {
            StageError::io(format!("parquet: invalid row count {num_rows} in '{}'", path.display()))
        })?;
        tracing::info!(
            path = %path.display(),
            rows = row_count,
            row_groups = metadata.num_row_groups(),
            "parquet file opened"
        );

        let rows = RowIter::from_file_into(Box::new(reader));
        Ok(Self { row_count, rows, next_index: 0 })
    }
}

impl RowSource for ParquetSource {
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn read_row(&mut self, index: usize) -> Result<Row, StageError> {
        if index >= self.row_count {
            return Err(StageError::io(format!(
                "row {index} out of range, file has {} rows",
                self.row_count
            )));
        }
        if index != self.next_index {
            return Err(StageError::io(format!(
                "row {index} requested out of order, next row is {}",
                self.next_index
            )));
        }

        let record = match self.rows.next() {
            Some(Ok(record)) => record,
            Some(Err(e)) => return Err(StageError::io(format!("parquet: {e}"))),
            None => {
                return Err(StageError::io(format!(
                    "parquet: file ended before row {index}"
                )));
            }
        };
        self.next_index += 1;
        row_from_record(&record)
    }
}
