use std::collections::BTreeMap;

mod error;
mod value;

pub use error::{ErrorKind, StageError};
pub use value::Value;

// ════════════════════════════════════════════════════════════════
//  Row
// ════════════════════════════════════════════════════════════════

/// One record read from the input file.
///
/// `header` is metadata stored next to the payload; `payload` is opaque
/// until a codec interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub header: BTreeMap<String, String>,
    pub payload: Vec<u8>,
}

impl Row {
    pub fn new(header: BTreeMap<String, String>, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }
}

// ════════════════════════════════════════════════════════════════
//  Stage Traits
// ════════════════════════════════════════════════════════════════

/// Sequential row reader over an opened file.
///
/// The row count is fixed once the source is open. Rows are read in file
/// order; each index in `0..row_count()` is read exactly once.
pub trait RowSource {
    /// Total number of rows in the file.
    fn row_count(&self) -> usize;

    /// Read the row at `index`. Errors here are I/O errors and abort the run.
    fn read_row(&mut self, index: usize) -> Result<Row, StageError>;
}

/// Payload decoder bound to a fixed schema.
///
/// Implementations are stateless between calls: decoding the same bytes
/// twice yields equal values.
pub trait PayloadCodec {
    /// Raw payload bytes → structured value.
    fn decode(&self, data: &[u8]) -> Result<Value, StageError>;
}
