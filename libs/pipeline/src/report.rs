use std::collections::BTreeMap;
use std::io::Write;

use super::format::format_header;

/// Writes one text block per decoded row to the output stream.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `row_number` is 1-based.
    pub fn report(
        &mut self,
        row_number: usize,
        header: &BTreeMap<String, String>,
        payload: &str,
    ) -> std::io::Result<()> {
        writeln!(self.out, "Row {row_number}:")?;
        writeln!(self.out, "Header: {}", format_header(header))?;
        writeln!(self.out, "Payload: {payload}")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
