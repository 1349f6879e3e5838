use std::io::Write;

use decoder_api::{PayloadCodec, RowSource};

use crate::error::PipelineError;
use crate::format::format_payload_or_placeholder;
use crate::report::Reporter;

/// Outcome counters of one run. `printed + skipped == rows` always holds
/// for a run that returns `Ok`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows: usize,
    pub printed: usize,
    pub skipped: usize,
}

// ═══════════════════════════════════════════════════════════════
//  Row loop: source → codec → reporter
// ═══════════════════════════════════════════════════════════════

/// Read every row of `source`, decode its payload with `codec` and report it.
///
/// A row that fails to decode is logged and skipped. A row that fails to
/// read, or a failed write to the output, aborts the run.
pub fn run<S, C, W>(
    source: &mut S,
    codec: &C,
    reporter: &mut Reporter<W>,
) -> Result<RunStats, PipelineError>
where
    S: RowSource + ?Sized,
    C: PayloadCodec + ?Sized,
    W: Write,
{
    let mut stats = RunStats { rows: source.row_count(), ..RunStats::default() };

    for index in 0..stats.rows {
        let row = source
            .read_row(index)
            .map_err(|source| PipelineError::ReadRow { index, source })?;

        let decoded = match codec.decode(&row.payload) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(row = index, error = %e, "failed to decode payload, skipping row");
                stats.skipped += 1;
                continue;
            }
        };

        let text = format_payload_or_placeholder(&decoded, index);
        reporter.report(index + 1, &row.header, &text)?;
        stats.printed += 1;
    }

    reporter.flush()?;
    tracing::info!(
        rows = stats.rows,
        printed = stats.printed,
        skipped = stats.skipped,
        "all rows processed"
    );
    Ok(stats)
}
