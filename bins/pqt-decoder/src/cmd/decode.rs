use std::io::Write;

use codec_avro::AvroCodec;
use pipeline::{PipelineError, Reporter, RunStats};
use source_parquet::ParquetSource;

use crate::config::DecoderConfig;

/// Open the input, bind the payload schema and print every decodable row to `out`.
///
/// The file handle lives in `source` and is released when this returns,
/// on success and on error alike.
pub fn run<W: Write>(config: &DecoderConfig, out: W) -> Result<RunStats, PipelineError> {
    tracing::debug!(path = %config.input_path.display(), "decoding input");
    let mut source = ParquetSource::open(&config.input_path).map_err(PipelineError::Open)?;
    let codec = AvroCodec::new(config.payload_schema).map_err(PipelineError::Schema)?;

    let mut reporter = Reporter::new(out);
    pipeline::run(&mut source, &codec, &mut reporter)
}
