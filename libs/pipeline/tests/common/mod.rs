use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use apache_avro::types::Value as AvroValue;
use apache_avro::Schema;
use codec_avro::GATEWAY_PAYLOAD_SCHEMA;
use parquet::data_type::{ByteArray, ByteArrayType};
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;
use tracing_subscriber::fmt::MakeWriter;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

const GATEWAY_MESSAGE: &str = "
message gateway {
    required group header (MAP) {
        repeated group key_value {
            required binary key (UTF8);
            required binary value (UTF8);
        }
    }
    required binary payload;
}";

/// Avro datum of a gateway record.
pub fn gateway_datum(header: &[(&str, &str)], payload: &[u8]) -> Vec<u8> {
    let schema = Schema::parse_str(GATEWAY_PAYLOAD_SCHEMA).unwrap();
    let header: HashMap<String, AvroValue> = header
        .iter()
        .map(|(k, v)| (k.to_string(), AvroValue::String(v.to_string())))
        .collect();
    let record = AvroValue::Record(vec![
        ("header".into(), AvroValue::Map(header)),
        ("payload".into(), AvroValue::Bytes(payload.to_vec())),
    ]);
    apache_avro::to_avro_datum(&schema, record).unwrap()
}

/// Write a single-row-group Parquet file with `header` and `payload` columns.
pub fn write_gateway_file(path: &Path, rows: &[(Vec<(&str, &str)>, Vec<u8>)]) -> TestResult {
    let schema = Arc::new(parse_message_type(GATEWAY_MESSAGE)?);

    let mut keys = Vec::new();
    let mut values = Vec::new();
    let mut def_levels = Vec::new();
    let mut rep_levels = Vec::new();
    let mut payloads = Vec::new();
    for (header, payload) in rows {
        if header.is_empty() {
            def_levels.push(0);
            rep_levels.push(0);
        }
        for (i, (k, v)) in header.iter().enumerate() {
            keys.push(ByteArray::from(*k));
            values.push(ByteArray::from(*v));
            def_levels.push(1);
            rep_levels.push(if i == 0 { 0 } else { 1 });
        }
        payloads.push(ByteArray::from(payload.clone()));
    }

    let file = File::create(path)?;
    let props = Arc::new(WriterProperties::builder().build());
    let mut writer = SerializedFileWriter::new(file, schema, props)?;
    if rows.is_empty() {
        writer.close()?;
        return Ok(());
    }
    let mut row_group = writer.next_row_group()?;
    let mut column = 0;
    while let Some(mut col_writer) = row_group.next_column()? {
        let typed = col_writer.typed::<ByteArrayType>();
        match column {
            0 => typed.write_batch(&keys, Some(def_levels.as_slice()), Some(rep_levels.as_slice()))?,
            1 => typed.write_batch(&values, Some(def_levels.as_slice()), Some(rep_levels.as_slice()))?,
            _ => typed.write_batch(&payloads, None, None)?,
        };
        col_writer.close()?;
        column += 1;
    }
    row_group.close()?;
    writer.close()?;
    Ok(())
}

/// In-memory log sink shared between a test and its `fmt` subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
