use std::collections::BTreeMap;

use decoder_api::{Row, StageError};
use parquet::basic::Type as PhysicalType;
use parquet::record::{Field, Row as ParquetRow};
use parquet::schema::types::SchemaDescriptor;

pub(crate) const HEADER_COLUMN: &str = "header";
pub(crate) const PAYLOAD_COLUMN: &str = "payload";

// ═══════════════════════════════════════════════════════════════
//  Schema check
// ═══════════════════════════════════════════════════════════════

/// Verify the file has a map-shaped `header` column and a byte-array
/// `payload` column. Names match case-insensitively.
pub(crate) fn check_schema(schema: &SchemaDescriptor) -> Result<(), StageError> {
    let fields = schema.root_schema().get_fields();
    let find = |name: &str| fields.iter().find(|f| f.name().eq_ignore_ascii_case(name));

    let header = find(HEADER_COLUMN)
        .ok_or_else(|| StageError::io(format!("parquet: missing column '{HEADER_COLUMN}'")))?;
    if !header.is_group() {
        return Err(StageError::io(format!(
            "parquet: column '{HEADER_COLUMN}' must be a map"
        )));
    }

    let payload = find(PAYLOAD_COLUMN)
        .ok_or_else(|| StageError::io(format!("parquet: missing column '{PAYLOAD_COLUMN}'")))?;
    if !payload.is_primitive() || payload.get_physical_type() != PhysicalType::BYTE_ARRAY {
        return Err(StageError::io(format!(
            "parquet: column '{PAYLOAD_COLUMN}' must be a byte array"
        )));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════
//  Parquet record → Row
// ═══════════════════════════════════════════════════════════════

pub(crate) fn row_from_record(record: &ParquetRow) -> Result<Row, StageError> {
    let mut header = BTreeMap::new();
    let mut payload = Vec::new();
    for (name, field) in record.get_column_iter() {
        if name.eq_ignore_ascii_case(HEADER_COLUMN) {
            header = header_from_field(field)?;
        } else if name.eq_ignore_ascii_case(PAYLOAD_COLUMN) {
            payload = payload_from_field(field)?;
        }
    }
    Ok(Row::new(header, payload))
}

fn header_from_field(field: &Field) -> Result<BTreeMap<String, String>, StageError> {
    match field {
        Field::Null => Ok(BTreeMap::new()),
        Field::MapInternal(map) => map
            .entries()
            .iter()
            .map(|(k, v)| Ok((text_from_field(k)?, text_from_field(v)?)))
            .collect(),
        other => Err(StageError::io(format!(
            "parquet: column '{HEADER_COLUMN}': expected map, got {other}"
        ))),
    }
}

fn text_from_field(field: &Field) -> Result<String, StageError> {
    match field {
        Field::Str(s) => Ok(s.clone()),
        Field::Bytes(b) => Ok(String::from_utf8_lossy(b.data()).into_owned()),
        Field::Null => Ok(String::new()),
        other => Err(StageError::io(format!(
            "parquet: column '{HEADER_COLUMN}': expected string entry, got {other}"
        ))),
    }
}

fn payload_from_field(field: &Field) -> Result<Vec<u8>, StageError> {
    match field {
        Field::Bytes(b) => Ok(b.data().to_vec()),
        Field::Str(s) => Ok(s.clone().into_bytes()),
        Field::Null => Ok(Vec::new()),
        other => Err(StageError::io(format!(
            "parquet: column '{PAYLOAD_COLUMN}': expected bytes, got {other}"
        ))),
    }
}
