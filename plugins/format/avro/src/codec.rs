use apache_avro::Schema;
use decoder_api::{PayloadCodec, StageError, Value};

use super::convert::avro_to_value;
use super::schema::GATEWAY_PAYLOAD_SCHEMA;

// ═══════════════════════════════════════════════════════════════
//  AvroCodec
// ═══════════════════════════════════════════════════════════════

/// Decodes single Avro binary datums (no container header) against a
/// schema parsed once at construction.
pub struct AvroCodec {
    schema: Schema,
}

impl AvroCodec {
    pub fn new(schema_json: &str) -> Result<Self, StageError> {
        let schema = Schema::parse_str(schema_json)
            .map_err(|e| StageError::schema(format!("avro: failed to parse schema: {e}")))?;
        tracing::debug!(schema = %schema.canonical_form(), "avro schema parsed");
        Ok(Self { schema })
    }

    /// Codec for the gateway record stored in the `payload` column.
    pub fn gateway() -> Result<Self, StageError> {
        Self::new(GATEWAY_PAYLOAD_SCHEMA)
    }
}

impl PayloadCodec for AvroCodec {
    fn decode(&self, data: &[u8]) -> Result<Value, StageError> {
        let mut reader = data;
        let avro_value = apache_avro::from_avro_datum(&self.schema, &mut reader, None)
            .map_err(|e| StageError::decode(format!("avro decode: {e}")))?;
        if !reader.is_empty() {
            tracing::trace!(trailing = reader.len(), "ignoring bytes after avro datum");
        }
        Ok(avro_to_value(&avro_value))
    }
}
