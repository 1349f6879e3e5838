use apache_avro::types::Value as AvroValue;
use decoder_api::Value;

// ═══════════════════════════════════════════════════════════════
//  Avro → Value conversion
// ═══════════════════════════════════════════════════════════════

pub(crate) fn avro_to_value(value: &AvroValue) -> Value {
    match value {
        AvroValue::Null => Value::Null,
        AvroValue::Boolean(b) => Value::Bool(*b),
        AvroValue::Int(i) => Value::Integer(i64::from(*i)),
        AvroValue::Long(l) => Value::Integer(*l),
        AvroValue::Float(f) => Value::Float(f64::from(*f)),
        AvroValue::Double(d) => Value::Float(*d),
        AvroValue::Bytes(b) | AvroValue::Fixed(_, b) => Value::Bytes(b.clone()),
        AvroValue::String(s) | AvroValue::Enum(_, s) => Value::String(s.clone()),
        AvroValue::Union(_, inner) => avro_to_value(inner),
        AvroValue::Array(items) => Value::Sequence(items.iter().map(avro_to_value).collect()),
        AvroValue::Map(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), avro_to_value(v)))
                .collect(),
        ),
        AvroValue::Record(fields) => Value::Mapping(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), avro_to_value(v)))
                .collect(),
        ),
        AvroValue::Date(d) => Value::Integer(i64::from(*d)),
        AvroValue::TimeMillis(t) => Value::Integer(i64::from(*t)),
        AvroValue::TimeMicros(t)
        | AvroValue::TimestampMillis(t)
        | AvroValue::TimestampMicros(t)
        | AvroValue::TimestampNanos(t)
        | AvroValue::LocalTimestampMillis(t)
        | AvroValue::LocalTimestampMicros(t)
        | AvroValue::LocalTimestampNanos(t) => Value::Integer(*t),
        // two's-complement big-endian unscaled value
        AvroValue::Decimal(d) => match Vec::<u8>::try_from(d) {
            Ok(bytes) => Value::Bytes(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "avro decimal has no byte form, rendering empty bytes");
                Value::Bytes(Vec::new())
            }
        },
        AvroValue::BigDecimal(d) => Value::String(d.to_string()),
        AvroValue::Uuid(u) => Value::String(u.to_string()),
        AvroValue::Duration(_) => Value::Null,
    }
}
