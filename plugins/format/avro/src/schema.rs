/// Avro schema of the datum stored in the `payload` column.
///
/// Must stay byte-compatible with the records already on disk.
pub const GATEWAY_PAYLOAD_SCHEMA: &str = r#"
{"type" : "record",
"name" : "GatewayMetadataAndPayload",
"namespace" : "org.transformedPayload",
"fields" : [ {
    "name" : "header",
    "type" : {
    "type" : "map",
    "values" : "string"
    }
}, {
    "name" : "payload",
    "type" : "bytes"
}]}"#;
