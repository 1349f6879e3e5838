use std::collections::BTreeMap;
use std::io;

use decoder_api::{StageError, Value};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

/// Rendered in place of a payload that cannot be formatted.
pub const PLACEHOLDER: &str = "{}";

// ═══════════════════════════════════════════════════════════════
//  Payload
// ═══════════════════════════════════════════════════════════════

/// Render a decoded payload as 2-space indented JSON.
///
/// Map keys come out sorted, bytes as padded base64. `<`, `>`, `&` and the
/// line/paragraph separators are escaped so the text is safe to embed in
/// HTML, matching what existing consumers of this output expect.
pub fn format_payload(value: &Value) -> Result<String, StageError> {
    let mut out = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut out, EscapingFormatter::new());
    value
        .serialize(&mut ser)
        .map_err(|e| StageError::format_err(format!("json: {e}")))?;
    String::from_utf8(out).map_err(|e| StageError::format_err(format!("json: {e}")))
}

/// `format_payload`, degrading to [`PLACEHOLDER`] on failure.
pub fn format_payload_or_placeholder(value: &Value, index: usize) -> String {
    match format_payload(value) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(row = index, error = %e, "failed to format payload");
            PLACEHOLDER.to_string()
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Header
// ═══════════════════════════════════════════════════════════════

/// Render a header map as `map[k1:v1 k2:v2]`, keys in sorted order.
pub fn format_header(header: &BTreeMap<String, String>) -> String {
    let mut out = String::from("map[");
    for (i, (k, v)) in header.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(k);
        out.push(':');
        out.push_str(v);
    }
    out.push(']');
    out
}

// ═══════════════════════════════════════════════════════════════
//  EscapingFormatter
// ═══════════════════════════════════════════════════════════════

struct EscapingFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl EscapingFormatter<'_> {
    fn new() -> Self {
        Self { inner: PrettyFormatter::with_indent(b"  ") }
    }
}

impl Formatter for EscapingFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped: &[u8] = match ch {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            writer.write_all(&fragment.as_bytes()[start..i])?;
            writer.write_all(escaped)?;
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, Value)]) -> Value {
        Value::Mapping(entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    #[test]
    fn payload_is_indented_with_two_spaces() {
        let value = mapping(&[
            ("header", mapping(&[("source", Value::String("test".into()))])),
            ("payload", Value::Bytes(b"hello".to_vec())),
        ]);
        let expected = "{\n  \"header\": {\n    \"source\": \"test\"\n  },\n  \"payload\": \"aGVsbG8=\"\n}";
        assert_eq!(format_payload(&value).unwrap(), expected);
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let value = mapping(&[("a", Value::Sequence(vec![])), ("b", mapping(&[]))]);
        assert_eq!(format_payload(&value).unwrap(), "{\n  \"a\": [],\n  \"b\": {}\n}");
    }

    #[test]
    fn html_sensitive_characters_are_escaped() {
        let value = Value::String("<a href=\"x\">&\u{2028}</a>".into());
        assert_eq!(
            format_payload(&value).unwrap(),
            r#""\u003ca href=\"x\"\u003e\u0026\u2028\u003c/a\u003e""#
        );
    }

    #[test]
    fn escaped_output_parses_back() {
        let value = mapping(&[("k<>", Value::String("a & b".into())), ("n", Value::Integer(-3))]);
        let text = format_payload(&value).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, serde_json::json!({"k<>": "a & b", "n": -3}));
    }

    #[test]
    fn non_finite_float_degrades_to_placeholder() {
        let value = mapping(&[("x", Value::Float(f64::NAN))]);
        let err = format_payload(&value).unwrap_err();
        assert_eq!(err.kind(), decoder_api::ErrorKind::Format);
        assert_eq!(format_payload_or_placeholder(&value, 0), PLACEHOLDER);
    }

    #[test]
    fn header_renders_sorted_pairs() {
        let mut header = BTreeMap::new();
        assert_eq!(format_header(&header), "map[]");
        header.insert("source".to_string(), "test".to_string());
        assert_eq!(format_header(&header), "map[source:test]");
        header.insert("env".to_string(), "prod".to_string());
        assert_eq!(format_header(&header), "map[env:prod source:test]");
    }
}
