//! Converts typed values to JSON and back for every boundary a value crosses
//! (procedure output, dehydrated cache, embedded page props).
//!
//! Timestamps are carried as RFC 3339 strings with full sub-second precision,
//! so a `DateTime<Utc>` comes back bit-for-bit identical.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub type TransformResult<T> = Result<T, serde_json::Error>;

pub fn serialize<T: Serialize + ?Sized>(value: &T) -> TransformResult<Value> {
    serde_json::to_value(value)
}

pub fn deserialize<T: DeserializeOwned>(value: Value) -> TransformResult<T> {
    serde_json::from_value(value)
}

/// JSON text that is safe to drop inside a `<script>` element.
pub fn to_embedded_json<T: Serialize + ?Sized>(value: &T) -> TransformResult<String> {
    let raw = serde_json::to_string(value)?;
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

pub fn from_embedded_json<T: DeserializeOwned>(text: &str) -> TransformResult<T> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    #[test]
    fn timestamps_keep_sub_second_precision() {
        let ts: DateTime<Utc> = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let back: DateTime<Utc> = deserialize(serialize(&ts).unwrap()).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn embedded_json_cannot_close_the_script_tag() {
        let text = to_embedded_json(&serde_json::json!({"content": "</script><b>&"})).unwrap();
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));

        let back: Value = from_embedded_json(&text).unwrap();
        assert_eq!(back["content"], "</script><b>&");
    }
}
