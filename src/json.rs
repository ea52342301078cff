//! JSON view of a record for human inspection and editing.
//!
//! A record maps to an array of entry objects, ordered by index:
//!
//! ```json
//! [
//!   {"index": 0, "type": 0, "value": 300},
//!   {"index": 1, "type": 2, "value": "ab"},
//!   {"index": 2, "type": 2, "hex": "576AFCA4"}
//! ]
//! ```
//!
//! Text payloads are byte strings. Those that are not valid UTF-8 are written
//! with a `hex` key instead of `value`, so the document stays lossless.

use serde_json::{Map, Value};

use crate::record::Record;
use crate::tag::{TagIndex, TagType, TagValue};
use crate::{Error, Result, hex};

/// Converts a record into a JSON array.
pub fn record_to_json(record: &Record) -> Value {
    let entries = record
        .iter()
        .map(|(&index, value)| {
            let mut obj = Map::with_capacity(3);
            obj.insert("index".into(), Value::from(index));
            obj.insert("type".into(), Value::from(value.tag_type().code()));
            match value {
                TagValue::Integer(v) => {
                    obj.insert("value".into(), Value::from(*v));
                }
                TagValue::Text(bytes) => match std::str::from_utf8(bytes) {
                    Ok(s) => {
                        obj.insert("value".into(), Value::from(s));
                    }
                    Err(_) => {
                        obj.insert("hex".into(), Value::from(hex::encode(bytes)));
                    }
                },
            }
            Value::Object(obj)
        })
        .collect();
    Value::Array(entries)
}

/// Builds a record from a JSON array. Repeated indices: last entry wins.
pub fn record_from_json(json: &Value) -> Result<Record> {
    let entries = json
        .as_array()
        .ok_or_else(|| Error::InvalidJson("top level must be an array".into()))?;
    let mut record = Record::new();
    for (pos, entry) in entries.iter().enumerate() {
        let (index, value) = entry_from_json(entry).map_err(|e| match e {
            Error::InvalidJson(msg) => Error::InvalidJson(format!("entry {pos}: {msg}")),
            other => other,
        })?;
        record.insert(index, value);
    }
    Ok(record)
}

fn entry_from_json(entry: &Value) -> Result<(TagIndex, TagValue)> {
    let obj = entry
        .as_object()
        .ok_or_else(|| Error::InvalidJson("expected an object".into()))?;

    let index = obj
        .get("index")
        .and_then(Value::as_u64)
        .and_then(|i| TagIndex::try_from(i).ok())
        .ok_or_else(|| Error::InvalidJson("'index' must be a non-negative integer".into()))?;

    let code = obj
        .get("type")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::InvalidJson("'type' must be a non-negative integer".into()))?;
    let code = u8::try_from(code)
        .ok()
        .filter(|&c| c <= 7)
        .ok_or_else(|| Error::InvalidJson(format!("'type' {code} is not a 3-bit type code")))?;

    let tag_type = TagType::from_code(code);
    if !tag_type.has_payload_format() {
        return Err(Error::UnknownTypeCode(code));
    }
    let value = match tag_type {
        TagType::VarInt => TagValue::Integer(integer_from_json(obj.get("value"))?),
        _ => TagValue::Text(text_from_json(obj)?),
    };
    Ok((index, value))
}

/// Akzeptiert i64 und u64 (> i64::MAX wird als Bitmuster uebernommen).
fn integer_from_json(value: Option<&Value>) -> Result<i64> {
    let value = value.ok_or_else(|| Error::InvalidJson("missing 'value'".into()))?;
    if let Some(v) = value.as_i64() {
        return Ok(v);
    }
    if let Some(v) = value.as_u64() {
        return Ok(v as i64);
    }
    Err(Error::InvalidJson(format!("'value' {value} is not a 64-bit integer")))
}

fn text_from_json(obj: &Map<String, Value>) -> Result<Vec<u8>> {
    match (obj.get("value"), obj.get("hex")) {
        (Some(Value::String(s)), None) => Ok(s.as_bytes().to_vec()),
        (None, Some(Value::String(h))) => hex::decode(h),
        (Some(_), Some(_)) => Err(Error::InvalidJson("text entry has both 'value' and 'hex'".into())),
        _ => Err(Error::InvalidJson("text entry needs a string 'value' or 'hex'".into())),
    }
}

/// Serializes a record as a JSON string.
pub fn to_json_string(record: &Record, pretty: bool) -> Result<String> {
    let value = record_to_json(record);
    let out = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    out.map_err(|e| Error::InvalidJson(format!("JSON encode error: {e}")))
}

/// Parses a JSON string into a record.
pub fn from_json_str(json: &str) -> Result<Record> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::InvalidJson(format!("JSON parse error: {e}")))?;
    record_from_json(&value)
}
