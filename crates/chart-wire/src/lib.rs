// File: crates/chart-wire/src/lib.rs
// Summary: Binary bridge between the host application and chart-core datasets.
//
// Layout (all integers little-endian, `string` = u32 byte length + UTF-8):
//
//   u32 dimension_count
//   dimension_count x { string name, string label }
//   u32 record_count
//   record_count x { u32 record_byte_len, field* }
//   field = { string name, u8 tag, value }   tag 0: i32, 1: f64, 2: string

mod decode;
mod encode;
mod error;

pub use decode::decode;
pub use encode::RecordStream;
pub use error::WireError;

pub const TAG_I32: u8 = 0;
pub const TAG_F64: u8 = 1;
pub const TAG_STRING: u8 = 2;

/// One typed field value as it travels on the wire.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Int(i32),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Type byte written before the value.
    pub fn tag(&self) -> u8 {
        match self {
            FieldValue::Int(_) => TAG_I32,
            FieldValue::Float(_) => TAG_F64,
            FieldValue::Text(_) => TAG_STRING,
        }
    }

    /// Numeric value of an int or float field; None for text.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            FieldValue::Int(v) => Some(v as f64),
            FieldValue::Float(v) => Some(v),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(v: FieldValue) -> Self {
        match v {
            FieldValue::Int(i) => serde_json::Value::from(i),
            FieldValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Text(s) => serde_json::Value::String(s),
        }
    }
}
