// File: crates/chart-wire/src/encode.rs
// Summary: Builder that writes the record stream layout; used for fixtures and the demo.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::FieldValue;

/// In-memory record stream: declared dimensions plus records of typed fields.
#[derive(Clone, Debug, Default)]
pub struct RecordStream {
    dimensions: Vec<(String, String)>,
    records: Vec<Vec<(String, FieldValue)>>,
}

impl RecordStream {
    pub fn new() -> Self { Self::default() }

    /// Declare a dimension. Every record must carry it as a numeric field.
    pub fn dimension(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.dimensions.push((name.into(), label.into()));
        self
    }

    /// Append one record; fields are written in iteration order.
    pub fn record<I, K>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        self.records.push(fields.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    /// Number of records.
    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Serialize the whole stream to `w`.
    /// Contract: counts and string lengths fit in a `u32`.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(self.dimensions.len() as u32)?;
        for (name, label) in &self.dimensions {
            write_string(&mut w, name)?;
            write_string(&mut w, label)?;
        }
        w.write_u32::<LittleEndian>(self.records.len() as u32)?;
        for fields in &self.records {
            let mut body = Vec::new();
            for (name, value) in fields {
                write_field(&mut body, name, value)?;
            }
            w.write_u32::<LittleEndian>(body.len() as u32)?;
            w.write_all(&body)?;
        }
        Ok(())
    }

    /// Serialize into a fresh buffer.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}

fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    w.write_u32::<LittleEndian>(s.len() as u32)?;
    w.write_all(s.as_bytes())
}

fn write_field<W: Write>(w: &mut W, name: &str, value: &FieldValue) -> io::Result<()> {
    write_string(w, name)?;
    w.write_u8(value.tag())?;
    match value {
        FieldValue::Int(v) => w.write_i32::<LittleEndian>(*v),
        FieldValue::Float(v) => w.write_f64::<LittleEndian>(*v),
        FieldValue::Text(s) => write_string(w, s),
    }
}
