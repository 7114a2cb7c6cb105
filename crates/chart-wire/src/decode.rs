// File: crates/chart-wire/src/decode.rs
// Summary: Decode a record stream into an immutable chart-core Dataset.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use chart_core::{DataPoint, Dataset, Payload};
use tracing::debug;

use crate::error::WireError;
use crate::{FieldValue, TAG_F64, TAG_I32, TAG_STRING};

type Result<T> = std::result::Result<T, WireError>;

/// Byte cursor that remembers where its slice sits in the whole buffer,
/// so error offsets are absolute.
struct Reader<'a> {
    cur: Cursor<&'a [u8]>,
    base: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8], base: usize) -> Self { Self { cur: Cursor::new(bytes), base } }

    fn pos(&self) -> usize { self.cur.position() as usize }

    fn offset(&self) -> usize { self.base + self.pos() }

    fn remaining(&self) -> usize { self.cur.get_ref().len().saturating_sub(self.pos()) }

    fn u8(&mut self) -> Result<u8> { Ok(self.cur.read_u8()?) }

    fn u32(&mut self) -> Result<u32> { Ok(self.cur.read_u32::<LittleEndian>()?) }

    fn string(&mut self) -> Result<String> {
        let len = self.u32()? as usize;
        let offset = self.offset();
        if len > self.remaining() {
            return Err(WireError::StringOverrun { offset, len });
        }
        let start = self.pos();
        let data: &'a [u8] = *self.cur.get_ref();
        self.cur.set_position((start + len) as u64);
        std::str::from_utf8(&data[start..start + len])
            .map(str::to_string)
            .map_err(|_| WireError::InvalidUtf8 { offset })
    }

    fn field(&mut self) -> Result<(String, FieldValue)> {
        let name = self.string()?;
        let offset = self.offset();
        let value = match self.u8()? {
            TAG_I32 => FieldValue::Int(self.cur.read_i32::<LittleEndian>()?),
            TAG_F64 => FieldValue::Float(self.cur.read_f64::<LittleEndian>()?),
            TAG_STRING => FieldValue::Text(self.string()?),
            tag => return Err(WireError::UnknownFieldType { tag, offset }),
        };
        Ok((name, value))
    }
}

/// Decode a whole stream. Every declared dimension must be a numeric field of
/// every record; all fields of a record become its display payload.
pub fn decode(bytes: &[u8]) -> Result<Dataset> {
    let mut r = Reader::new(bytes, 0);

    let dim_count = r.u32()? as usize;
    let mut dimensions = Vec::new();
    let mut labels = Vec::new();
    for _ in 0..dim_count {
        let name = r.string()?;
        let label = r.string()?;
        labels.push((name.clone(), label));
        dimensions.push(name);
    }

    let record_count = r.u32()? as usize;
    let mut points = Vec::new();
    for record in 0..record_count {
        let len = r.u32()? as usize;
        let start = r.pos();
        if len > r.remaining() {
            return Err(WireError::RecordOverrun { record });
        }
        let body = &bytes[start..start + len];
        points.push(decode_record(body, start, record, &dimensions)?);
        r.cur.set_position((start + len) as u64);
    }

    if r.remaining() > 0 {
        return Err(WireError::TrailingBytes(r.remaining()));
    }

    debug!(dimensions = dimensions.len(), records = points.len(), "decoded record stream");
    Ok(Dataset::new(dimensions, points)?.with_labels(labels))
}

fn decode_record(body: &[u8], base: usize, record: usize, dimensions: &[String]) -> Result<DataPoint> {
    let mut r = Reader::new(body, base);
    let mut fields = Vec::new();
    while r.remaining() > 0 {
        let field = r.field().map_err(|e| match e {
            WireError::Truncated(_) | WireError::StringOverrun { .. } => WireError::RecordOverrun { record },
            other => other,
        })?;
        fields.push(field);
    }

    let mut values = Vec::with_capacity(dimensions.len());
    for axis in dimensions {
        // Later fields shadow earlier ones with the same name.
        let field = fields.iter().rev().find(|(name, _)| name == axis);
        match field {
            None => return Err(WireError::MissingDimension { record, axis: axis.clone() }),
            Some((_, v)) => match v.as_f64() {
                Some(x) => values.push(x),
                None => return Err(WireError::NonNumericDimension { record, axis: axis.clone() }),
            },
        }
    }

    let payload: Payload = fields.into_iter().map(|(k, v)| (k, v.into())).collect();
    Ok(DataPoint::new(values).with_payload(payload))
}
