//! Binary drawing format.
//!
//! ## Layout
//!
//! All integers and floats are little-endian.
//!
//! | Field | Size |
//! |-------|------|
//! | shape count | u32 |
//! | records | one per top-level shape |
//!
//! Each record starts with a type tag, then the corners and style:
//!
//! | Tag | Type | Payload |
//! |-----|------|---------|
//! | 0x01 | Line | x1 y1 x2 y2 (f64) + r g b (f32) + filled (u8) |
//! | 0x02 | Rect | same as line |
//! | 0x03 | Oval | same as line |
//! | 0x04 | Group | same as line, then u32 member count + member records |
//!
//! Unlike the text format, values are stored at full precision.

use crate::error::FormatError;
use crate::model::{MAX_GROUP_DEPTH, Point, Rgb, Shape, ShapeKind};

const TAG_LINE: u8 = 0x01;
const TAG_RECT: u8 = 0x02;
const TAG_OVAL: u8 = 0x03;
const TAG_GROUP: u8 = 0x04;

pub fn encode_shapes(shapes: &[Shape]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_u32(&mut buf, shapes.len());
    for shape in shapes {
        encode_shape(&mut buf, shape);
    }
    buf
}

fn encode_shape(buf: &mut Vec<u8>, shape: &Shape) {
    let tag = match shape.kind() {
        ShapeKind::Line => TAG_LINE,
        ShapeKind::Rect => TAG_RECT,
        ShapeKind::Oval => TAG_OVAL,
        ShapeKind::Group(_) => TAG_GROUP,
    };
    buf.push(tag);
    for v in [shape.p1().x, shape.p1().y, shape.p2().x, shape.p2().y] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    let c = shape.color();
    for v in [c.r, c.g, c.b] {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf.push(u8::from(shape.is_filled()));
    if let ShapeKind::Group(members) = shape.kind() {
        write_u32(buf, members.len());
        for member in members {
            encode_shape(buf, member);
        }
    }
}

fn write_u32(buf: &mut Vec<u8>, n: usize) {
    // Counts beyond u32 cannot occur for an interactive drawing.
    let n = u32::try_from(n).unwrap_or(u32::MAX);
    buf.extend_from_slice(&n.to_le_bytes());
}

pub fn decode_shapes(bytes: &[u8]) -> Result<Vec<Shape>, FormatError> {
    let mut reader = Reader { bytes, pos: 0 };
    let count = reader.u32("shape count")? as usize;
    let mut shapes = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        shapes.push(reader.shape(0)?);
    }
    if reader.pos != bytes.len() {
        return Err(FormatError::TrailingData { shapes: count });
    }
    Ok(shapes)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self, expected: &'static str) -> Result<[u8; N], FormatError> {
        let end = self.pos + N;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(FormatError::UnexpectedEnd { expected })?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn u8(&mut self, expected: &'static str) -> Result<u8, FormatError> {
        Ok(self.take::<1>(expected)?[0])
    }

    fn u32(&mut self, expected: &'static str) -> Result<u32, FormatError> {
        Ok(u32::from_le_bytes(self.take(expected)?))
    }

    fn f64(&mut self) -> Result<f64, FormatError> {
        Ok(f64::from_le_bytes(self.take("coordinate")?))
    }

    fn f32(&mut self) -> Result<f32, FormatError> {
        Ok(f32::from_le_bytes(self.take("color channel")?))
    }

    /// Reads one record; `depth` counts the groups enclosing it.
    fn shape(&mut self, depth: usize) -> Result<Shape, FormatError> {
        let offset = self.pos;
        let tag = self.u8("shape tag")?;
        let build: Option<fn(Point, Point) -> Shape> = match tag {
            TAG_LINE => Some(Shape::line),
            TAG_RECT => Some(Shape::rect),
            TAG_OVAL => Some(Shape::oval),
            TAG_GROUP => None,
            _ => return Err(FormatError::InvalidTag { tag, offset }),
        };
        if build.is_none() && depth >= MAX_GROUP_DEPTH {
            return Err(FormatError::NestingTooDeep { depth: depth + 1 });
        }
        let p1 = Point::new(self.f64()?, self.f64()?);
        let p2 = Point::new(self.f64()?, self.f64()?);
        let color = Rgb::new(self.f32()?, self.f32()?, self.f32()?);
        let filled = self.u8("filled flag")? != 0;
        let shape = match build {
            Some(build) => build(p1, p2),
            None => {
                let count = self.u32("member count")? as usize;
                let mut members = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    members.push(self.shape(depth + 1)?);
                }
                Shape::group_of(p1, p2, members)
            }
        };
        Ok(shape.with_color(color).with_filled(filled))
    }
}
