//! Plain-text drawing format.
//!
//! ```text
//! 2
//! rect 0.000 0.000 10.000 10.000 1.000 0.000 0.000 true
//! shapegroup 1 0.000 0.000 20.000 20.000
//! line 1.000 1.000 5.000 5.000 0.000 0.000 0.000 false
//! ```
//!
//! The first token is the number of top-level shapes. A primitive is its type
//! keyword, both corners, the color channels and the filled flag. A group is
//! `shapegroup`, its member count and its corners, followed by each member.
//! Tokens are whitespace-separated; line breaks carry no meaning on read.

use std::str::SplitWhitespace;

use crate::error::FormatError;
use crate::model::{MAX_GROUP_DEPTH, Point, Rgb, Shape, ShapeKind};

pub fn write_shapes(shapes: &[Shape]) -> String {
    let mut out = format!("{}\n", shapes.len());
    for shape in shapes {
        write_shape(&mut out, shape);
    }
    out
}

fn write_shape(out: &mut String, shape: &Shape) {
    let (p1, p2) = (shape.p1(), shape.p2());
    match shape.kind() {
        ShapeKind::Group(members) => {
            out.push_str(&format!(
                "shapegroup {} {:.3} {:.3} {:.3} {:.3}\n",
                members.len(),
                p1.x,
                p1.y,
                p2.x,
                p2.y
            ));
            for member in members {
                write_shape(out, member);
            }
        }
        _ => {
            let c = shape.color();
            out.push_str(&format!(
                "{} {:.3} {:.3} {:.3} {:.3} {:.3} {:.3} {:.3} {}\n",
                shape.type_name(),
                p1.x,
                p1.y,
                p2.x,
                p2.y,
                c.r,
                c.g,
                c.b,
                shape.is_filled()
            ));
        }
    }
}

pub fn read_shapes(input: &str) -> Result<Vec<Shape>, FormatError> {
    let mut tokens = Tokens::new(input);
    let count = tokens.count()?;
    let mut shapes = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        shapes.push(read_shape(&mut tokens, 0)?);
    }
    if tokens.next().is_some() {
        return Err(FormatError::TrailingData { shapes: count });
    }
    Ok(shapes)
}

/// `depth` counts the groups enclosing this shape.
fn read_shape(tokens: &mut Tokens<'_>, depth: usize) -> Result<Shape, FormatError> {
    let (_, keyword) = tokens.expect("shape type")?;
    let build: fn(Point, Point) -> Shape = match keyword.to_ascii_lowercase().as_str() {
        "line" => Shape::line,
        "rect" => Shape::rect,
        "oval" => Shape::oval,
        "shapegroup" => return read_group(tokens, depth + 1),
        _ => return Err(FormatError::UnknownShapeType(keyword.to_string())),
    };
    let (p1, p2) = tokens.corners()?;
    let color = Rgb::new(tokens.f32()?, tokens.f32()?, tokens.f32()?);
    let filled = tokens.bool()?;
    Ok(build(p1, p2).with_color(color).with_filled(filled))
}

fn read_group(tokens: &mut Tokens<'_>, depth: usize) -> Result<Shape, FormatError> {
    if depth > MAX_GROUP_DEPTH {
        return Err(FormatError::NestingTooDeep { depth });
    }
    let count = tokens.count()?;
    let (p1, p2) = tokens.corners()?;
    let mut members = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        members.push(read_shape(tokens, depth)?);
    }
    Ok(Shape::group_of(p1, p2, members))
}

struct Tokens<'a> {
    inner: std::iter::Enumerate<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace().enumerate(),
        }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        self.inner.next()
    }

    fn expect(&mut self, expected: &'static str) -> Result<(usize, &'a str), FormatError> {
        self.next().ok_or(FormatError::UnexpectedEnd { expected })
    }

    fn parse<T: std::str::FromStr>(&mut self, expected: &'static str) -> Result<T, FormatError> {
        let (index, token) = self.expect(expected)?;
        token.parse().map_err(|_| FormatError::UnexpectedToken {
            index,
            token: token.to_string(),
            expected,
        })
    }

    fn count(&mut self) -> Result<usize, FormatError> {
        self.parse("shape count")
    }

    fn f64(&mut self) -> Result<f64, FormatError> {
        self.parse("coordinate")
    }

    fn f32(&mut self) -> Result<f32, FormatError> {
        self.parse("color channel")
    }

    fn bool(&mut self) -> Result<bool, FormatError> {
        let (index, token) = self.expect("filled flag")?;
        match token.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(FormatError::UnexpectedToken {
                index,
                token: token.to_string(),
                expected: "filled flag",
            }),
        }
    }

    fn corners(&mut self) -> Result<(Point, Point), FormatError> {
        let p1 = Point::new(self.f64()?, self.f64()?);
        let p2 = Point::new(self.f64()?, self.f64()?);
        Ok((p1, p2))
    }
}
