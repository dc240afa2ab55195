use eframe::egui;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn distance(self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn from_pos2(p: egui::Pos2) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x as f32, self.y as f32)
    }
}

/// Color as three float channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const LIGHT_GRAY: Rgb = Rgb {
        r: 0.827,
        g: 0.827,
        b: 0.827,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    pub fn to_color32(self) -> egui::Color32 {
        let [r, g, b] = self.to_u8();
        egui::Color32::from_rgb(r, g, b)
    }

    pub fn from_color32(c: egui::Color32) -> Self {
        let [r, g, b, _] = c.to_array();
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    pub fn to_u8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// Axis-aligned box: upper-left corner plus extents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub ulx: f64,
    pub uly: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            ulx: a.x.min(b.x),
            uly: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.ulx
            && p.x <= self.ulx + self.width
            && p.y >= self.uly
            && p.y <= self.uly + self.height
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= f64::EPSILON && self.height <= f64::EPSILON
    }

    pub fn to_rect(self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.ulx as f32, self.uly as f32),
            egui::vec2(self.width as f32, self.height as f32),
        )
    }
}

/// Identity of a shape. Two shapes with equal geometry are still distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl ShapeId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Deepest group nesting the file readers accept.
pub const MAX_GROUP_DEPTH: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Line,
    Rect,
    Oval,
    Group(Vec<Shape>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    p1: Point,
    p2: Point,
    color: Rgb,
    filled: bool,
    bounds: Bounds,
    center: Point,
}

impl Shape {
    fn with_kind(kind: ShapeKind, p1: Point, p2: Point) -> Self {
        let mut shape = Self {
            id: ShapeId::next(),
            kind,
            p1,
            p2,
            color: Rgb::BLACK,
            filled: false,
            bounds: Bounds::default(),
            center: Point::default(),
        };
        shape.update_bounds();
        shape
    }

    pub fn line(p1: Point, p2: Point) -> Self {
        Self::with_kind(ShapeKind::Line, p1, p2)
    }

    pub fn rect(p1: Point, p2: Point) -> Self {
        Self::with_kind(ShapeKind::Rect, p1, p2)
    }

    pub fn oval(p1: Point, p2: Point) -> Self {
        Self::with_kind(ShapeKind::Oval, p1, p2)
    }

    /// An empty group whose bounding box spans `p1`..`p2`.
    pub fn group(p1: Point, p2: Point) -> Self {
        Self::with_kind(ShapeKind::Group(Vec::new()), p1, p2)
    }

    /// A group spanning `p1`..`p2` holding `members` in order.
    pub fn group_of(p1: Point, p2: Point, members: Vec<Shape>) -> Self {
        let mut group = Self::group(p1, p2);
        if let ShapeKind::Group(slot) = &mut group.kind {
            for member in members {
                if !slot.iter().any(|m| m.id == member.id) {
                    slot.push(member);
                }
            }
        }
        group.update_center();
        group
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Keyword used by the text format.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Line => "line",
            ShapeKind::Rect => "rect",
            ShapeKind::Oval => "oval",
            ShapeKind::Group(_) => "shapegroup",
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group(_))
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Bbox midpoint for primitives; for groups the average of the members' centers.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_p1(&mut self, p: Point) {
        self.p1 = p;
        self.update_bounds();
    }

    pub fn set_p2(&mut self, p: Point) {
        self.p2 = p;
        self.update_bounds();
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    /// Translates both corners and, for groups, every member.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.p1 = self.p1.translated(dx, dy);
        self.p2 = self.p2.translated(dx, dy);
        if let ShapeKind::Group(members) = &mut self.kind {
            for member in members {
                member.move_by(dx, dy);
            }
        }
        self.update_bounds();
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        self.center.distance(x, y)
    }

    /// Deep copy with a fresh identity for the copy and every nested member.
    pub fn duplicate(&self) -> Shape {
        let kind = match &self.kind {
            ShapeKind::Group(members) => {
                ShapeKind::Group(members.iter().map(Shape::duplicate).collect())
            }
            ShapeKind::Line => ShapeKind::Line,
            ShapeKind::Rect => ShapeKind::Rect,
            ShapeKind::Oval => ShapeKind::Oval,
        };
        Self {
            id: ShapeId::next(),
            kind,
            p1: self.p1,
            p2: self.p2,
            color: self.color,
            filled: self.filled,
            bounds: self.bounds,
            center: self.center,
        }
    }

    pub fn members(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Group(members) => members,
            _ => &[],
        }
    }

    /// Appends `shape` to a group. A member with the same id already present
    /// makes this a no-op. Non-group shapes hand the candidate back.
    pub fn add_member(&mut self, shape: Shape) -> Result<(), Shape> {
        let ShapeKind::Group(members) = &mut self.kind else {
            return Err(shape);
        };
        if !members.iter().any(|m| m.id == shape.id) {
            members.push(shape);
        }
        self.update_center();
        Ok(())
    }

    pub fn remove_member(&mut self, id: ShapeId) -> Option<Shape> {
        let ShapeKind::Group(members) = &mut self.kind else {
            return None;
        };
        let idx = members.iter().position(|m| m.id == id)?;
        let removed = members.remove(idx);
        self.update_center();
        Some(removed)
    }

    pub fn take_members(&mut self) -> Vec<Shape> {
        let members = match &mut self.kind {
            ShapeKind::Group(members) => std::mem::take(members),
            _ => Vec::new(),
        };
        self.update_center();
        members
    }

    /// True when `other`'s center lies inside this shape's bounding box.
    pub fn within(&self, other: &Shape) -> bool {
        self.bounds.contains(other.center)
    }

    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        if self.id == id {
            return Some(self);
        }
        self.members().iter().find_map(|m| m.find(id))
    }

    pub fn find_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.kind {
            ShapeKind::Group(members) => members.iter_mut().find_map(|m| m.find_mut(id)),
            _ => None,
        }
    }

    fn update_bounds(&mut self) {
        self.bounds = Bounds::from_corners(self.p1, self.p2);
        self.update_center();
    }

    fn update_center(&mut self) {
        self.center = match &self.kind {
            ShapeKind::Group(members) if !members.is_empty() => {
                let n = members.len() as f64;
                let (sx, sy) = members
                    .iter()
                    .fold((0.0, 0.0), |(sx, sy), m| (sx + m.center.x, sy + m.center.y));
                Point::new(sx / n, sy / n)
            }
            _ => self.p1.midpoint(self.p2),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn bounds_follow_either_corner() {
        let mut r = Shape::rect(pt(10.0, 10.0), pt(20.0, 30.0));
        assert_eq!(r.bounds(), Bounds { ulx: 10.0, uly: 10.0, width: 10.0, height: 20.0 });

        r.set_p1(pt(30.0, 40.0));
        assert_eq!(r.bounds(), Bounds { ulx: 20.0, uly: 30.0, width: 10.0, height: 10.0 });
        assert_eq!(r.center(), pt(25.0, 35.0));

        r.set_p2(pt(0.0, 0.0));
        assert_eq!(r.center(), pt(15.0, 20.0));
    }

    #[test]
    fn move_and_inverse_restore_corners() {
        let mut l = Shape::line(pt(1.5, 2.0), pt(7.0, -3.0));
        l.move_by(12.0, -4.0);
        assert_eq!(l.p1(), pt(13.5, -2.0));
        l.move_by(-12.0, 4.0);
        assert_eq!(l.p1(), pt(1.5, 2.0));
        assert_eq!(l.p2(), pt(7.0, -3.0));
    }

    #[test]
    fn distance_is_measured_from_center() {
        let o = Shape::oval(pt(0.0, 0.0), pt(6.0, 8.0));
        assert_eq!(o.distance_to(0.0, 0.0), 5.0);
    }

    #[test]
    fn within_is_inclusive() {
        let g = Shape::group(pt(0.0, 0.0), pt(10.0, 10.0));
        assert!(g.within(&Shape::rect(pt(0.0, 0.0), pt(10.0, 10.0))));
        assert!(g.within(&Shape::line(pt(10.0, 10.0), pt(10.0, 10.0))));
        assert!(!g.within(&Shape::line(pt(10.0, 10.0), pt(12.0, 10.0))));
    }

    #[test]
    fn group_center_averages_member_centers() {
        let mut g = Shape::group(pt(0.0, 0.0), pt(100.0, 100.0));
        assert_eq!(g.center(), pt(50.0, 50.0));
        g.add_member(Shape::rect(pt(0.0, 0.0), pt(10.0, 10.0))).unwrap();
        g.add_member(Shape::rect(pt(20.0, 0.0), pt(30.0, 10.0))).unwrap();
        assert_eq!(g.center(), pt(15.0, 5.0));
    }

    #[test]
    fn adding_a_present_member_is_a_noop() {
        let mut g = Shape::group(pt(0.0, 0.0), pt(10.0, 10.0));
        let r = Shape::rect(pt(1.0, 1.0), pt(2.0, 2.0));
        g.add_member(r.clone()).unwrap();
        g.add_member(r).unwrap();
        assert_eq!(g.members().len(), 1);
    }

    #[test]
    fn removing_a_member_recenters_the_group() {
        let mut g = Shape::group(pt(0.0, 0.0), pt(100.0, 100.0));
        let a = Shape::rect(pt(0.0, 0.0), pt(10.0, 10.0));
        let a_id = a.id();
        g.add_member(a).unwrap();
        g.add_member(Shape::rect(pt(20.0, 0.0), pt(30.0, 10.0))).unwrap();

        let removed = g.remove_member(a_id).unwrap();
        assert_eq!(removed.id(), a_id);
        assert_eq!(g.center(), pt(25.0, 5.0));
        assert!(g.remove_member(a_id).is_none());

        g.take_members();
        assert_eq!(g.center(), pt(50.0, 50.0));
    }

    #[test]
    fn style_setters_leave_geometry_alone() {
        let mut o = Shape::oval(pt(0.0, 0.0), pt(2.0, 2.0));
        let bounds = o.bounds();
        o.set_color(Rgb::new(0.0, 1.0, 0.0));
        o.set_filled(true);
        assert_eq!(o.color(), Rgb::new(0.0, 1.0, 0.0));
        assert!(o.is_filled());
        assert_eq!(o.bounds(), bounds);
    }

    #[test]
    fn primitives_refuse_members() {
        let mut l = Shape::line(pt(0.0, 0.0), pt(1.0, 1.0));
        let r = Shape::rect(pt(0.0, 0.0), pt(1.0, 1.0));
        let id = r.id();
        let back = l.add_member(r).unwrap_err();
        assert_eq!(back.id(), id);
    }

    #[test]
    fn group_move_carries_members() {
        let mut g = Shape::group(pt(0.0, 0.0), pt(10.0, 10.0));
        let r = Shape::rect(pt(1.0, 1.0), pt(3.0, 3.0));
        let rid = r.id();
        g.add_member(r).unwrap();
        g.move_by(5.0, 5.0);
        assert_eq!(g.p1(), pt(5.0, 5.0));
        assert_eq!(g.find(rid).unwrap().p1(), pt(6.0, 6.0));
        assert_eq!(g.center(), pt(7.0, 7.0));
    }

    #[test]
    fn duplicated_group_is_independent() {
        let mut g = Shape::group(pt(0.0, 0.0), pt(50.0, 50.0));
        for i in 0..3 {
            let o = f64::from(i) * 10.0;
            g.add_member(Shape::oval(pt(o, o), pt(o + 5.0, o + 5.0))).unwrap();
        }
        let before: Vec<(Point, Point)> = g.members().iter().map(|m| (m.p1(), m.p2())).collect();

        let mut copy = g.duplicate();
        copy.move_by(5.0, 5.0);

        let after: Vec<(Point, Point)> = g.members().iter().map(|m| (m.p1(), m.p2())).collect();
        assert_eq!(before, after);
        assert_ne!(copy.id(), g.id());
        for (a, b) in copy.members().iter().zip(g.members()) {
            assert_ne!(a.id(), b.id());
            assert_eq!(a.p1(), b.p1().translated(5.0, 5.0));
        }
    }

    #[test]
    fn duplicate_keeps_style() {
        let r = Shape::rect(pt(0.0, 0.0), pt(1.0, 1.0))
            .with_color(Rgb::new(1.0, 0.0, 0.0))
            .with_filled(true);
        let c = r.duplicate();
        assert_eq!(c.color(), r.color());
        assert!(c.is_filled());
        assert_eq!(c.kind(), r.kind());
    }

    #[test]
    fn find_mut_reaches_nested_members() {
        let mut outer = Shape::group(pt(0.0, 0.0), pt(100.0, 100.0));
        let mut inner = Shape::group(pt(0.0, 0.0), pt(50.0, 50.0));
        let leaf = Shape::line(pt(1.0, 1.0), pt(2.0, 2.0));
        let leaf_id = leaf.id();
        inner.add_member(leaf).unwrap();
        outer.add_member(inner).unwrap();

        outer.find_mut(leaf_id).unwrap().set_filled(true);
        assert!(outer.find(leaf_id).unwrap().is_filled());
    }

    #[test]
    fn rgb_clamps_and_quantizes() {
        let c = Rgb::new(2.0, -1.0, 0.5);
        assert_eq!(c.to_u8(), [255, 0, 128]);
        assert_eq!(Rgb::from_color32(egui::Color32::from_rgb(255, 0, 0)), Rgb::new(1.0, 0.0, 0.0));
    }
}
