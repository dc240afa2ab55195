//! Rendering contract between shapes and whatever paints them.
//!
//! A [`Surface`] receives world-space primitives; the egui canvas and the SVG
//! exporter both implement it. [`Shape::draw`] only reads shape state, so
//! drawing the same shape twice issues the same calls.

use crate::model::{Bounds, Point, Rgb, Shape, ShapeKind};

pub trait Surface {
    fn stroke_line(&mut self, a: Point, b: Point, color: Rgb);
    fn stroke_rect(&mut self, bounds: Bounds, color: Rgb);
    fn fill_rect(&mut self, bounds: Bounds, color: Rgb);
    fn stroke_oval(&mut self, bounds: Bounds, color: Rgb);
    fn fill_oval(&mut self, bounds: Bounds, color: Rgb);
    /// Outline used for group boxes.
    fn stroke_dashed_rect(&mut self, bounds: Bounds, color: Rgb);
}

impl Shape {
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let bounds = self.bounds();
        let color = self.color();
        match self.kind() {
            // Lines ignore `filled`.
            ShapeKind::Line => surface.stroke_line(self.p1(), self.p2(), color),
            ShapeKind::Rect if self.is_filled() => surface.fill_rect(bounds, color),
            ShapeKind::Rect => surface.stroke_rect(bounds, color),
            ShapeKind::Oval if self.is_filled() => surface.fill_oval(bounds, color),
            ShapeKind::Oval => surface.stroke_oval(bounds, color),
            ShapeKind::Group(members) => {
                surface.stroke_dashed_rect(bounds, Rgb::LIGHT_GRAY);
                for member in members {
                    member.draw(surface);
                }
            }
        }
    }
}
