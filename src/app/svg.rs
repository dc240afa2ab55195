use shape_editor::document::Document;
use shape_editor::draw::Surface;
use shape_editor::model::{Bounds, Point, Rgb};

const PADDING: f64 = 24.0;

fn svg_rgb(color: Rgb) -> String {
    let [r, g, b] = color.to_u8();
    format!("rgb({},{},{})", r, g, b)
}

/// Collects SVG elements and the extent they cover.
#[derive(Default)]
pub(super) struct SvgSurface {
    body: String,
    extent: Option<(Point, Point)>,
}

impl SvgSurface {
    fn include(&mut self, p: Point) {
        self.extent = Some(match self.extent {
            Some((min, max)) => (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            ),
            None => (p, p),
        });
    }

    fn include_bounds(&mut self, b: Bounds) {
        self.include(Point::new(b.ulx, b.uly));
        self.include(Point::new(b.ulx + b.width, b.uly + b.height));
    }

    fn rect(&mut self, b: Bounds, paint: String) {
        self.include_bounds(b);
        self.body.push_str(&format!(
            r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" {} />"#,
            b.ulx, b.uly, b.width, b.height, paint
        ));
        self.body.push('\n');
    }

    fn ellipse(&mut self, b: Bounds, paint: String) {
        self.include_bounds(b);
        self.body.push_str(&format!(
            r#"<ellipse cx="{:.3}" cy="{:.3}" rx="{:.3}" ry="{:.3}" {} />"#,
            b.ulx + b.width / 2.0,
            b.uly + b.height / 2.0,
            b.width / 2.0,
            b.height / 2.0,
            paint
        ));
        self.body.push('\n');
    }

    pub(super) fn finish(self, background: Rgb) -> String {
        let (min, max) = self
            .extent
            .unwrap_or((Point::new(0.0, 0.0), Point::new(800.0, 600.0)));
        let min_x = min.x - PADDING;
        let min_y = min.y - PADDING;
        let width = max.x - min.x + PADDING * 2.0;
        let height = max.y - min.y + PADDING * 2.0;

        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.3} {:.3} {:.3} {:.3}" width="{:.3}" height="{:.3}">"#,
            min_x, min_y, width, height, width, height
        ));
        out.push('\n');
        out.push_str(&format!(
            r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}" />"#,
            min_x,
            min_y,
            width,
            height,
            svg_rgb(background)
        ));
        out.push('\n');
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn stroke_attrs(color: Rgb) -> String {
    format!(r#"stroke="{}" stroke-width="1" fill="none""#, svg_rgb(color))
}

fn fill_attrs(color: Rgb) -> String {
    format!(r#"fill="{}" stroke="none""#, svg_rgb(color))
}

impl Surface for SvgSurface {
    fn stroke_line(&mut self, a: Point, b: Point, color: Rgb) {
        self.include(a);
        self.include(b);
        self.body.push_str(&format!(
            r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" {} />"#,
            a.x,
            a.y,
            b.x,
            b.y,
            stroke_attrs(color)
        ));
        self.body.push('\n');
    }

    fn stroke_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.rect(bounds, stroke_attrs(color));
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.rect(bounds, fill_attrs(color));
    }

    fn stroke_oval(&mut self, bounds: Bounds, color: Rgb) {
        self.ellipse(bounds, stroke_attrs(color));
    }

    fn fill_oval(&mut self, bounds: Bounds, color: Rgb) {
        self.ellipse(bounds, fill_attrs(color));
    }

    fn stroke_dashed_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.rect(
            bounds,
            format!(r#"{} stroke-dasharray="4 3""#, stroke_attrs(color)),
        );
    }
}

pub(super) fn document_to_svg(doc: &Document, background: Rgb) -> String {
    let mut surface = SvgSurface::default();
    doc.draw(&mut surface);
    surface.finish(background)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_editor::model::Shape;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn empty_document_uses_default_canvas() {
        let svg = document_to_svg(&Document::new(), Rgb::new(1.0, 1.0, 1.0));
        assert!(svg.contains(r#"viewBox="-24.000 -24.000 848.000 648.000""#));
        assert!(svg.contains(r#"fill="rgb(255,255,255)""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn shapes_become_elements_in_z_order() {
        let mut doc = Document::new();
        doc.add_shape(
            Shape::rect(pt(10.0, 10.0), pt(30.0, 20.0))
                .with_color(Rgb::new(1.0, 0.0, 0.0))
                .with_filled(true),
        );
        doc.add_shape(Shape::oval(pt(0.0, 0.0), pt(4.0, 2.0)));
        doc.add_shape(Shape::line(pt(5.0, 5.0), pt(50.0, 40.0)));

        let svg = document_to_svg(&doc, Rgb::new(1.0, 1.0, 1.0));
        let rect = svg
            .find(r#"<rect x="10.000" y="10.000" width="20.000" height="10.000" fill="rgb(255,0,0)""#)
            .unwrap();
        let oval = svg
            .find(r#"<ellipse cx="2.000" cy="1.000" rx="2.000" ry="1.000" stroke="rgb(0,0,0)""#)
            .unwrap();
        let line = svg.find(r#"<line x1="5.000" y1="5.000" x2="50.000" y2="40.000""#).unwrap();
        assert!(rect < oval && oval < line);
        assert!(svg.contains(r#"viewBox="-24.000 -24.000 98.000 88.000""#));
    }

    #[test]
    fn groups_are_outlined_with_dashes() {
        let mut g = Shape::group(pt(0.0, 0.0), pt(10.0, 10.0));
        g.add_member(Shape::rect(pt(2.0, 2.0), pt(4.0, 4.0))).unwrap();
        let mut doc = Document::new();
        doc.add_shape(g);

        let svg = document_to_svg(&doc, Rgb::BLACK);
        assert!(svg.contains(r#"stroke="rgb(211,211,211)" stroke-width="1" fill="none" stroke-dasharray="4 3""#));
        assert!(svg.contains(r#"<rect x="2.000" y="2.000" width="2.000" height="2.000""#));
    }
}
