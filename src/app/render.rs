use eframe::egui;
use shape_editor::draw::Surface;
use shape_editor::model::{Bounds, Point, Rgb};
use shape_editor::tools::Tool;

const STROKE_WIDTH: f32 = 1.5;

pub(super) fn tool_button(ui: &mut egui::Ui, tool: Tool, selected: &mut Tool) {
    if ui.selectable_label(*selected == tool, tool.label()).clicked() {
        *selected = tool;
    }
}

/// Preset swatches plus a picker. Returns true when the color changed.
pub(super) fn color_row(ui: &mut egui::Ui, color: &mut Rgb) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        let presets = [
            egui::Color32::from_rgb(0, 0, 0),
            egui::Color32::from_rgb(200, 40, 40),
            egui::Color32::from_rgb(40, 140, 60),
            egui::Color32::from_rgb(40, 90, 200),
            egui::Color32::from_rgb(200, 140, 40),
        ];
        for c in presets {
            if ui
                .add_sized([18.0, 18.0], egui::Button::new("").fill(c))
                .clicked()
            {
                *color = Rgb::from_color32(c);
                changed = true;
            }
        }
        let mut arr = color.to_u8();
        if ui.color_edit_button_srgb(&mut arr).changed() {
            *color = Rgb::from_color32(egui::Color32::from_rgb(arr[0], arr[1], arr[2]));
            changed = true;
        }
    });
    changed
}

/// Paints world-space primitives onto the canvas, offset by the canvas origin.
pub(super) struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> PainterSurface<'a> {
    pub(super) fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }

    fn pos(&self, p: Point) -> egui::Pos2 {
        self.origin + p.to_pos2().to_vec2()
    }

    fn rect(&self, b: Bounds) -> egui::Rect {
        b.to_rect().translate(self.origin.to_vec2())
    }
}

fn stroke(color: Rgb) -> egui::Stroke {
    egui::Stroke::new(STROKE_WIDTH, color.to_color32())
}

impl Surface for PainterSurface<'_> {
    fn stroke_line(&mut self, a: Point, b: Point, color: Rgb) {
        self.painter
            .line_segment([self.pos(a), self.pos(b)], stroke(color));
    }

    fn stroke_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.painter.rect_stroke(
            self.rect(bounds),
            0.0,
            stroke(color),
            egui::StrokeKind::Middle,
        );
    }

    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.painter
            .rect_filled(self.rect(bounds), 0.0, color.to_color32());
    }

    fn stroke_oval(&mut self, bounds: Bounds, color: Rgb) {
        let r = self.rect(bounds);
        self.painter.add(egui::Shape::ellipse_stroke(
            r.center(),
            r.size() * 0.5,
            stroke(color),
        ));
    }

    fn fill_oval(&mut self, bounds: Bounds, color: Rgb) {
        let r = self.rect(bounds);
        self.painter.add(egui::Shape::ellipse_filled(
            r.center(),
            r.size() * 0.5,
            color.to_color32(),
        ));
    }

    fn stroke_dashed_rect(&mut self, bounds: Bounds, color: Rgb) {
        let r = self.rect(bounds);
        let s = egui::Stroke::new(1.0, color.to_color32());
        let corners = [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom()];
        for i in 0..corners.len() {
            draw_dashed_line(self.painter, corners[i], corners[(i + 1) % 4], s, 6.0, 4.0);
        }
    }
}

fn draw_dashed_line(
    painter: &egui::Painter,
    a: egui::Pos2,
    b: egui::Pos2,
    stroke: egui::Stroke,
    dash_len: f32,
    gap_len: f32,
) {
    let v = b - a;
    let len = v.length();
    if len <= f32::EPSILON {
        return;
    }
    let dir = v / len;
    let mut pos = 0.0;
    let mut drawing = true;
    while pos < len {
        let seg_len = if drawing { dash_len } else { gap_len };
        let next_pos = (pos + seg_len).min(len);
        if drawing {
            painter.line_segment([a + dir * pos, a + dir * next_pos], stroke);
        }
        pos = next_pos;
        drawing = !drawing;
    }
}
