//! Pointer gestures for each editing tool.
//!
//! The canvas feeds `press`, `drag` and `release` in world coordinates;
//! every completed gesture ends in at most one recorded edit.

use tracing::debug;

use crate::document::Document;
use crate::model::{Point, Rgb, Shape, ShapeId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Line,
    Rect,
    Oval,
    Delete,
    Move,
    Copy,
    Group,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Line,
        Tool::Rect,
        Tool::Oval,
        Tool::Delete,
        Tool::Move,
        Tool::Copy,
        Tool::Group,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Line => "Line",
            Tool::Rect => "Rectangle",
            Tool::Oval => "Oval",
            Tool::Delete => "Delete",
            Tool::Move => "Move",
            Tool::Copy => "Copy",
            Tool::Group => "Group",
        }
    }
}

#[derive(Debug)]
enum Gesture {
    /// A new primitive, or a group's rubber band, following the pointer.
    Sketch(Shape),
    /// An existing shape (or a fresh copy) following the pointer.
    Drag {
        id: ShapeId,
        origin: Point,
        last: Point,
        copy: bool,
    },
}

#[derive(Debug, Default)]
pub struct ToolState {
    tool: Tool,
    pub color: Rgb,
    pub filled: bool,
    gesture: Option<Gesture>,
}

impl ToolState {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches tools, settling whatever gesture was under way.
    pub fn set_tool(&mut self, doc: &mut Document, tool: Tool) {
        if tool != self.tool {
            self.cancel(doc);
            self.tool = tool;
        }
    }

    /// Drops an unfinished gesture. A drag already applied to the canvas is
    /// kept and recorded so the history stays complete.
    pub fn cancel(&mut self, doc: &mut Document) {
        match self.gesture.take() {
            Some(Gesture::Drag {
                id,
                origin,
                last,
                copy: false,
            }) => {
                record_move(doc, id, origin, last);
            }
            Some(_) | None => {}
        }
    }

    /// The shape being sketched, for preview rendering.
    pub fn preview(&self) -> Option<&Shape> {
        match &self.gesture {
            Some(Gesture::Sketch(shape)) => Some(shape),
            _ => None,
        }
    }

    pub fn press(&mut self, doc: &mut Document, p: Point) {
        self.cancel(doc);
        self.gesture = match self.tool {
            Tool::Line => Some(Gesture::Sketch(self.styled(Shape::line(p, p)))),
            Tool::Rect => Some(Gesture::Sketch(self.styled(Shape::rect(p, p)))),
            Tool::Oval => Some(Gesture::Sketch(self.styled(Shape::oval(p, p)))),
            Tool::Group => Some(Gesture::Sketch(Shape::group(p, p))),
            Tool::Move => doc.closest_shape(p.x, p.y).map(|s| Gesture::Drag {
                id: s.id(),
                origin: p,
                last: p,
                copy: false,
            }),
            Tool::Copy => doc.copy_closest(p.x, p.y).map(|id| Gesture::Drag {
                id,
                origin: p,
                last: p,
                copy: true,
            }),
            Tool::Delete => None,
        };
    }

    pub fn drag(&mut self, doc: &mut Document, p: Point) {
        match &mut self.gesture {
            Some(Gesture::Sketch(shape)) => shape.set_p2(p),
            Some(Gesture::Drag { id, last, .. }) => {
                if let Some(shape) = doc.shape_mut(*id) {
                    shape.move_by(p.x - last.x, p.y - last.y);
                }
                *last = p;
            }
            None => {}
        }
    }

    /// Finishes the gesture. Returns the shape the recorded edit is about.
    pub fn release(&mut self, doc: &mut Document, p: Point) -> Option<ShapeId> {
        if self.tool == Tool::Delete {
            return doc.delete_closest(p.x, p.y);
        }
        self.drag(doc, p);
        match self.gesture.take()? {
            Gesture::Sketch(shape) if shape.is_group() => doc.group_within(shape.p1(), shape.p2()),
            Gesture::Sketch(shape) => {
                if shape.bounds().is_degenerate() {
                    debug!(tool = self.tool.label(), "discarded empty sketch");
                    return None;
                }
                Some(doc.draw_shape(shape))
            }
            Gesture::Drag { id, copy: true, .. } => Some(id),
            Gesture::Drag {
                id, origin, last, ..
            } => record_move(doc, id, origin, last).then_some(id),
        }
    }

    fn styled(&self, shape: Shape) -> Shape {
        shape.with_color(self.color).with_filled(self.filled)
    }
}

fn record_move(doc: &mut Document, id: ShapeId, origin: Point, last: Point) -> bool {
    let (dx, dy) = (last.x - origin.x, last.y - origin.y);
    if dx == 0.0 && dy == 0.0 {
        return false;
    }
    doc.record_move(id, dx, dy);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn state(tool: Tool) -> (ToolState, Document) {
        let mut doc = Document::new();
        let mut tools = ToolState::default();
        tools.set_tool(&mut doc, tool);
        (tools, doc)
    }

    #[test]
    fn drawing_gesture_commits_on_release() {
        let (mut tools, mut doc) = state(Tool::Rect);
        tools.color = Rgb::new(0.0, 0.0, 1.0);
        tools.filled = true;

        tools.press(&mut doc, pt(10.0, 10.0));
        tools.drag(&mut doc, pt(15.0, 12.0));
        assert!(doc.is_empty());
        assert_eq!(tools.preview().map(Shape::p2), Some(pt(15.0, 12.0)));

        let id = tools.release(&mut doc, pt(20.0, 30.0)).unwrap();
        let shape = doc.shape(id).unwrap();
        assert_eq!(shape.kind(), &ShapeKind::Rect);
        assert_eq!((shape.p1(), shape.p2()), (pt(10.0, 10.0), pt(20.0, 30.0)));
        assert_eq!(shape.color(), Rgb::new(0.0, 0.0, 1.0));
        assert!(shape.is_filled());
        assert!(tools.preview().is_none());

        doc.undo();
        assert!(doc.is_empty());
    }

    #[test]
    fn plain_click_draws_nothing() {
        let (mut tools, mut doc) = state(Tool::Oval);
        tools.press(&mut doc, pt(5.0, 5.0));
        assert!(tools.release(&mut doc, pt(5.0, 5.0)).is_none());
        assert!(doc.is_empty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn move_gesture_records_total_delta() {
        let (mut tools, mut doc) = state(Tool::Move);
        let id = doc.draw_shape(Shape::rect(pt(0.0, 0.0), pt(10.0, 10.0)));

        tools.press(&mut doc, pt(5.0, 5.0));
        tools.drag(&mut doc, pt(6.0, 8.0));
        tools.drag(&mut doc, pt(9.0, 9.0));
        assert_eq!(tools.release(&mut doc, pt(15.0, 25.0)), Some(id));
        assert_eq!(doc.shape(id).unwrap().p1(), pt(10.0, 20.0));

        doc.undo();
        assert_eq!(doc.shape(id).unwrap().p1(), pt(0.0, 0.0));
        doc.redo();
        assert_eq!(doc.shape(id).unwrap().p1(), pt(10.0, 20.0));
    }

    #[test]
    fn move_without_displacement_records_nothing() {
        let (mut tools, mut doc) = state(Tool::Move);
        doc.add_shape(Shape::rect(pt(0.0, 0.0), pt(10.0, 10.0)));
        tools.press(&mut doc, pt(5.0, 5.0));
        assert!(tools.release(&mut doc, pt(5.0, 5.0)).is_none());
        assert!(!doc.can_undo());
    }

    #[test]
    fn copy_gesture_places_a_moved_duplicate() {
        let (mut tools, mut doc) = state(Tool::Copy);
        let original = doc.draw_shape(Shape::oval(pt(0.0, 0.0), pt(4.0, 4.0)));

        tools.press(&mut doc, pt(2.0, 2.0));
        tools.drag(&mut doc, pt(12.0, 2.0));
        let copy = tools.release(&mut doc, pt(22.0, 2.0)).unwrap();

        assert_ne!(copy, original);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.shape(original).unwrap().p1(), pt(0.0, 0.0));
        assert_eq!(doc.shape(copy).unwrap().p1(), pt(20.0, 0.0));

        doc.undo();
        assert_eq!(doc.len(), 1);
        doc.redo();
        assert_eq!(doc.shape(copy).unwrap().p1(), pt(20.0, 0.0));
    }

    #[test]
    fn delete_acts_on_click() {
        let (mut tools, mut doc) = state(Tool::Delete);
        let keep = doc.draw_shape(Shape::line(pt(50.0, 50.0), pt(60.0, 60.0)));
        let gone = doc.draw_shape(Shape::line(pt(0.0, 0.0), pt(2.0, 2.0)));

        tools.press(&mut doc, pt(1.0, 1.0));
        assert_eq!(tools.release(&mut doc, pt(1.0, 1.0)), Some(gone));
        assert!(doc.shape(gone).is_none());
        assert!(doc.shape(keep).is_some());

        doc.undo();
        assert_eq!(doc.index_of(gone), Some(1));
    }

    #[test]
    fn group_gesture_uses_the_rubber_band() {
        let (mut tools, mut doc) = state(Tool::Group);
        let a = doc.draw_shape(Shape::rect(pt(1.0, 1.0), pt(3.0, 3.0)));
        let b = doc.draw_shape(Shape::rect(pt(40.0, 40.0), pt(42.0, 42.0)));

        tools.press(&mut doc, pt(10.0, 10.0));
        tools.drag(&mut doc, pt(5.0, 5.0));
        assert!(tools.preview().is_some_and(Shape::is_group));
        let group = tools.release(&mut doc, pt(0.0, 0.0)).unwrap();

        let members: Vec<ShapeId> = doc
            .shape(group)
            .unwrap()
            .members()
            .iter()
            .map(Shape::id)
            .collect();
        assert_eq!(members, vec![a]);
        assert_eq!(doc.index_of(b), Some(0));

        doc.undo();
        assert_eq!(doc.index_of(a), Some(0));
        assert_eq!(doc.index_of(b), Some(1));
        assert!(doc.shape(group).is_none());
    }

    #[test]
    fn switching_tools_mid_drag_keeps_history_complete() {
        let (mut tools, mut doc) = state(Tool::Move);
        let id = doc.draw_shape(Shape::rect(pt(0.0, 0.0), pt(2.0, 2.0)));
        tools.press(&mut doc, pt(1.0, 1.0));
        tools.drag(&mut doc, pt(4.0, 1.0));

        tools.set_tool(&mut doc, Tool::Line);
        assert_eq!(tools.tool(), Tool::Line);

        doc.undo();
        assert_eq!(doc.shape(id).unwrap().p1(), pt(0.0, 0.0));
    }
}
