//! The canvas model: the live shape collection and its edit history.
//!
//! Low-level mutators (`add_shape`, `delete_shape`, `insert_shape`) never
//! record edits, so the same primitives serve direct calls and undo/redo
//! replay. The gesture-level operations (`draw_shape`, `delete_closest`,
//! `copy_closest`, `move_shape`, `group_within`) mutate and record exactly
//! one [`Edit`] each.

use std::path::Path;

use tracing::{debug, info};

use crate::binary_format;
use crate::draw::Surface;
use crate::edit::Edit;
use crate::error::{DocumentError, FormatError};
use crate::model::{Point, Shape, ShapeId};
use crate::text_format;

#[derive(Debug, Default)]
pub struct Document {
    shapes: Vec<Shape>,
    undo_stack: Vec<Edit>,
    redo_stack: Vec<Edit>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level shapes in z-order, bottom first.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Inserts at `index`, or on top when `index` is past the end.
    pub fn insert_shape(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    /// Removes the top-level shape with this identity.
    pub fn delete_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Looks through groups as well as the top level.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find_map(|s| s.find(id))
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find_map(|s| s.find_mut(id))
    }

    /// Nearest top-level shape by center distance; the earliest wins ties.
    /// Group members are not candidates on their own.
    pub fn closest_shape(&self, x: f64, y: f64) -> Option<&Shape> {
        let mut best: Option<(&Shape, f64)> = None;
        for shape in &self.shapes {
            let d = shape.distance_to(x, y);
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((shape, d));
            }
        }
        best.map(|(shape, _)| shape)
    }

    /// Empties the canvas. History is left alone.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Records an edit. Any redo history is discarded.
    pub fn add_edit(&mut self, edit: Edit) {
        debug!(edit = edit.name(), shape = %edit.shape_id(), "recorded");
        self.undo_stack.push(edit);
        self.redo_stack.clear();
    }

    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(mut edit) = self.undo_stack.pop() else {
            return false;
        };
        edit.undo(self);
        self.redo_stack.push(edit);
        true
    }

    /// Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(mut edit) = self.redo_stack.pop() else {
            return false;
        };
        edit.redo(self);
        self.undo_stack.push(edit);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for shape in &self.shapes {
            shape.draw(surface);
        }
    }

    /// Adds a finished drawing and records it.
    pub fn draw_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.add_shape(shape);
        self.add_edit(Edit::draw(id));
        id
    }

    pub fn delete_closest(&mut self, x: f64, y: f64) -> Option<ShapeId> {
        let id = self.closest_shape(x, y)?.id();
        let index = self.index_of(id)?;
        let shape = self.shapes.remove(index);
        self.add_edit(Edit::delete(id, index, shape));
        Some(id)
    }

    /// Adds a duplicate of the nearest shape on top and records it. The copy
    /// may keep moving afterwards; undo parks it wherever it ended up.
    pub fn copy_closest(&mut self, x: f64, y: f64) -> Option<ShapeId> {
        let copy = self.closest_shape(x, y)?.duplicate();
        let id = copy.id();
        self.add_shape(copy);
        self.add_edit(Edit::copy(id));
        Some(id)
    }

    /// Translates a shape and records the move.
    pub fn move_shape(&mut self, id: ShapeId, dx: f64, dy: f64) -> bool {
        let Some(shape) = self.shape_mut(id) else {
            return false;
        };
        shape.move_by(dx, dy);
        self.record_move(id, dx, dy);
        true
    }

    /// Records a move that a drag has already applied.
    pub fn record_move(&mut self, id: ShapeId, dx: f64, dy: f64) {
        self.add_edit(Edit::moved(id, dx, dy));
    }

    /// Collects every top-level shape whose center lies in the box `p1`..`p2`
    /// into a new group placed on top. Nothing happens when no shape
    /// qualifies.
    pub fn group_within(&mut self, p1: Point, p2: Point) -> Option<ShapeId> {
        let mut group = Shape::group(p1, p2);
        let mut members = Vec::new();
        let mut rest = Vec::with_capacity(self.shapes.len());
        for (index, shape) in std::mem::take(&mut self.shapes).into_iter().enumerate() {
            if !group.within(&shape) {
                rest.push(shape);
                continue;
            }
            let id = shape.id();
            match group.add_member(shape) {
                Ok(()) => members.push((index, id)),
                Err(shape) => rest.push(shape),
            }
        }
        self.shapes = rest;
        if members.is_empty() {
            return None;
        }
        let group_id = group.id();
        debug!(group = %group_id, members = members.len(), "grouped");
        self.add_shape(group);
        self.add_edit(Edit::group(group_id, members));
        Some(group_id)
    }

    pub fn to_text(&self) -> String {
        text_format::write_shapes(&self.shapes)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        binary_format::encode_shapes(&self.shapes)
    }

    /// Replaces the canvas with the parsed drawing. On error nothing changes.
    pub fn read_text(&mut self, text: &str) -> Result<(), FormatError> {
        let shapes = text_format::read_shapes(text)?;
        self.replace_shapes(shapes);
        Ok(())
    }

    /// Replaces the canvas with the decoded drawing. On error nothing changes.
    pub fn read_bytes(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        let shapes = binary_format::decode_shapes(bytes)?;
        self.replace_shapes(shapes);
        Ok(())
    }

    pub fn save_text(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_text()).map_err(|e| DocumentError::io(path, e))?;
        info!(path = %path.display(), shapes = self.len(), "saved text drawing");
        Ok(())
    }

    pub fn load_text(&mut self, path: &Path) -> Result<(), DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|e| DocumentError::io(path, e))?;
        self.read_text(&text)
            .map_err(|e| DocumentError::format(path, e))?;
        info!(path = %path.display(), shapes = self.len(), "loaded text drawing");
        Ok(())
    }

    pub fn save_binary(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_bytes()).map_err(|e| DocumentError::io(path, e))?;
        info!(path = %path.display(), shapes = self.len(), "saved binary drawing");
        Ok(())
    }

    pub fn load_binary(&mut self, path: &Path) -> Result<(), DocumentError> {
        let bytes = std::fs::read(path).map_err(|e| DocumentError::io(path, e))?;
        self.read_bytes(&bytes)
            .map_err(|e| DocumentError::format(path, e))?;
        info!(path = %path.display(), shapes = self.len(), "loaded binary drawing");
        Ok(())
    }

    fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.clear();
        self.shapes = shapes;
        self.clear_history();
    }
}
