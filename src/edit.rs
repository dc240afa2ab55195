//! Reversible edits recorded on the document's undo/redo stacks.
//!
//! Each variant keeps just enough to invert itself. A shape that is off the
//! canvas (a drawn shape after undo, a deleted shape after redo, an emptied
//! group after undo) is parked inside the edit until it is needed again.

use tracing::{debug, warn};

use crate::document::Document;
use crate::model::{Shape, ShapeId};

#[derive(Debug, Clone)]
pub enum Edit {
    Draw {
        id: ShapeId,
        parked: Option<Shape>,
    },
    Delete {
        id: ShapeId,
        index: usize,
        parked: Option<Shape>,
    },
    Copy {
        id: ShapeId,
        parked: Option<Shape>,
    },
    Move {
        id: ShapeId,
        dx: f64,
        dy: f64,
    },
    Group {
        group_id: ShapeId,
        /// Top-level index each member had before grouping, in member order.
        members: Vec<(usize, ShapeId)>,
        parked: Option<Shape>,
    },
}

impl Edit {
    /// A shape that was just added to the canvas.
    pub fn draw(id: ShapeId) -> Self {
        Self::Draw { id, parked: None }
    }

    /// A shape that was removed from top-level position `index`.
    pub fn delete(id: ShapeId, index: usize, shape: Shape) -> Self {
        Self::Delete {
            id,
            index,
            parked: Some(shape),
        }
    }

    /// A duplicate that was just added to the canvas.
    pub fn copy(id: ShapeId) -> Self {
        Self::Copy { id, parked: None }
    }

    pub fn moved(id: ShapeId, dx: f64, dy: f64) -> Self {
        Self::Move { id, dx, dy }
    }

    /// A group that is on the canvas holding `members`.
    pub fn group(group_id: ShapeId, members: Vec<(usize, ShapeId)>) -> Self {
        Self::Group {
            group_id,
            members,
            parked: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Edit::Draw { .. } => "draw",
            Edit::Delete { .. } => "delete",
            Edit::Copy { .. } => "copy",
            Edit::Move { .. } => "move",
            Edit::Group { .. } => "group",
        }
    }

    /// The shape this edit is about (the group, for a grouping).
    pub fn shape_id(&self) -> ShapeId {
        match self {
            Edit::Draw { id, .. }
            | Edit::Delete { id, .. }
            | Edit::Copy { id, .. }
            | Edit::Move { id, .. } => *id,
            Edit::Group { group_id, .. } => *group_id,
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        debug!(edit = self.name(), shape = %self.shape_id(), "redo");
        match self {
            Edit::Draw { id, parked } | Edit::Copy { id, parked } => match parked.take() {
                Some(shape) => doc.add_shape(shape),
                None => warn!(shape = %id, "nothing parked to restore"),
            },
            Edit::Delete { id, index, parked } => {
                let Some(at) = doc.index_of(*id) else {
                    warn!(shape = %id, "shape to delete is not on the canvas");
                    return;
                };
                *index = at;
                *parked = doc.delete_shape(*id);
            }
            Edit::Move { id, dx, dy } => translate(doc, *id, *dx, *dy),
            Edit::Group {
                group_id,
                members,
                parked,
            } => {
                let Some(mut group) = parked.take() else {
                    warn!(shape = %group_id, "no group parked to regroup into");
                    return;
                };
                for (_, id) in members.iter() {
                    let Some(member) = doc.delete_shape(*id) else {
                        warn!(shape = %id, "group member missing from the canvas");
                        continue;
                    };
                    if let Err(member) = group.add_member(member) {
                        doc.add_shape(member);
                    }
                }
                doc.add_shape(group);
            }
        }
    }

    pub fn undo(&mut self, doc: &mut Document) {
        debug!(edit = self.name(), shape = %self.shape_id(), "undo");
        match self {
            Edit::Draw { id, parked } | Edit::Copy { id, parked } => {
                *parked = doc.delete_shape(*id);
                if parked.is_none() {
                    warn!(shape = %id, "shape to remove is not on the canvas");
                }
            }
            Edit::Delete { id, index, parked } => match parked.take() {
                Some(shape) => doc.insert_shape(*index, shape),
                None => warn!(shape = %id, "nothing parked to restore"),
            },
            Edit::Move { id, dx, dy } => translate(doc, *id, -*dx, -*dy),
            Edit::Group {
                group_id,
                members,
                parked,
            } => {
                let Some(mut group) = doc.delete_shape(*group_id) else {
                    warn!(shape = %group_id, "group is not on the canvas");
                    return;
                };
                // Members were captured in ascending index order, so inserting
                // them in that order rebuilds the original sequence.
                for member in group.take_members() {
                    match members.iter().find(|(_, id)| *id == member.id()) {
                        Some((index, _)) => doc.insert_shape(*index, member),
                        None => doc.add_shape(member),
                    }
                }
                *parked = Some(group);
            }
        }
    }
}

fn translate(doc: &mut Document, id: ShapeId, dx: f64, dy: f64) {
    match doc.shape_mut(id) {
        Some(shape) => shape.move_by(dx, dy),
        None => warn!(shape = %id, "shape to move is not on the canvas"),
    }
}
