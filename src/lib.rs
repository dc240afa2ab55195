//! # shape-editor
//!
//! Core of a 2D vector-shape editor: lines, rectangles, ovals and nested
//! groups on a canvas, with a reversible edit log and two file formats.
//!
//! - [`model`]: shapes, groups and their geometry
//! - [`edit`]: the undo/redo commands
//! - [`document`]: the canvas and its history
//! - [`text_format`] / [`binary_format`]: persistence
//! - [`tools`]: pointer gestures mapped onto document operations
//!
//! The egui shell in the binary only drives these through [`Document`] and
//! [`tools::ToolState`], and paints through [`draw::Surface`].

pub mod binary_format;
pub mod document;
pub mod draw;
pub mod edit;
pub mod error;
pub mod model;
pub mod text_format;
pub mod tools;

pub use document::Document;
pub use error::{DocumentError, FormatError};
pub use model::{Point, Rgb, Shape, ShapeId, ShapeKind};

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))
}
