//! Pixel layout of annotation tracks.
//!
//! - [`LayoutEngine`] - places ranges of a segmented sequence and renders
//!   them
//! - [`Drawer`] / [`TrackDrawer`] - per-kind drawing strategies
//! - [`Canvas`] - drawing surface; [`SvgCanvas`] writes SVG,
//!   [`RecordingCanvas`] keeps the calls

mod canvas;
mod drawer;
mod engine;
mod svg_canvas;

pub use canvas::{Canvas, DrawCommand, PixelRect, RecordingCanvas, TextAlign};
pub use drawer::{
    regular_polygon, CrossLinkDrawer, DrawContext, Drawer, DrawerKind,
    DrawerRegistry, Fragment, LabeledBoxDrawer, ModificationPoints,
    ModificationPointDrawer, SecondaryStructureDrawer, TrackDrawer,
};
pub use engine::{Layout, LayoutEngine, PlacedFragment, RenderReport, Track};
pub use svg_canvas::SvgCanvas;
