//! Phase-stability diagrams of iron corrosion products.
//!
//! Boundary lines derived from reaction equilibria are clipped, arranged
//! into a planar graph and traced into named stability regions for a given
//! composition.

pub mod arrangement;
pub mod chemistry;
pub mod diagram;
pub mod geometry;
pub mod maps;

pub use arrangement::{compute_regions, ArrangementError, PhaseRegion};
pub use diagram::{Bounds, BoundaryLine, Composition, Diagram, DiagramError, Rule, Special};
pub use maps::{compute_maps, MapError, Maps, StandardMaps};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
