//! Line arrangement and face extraction.
//!
//! For one composition the lines of a diagram are:
//! 1. Clipped to the bounds and to their rules ([`clip`])
//! 2. Merged with the bounding rectangle into a planar graph ([`graph`])
//! 3. Walked face by face ([`faces`])
//! 4. Named and measured ([`regions`])
//!
//! Nothing is retained between calls.

pub mod clip;
pub mod faces;
pub mod graph;
pub mod regions;

pub use clip::{active_lines, clip_line, ActiveLine, Segment};
pub use faces::{trace_faces, Face};
pub use graph::{EdgeSource, PlanarGraph, Side};
pub use regions::{classify_faces, PhaseRegion, NON_SUBSTANCE_TOKENS};

use crate::diagram::{Bounds, Composition, Diagram};
use crate::geometry::Point2;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum ArrangementError {
    /// The half-edge structure lost its twin or angular links. `PlanarGraph::build`
    /// never produces such a graph, so this guards the face walk only.
    #[error("Inconsistent arrangement at {at:?}: {reason}")]
    Topology { at: Point2, reason: &'static str },
}

/// Named stability regions of `diagram` at composition `p`, sorted by name.
pub fn compute_regions(
    diagram: &Diagram,
    p: &Composition,
    bounds: &Bounds,
) -> Result<Vec<PhaseRegion>, ArrangementError> {
    let active = active_lines(diagram, p, bounds);
    let graph = PlanarGraph::build(&active, bounds);
    let faces = trace_faces(&graph)?;
    debug!(diagram = diagram.name(), faces = faces.len(), "Traced faces");
    Ok(classify_faces(faces))
}
