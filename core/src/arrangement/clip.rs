//! Reduce each boundary line to the part that lies in bounds and satisfies its rules.

use crate::diagram::{Bounds, BoundaryLine, Composition, Diagram};
use crate::geometry::{round_coord, round_point, Point2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A straight piece of one line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> Point2 {
        [
            0.5 * (self.start[0] + self.end[0]),
            0.5 * (self.start[1] + self.end[1]),
        ]
    }
}

/// The single active piece of a line for one composition, endpoints rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveLine {
    pub key: String,
    pub start: Point2,
    pub end: Point2,
}

/// Clip `line` against `bounds`, splitting at the given crossings and keeping
/// the pieces whose midpoint satisfies every rule of the line.
///
/// Breakpoints are parameterised along y for vertical lines and along x for
/// all others. The returned segments are sorted along that axis.
pub fn clip_line(
    diagram: &Diagram,
    line: &BoundaryLine,
    intersections: &[Point2],
    p: &Composition,
    bounds: &Bounds,
) -> Vec<Segment> {
    let vertical = line.is_vertical();
    let coeffs = line.coeffs(p);

    let mut ts: Vec<f64> = intersections
        .iter()
        .filter(|pt| coeffs.contains(**pt))
        .map(|pt| if vertical { pt[1] } else { pt[0] })
        .collect();

    // Crossings with x = x_min/x_max are seeded by the x bounds below.
    if !vertical && !line.is_horizontal() {
        ts.push(line.x_of_y(bounds.y_min, p));
        ts.push(line.x_of_y(bounds.y_max, p));
    }

    if vertical {
        ts.extend([bounds.y_min, bounds.y_max]);
    } else {
        ts.extend([bounds.x_min, bounds.x_max]);
    }

    let point_at = |t: f64| -> Point2 {
        if vertical {
            [line.x_of_y(t, p), t]
        } else {
            [t, line.y_of_x(t, p)]
        }
    };

    ts.retain(|&t| {
        let pt = round_point(point_at(t));
        bounds.contains_x(pt[0]) && bounds.contains_y(pt[1])
    });
    ts.sort_by(|a, b| a.total_cmp(b));
    ts.dedup_by(|next, kept| round_coord(*next) == round_coord(*kept));

    let mut segments = Vec::new();
    for pair in ts.windows(2) {
        let segment = Segment::new(point_at(pair[0]), point_at(pair[1]));
        let mid = segment.midpoint();
        if line
            .rules()
            .iter()
            .all(|rule| rule.holds(mid[0], mid[1], p, diagram))
        {
            segments.push(segment);
        }
    }
    segments
}

/// Active piece of every participating line of `diagram`.
///
/// Kept segments of one line are merged into a single span from the first
/// start to the last end. Lines without a kept segment, or whose span
/// collapses to one point after rounding, are dropped.
pub fn active_lines(diagram: &Diagram, p: &Composition, bounds: &Bounds) -> Vec<ActiveLine> {
    let intersections = diagram.all_intersections(p);

    let mut active = Vec::new();
    for line in diagram.lines() {
        if !line.is_active(p) {
            debug!(line = line.key(), "Line gated out for this composition");
            continue;
        }

        let segments = clip_line(diagram, line, &intersections, p, bounds);
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            continue;
        };

        let start = round_point(first.start);
        let end = round_point(last.end);
        if start == end {
            debug!(line = line.key(), "Active span collapsed to a point");
            continue;
        }

        active.push(ActiveLine {
            key: line.key().to_string(),
            start,
            end,
        });
    }

    debug!(
        diagram = diagram.name(),
        active = active.len(),
        total = diagram.lines().len(),
        "Clipped lines"
    );
    active
}
