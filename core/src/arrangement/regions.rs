//! Turn traced faces into named, measured stability regions.

use super::faces::Face;
use crate::diagram::key_tokens;
use crate::geometry::{close_loop, polygon_centroid, polygon_signed_area, Point2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Tokens produced by the key scheme that never name a solid phase.
pub const NON_SUBSTANCE_TOKENS: &[&str] = &["CO2", "HNO3", "H2S"];

/// A bounded face of the arrangement with a resolved phase name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRegion {
    pub name: String,
    pub area: f64,
    pub centroid: Point2,
    /// Closed loop, first point repeated at the end
    pub boundary: Vec<Point2>,
}

/// Tokens shared by every line bounding the face. Rectangle edges are ignored;
/// a face touched by no line gets an empty set.
fn candidate_names(face: &Face) -> BTreeSet<String> {
    let mut keys = face.sources.iter().filter_map(|s| s.line_key());
    let Some(first) = keys.next() else {
        return BTreeSet::new();
    };

    let mut names: BTreeSet<String> = key_tokens(first).map(str::to_string).collect();
    for key in keys {
        let tokens: BTreeSet<&str> = key_tokens(key).collect();
        names.retain(|n| tokens.contains(n.as_str()));
    }
    names
}

/// Name, measure and sort the bounded faces.
///
/// A face whose candidate set has several tokens loses every token held by
/// another face's (already reduced) set and the non-substance tokens. Faces
/// are processed in trace order. Only faces left with exactly one token are
/// kept; the result is sorted by name.
pub fn classify_faces(faces: Vec<Face>) -> Vec<PhaseRegion> {
    let inner: Vec<(Vec<Point2>, f64, BTreeSet<String>)> = faces
        .into_iter()
        .filter_map(|face| {
            let boundary = close_loop(&face.points);
            let area = polygon_signed_area(&boundary);
            if area > 0.0 {
                let names = candidate_names(&face);
                Some((boundary, area, names))
            } else {
                debug!(area, "Skipping outer face");
                None
            }
        })
        .collect();

    let mut names: Vec<BTreeSet<String>> = inner.iter().map(|(_, _, n)| n.clone()).collect();
    for i in 0..names.len() {
        if names[i].len() <= 1 {
            continue;
        }
        let others: Vec<usize> = (0..names.len()).filter(|&j| names[j] != names[i]).collect();
        for j in others {
            let other = names[j].clone();
            names[i].retain(|n| !other.contains(n));
        }
        names[i].retain(|n| !NON_SUBSTANCE_TOKENS.contains(&n.as_str()));
    }

    let mut regions = Vec::new();
    for ((boundary, area, candidates), resolved) in inner.into_iter().zip(names) {
        if resolved.len() != 1 {
            warn!(
                candidates = ?candidates,
                remaining = ?resolved,
                area,
                "Dropping region without a unique name"
            );
            continue;
        }
        let Some(centroid) = polygon_centroid(&boundary) else {
            warn!(area, "Dropping region without a centroid");
            continue;
        };
        let Some(name) = resolved.into_iter().next() else {
            continue;
        };
        regions.push(PhaseRegion {
            name,
            area,
            centroid,
            boundary,
        });
    }

    regions.sort_by(|a, b| a.name.cmp(&b.name));
    regions
}
