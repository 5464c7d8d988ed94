//! Boundary-line descriptors and the diagrams they form.
//!
//! A [`Diagram`] is an ordered set of [`BoundaryLine`]s keyed by name. Lines
//! are bound to fixed slopes and evaluated against a [`Composition`] passed
//! explicitly on every call; nothing here caches per-composition values.

pub mod rules;
pub mod types;

pub use rules::{Rule, Special};
pub use types::*;

use crate::arrangement::{self, ArrangementError, PhaseRegion};
use crate::geometry::{intersect_lines, Point2};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DiagramError {
    #[error("Degenerate line {0}: both slope coefficients are zero")]
    DegenerateLine(String),
    #[error("Duplicate line key: {0}")]
    DuplicateLine(String),
    #[error("Line {line} has a rule referencing unknown line {reference}")]
    UnknownReference { line: String, reference: String },
    #[error("Line {line} has a rule that cannot be evaluated against {reference}: {reason}")]
    InvalidRule {
        line: String,
        reference: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Diagram {
    name: String,
    lines: Vec<BoundaryLine>,
    index: HashMap<String, usize>,
}

impl Diagram {
    /// Build a diagram, checking that every rule can be evaluated.
    pub fn new(name: impl Into<String>, lines: Vec<BoundaryLine>) -> Result<Self, DiagramError> {
        let mut index = HashMap::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if index.insert(line.key().to_string(), i).is_some() {
                return Err(DiagramError::DuplicateLine(line.key().to_string()));
            }
        }

        let diagram = Self {
            name: name.into(),
            lines,
            index,
        };

        for line in &diagram.lines {
            for rule in line.rules() {
                diagram.check_rule(line, rule)?;
            }
        }

        Ok(diagram)
    }

    fn check_rule(&self, line: &BoundaryLine, rule: &Rule) -> Result<(), DiagramError> {
        for reference in rule.references() {
            if !self.index.contains_key(reference) {
                return Err(DiagramError::UnknownReference {
                    line: line.key().to_string(),
                    reference: reference.to_string(),
                });
            }
        }

        let invalid = |reference: &str, reason| DiagramError::InvalidRule {
            line: line.key().to_string(),
            reference: reference.to_string(),
            reason,
        };

        match rule {
            Rule::Above(key) | Rule::Below(key) => {
                if self.line(key).map_or(false, |l| l.is_vertical()) {
                    return Err(invalid(key.as_str(), "vertical line has no y(x)"));
                }
            }
            Rule::LeftOf(key) | Rule::RightOf(key) => {
                if self.line(key).map_or(false, |l| l.is_horizontal()) {
                    return Err(invalid(key.as_str(), "horizontal line has no x(y)"));
                }
            }
            Rule::Special(Special::AnyOf(inner)) => {
                for r in inner {
                    self.check_rule(line, r)?;
                }
            }
            Rule::Special(_) => {}
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[BoundaryLine] {
        &self.lines
    }

    pub fn line(&self, key: &str) -> Option<&BoundaryLine> {
        self.index.get(key).map(|&i| &self.lines[i])
    }

    /// Crossing of two named lines, None when either is missing or they are parallel.
    pub fn intersection(&self, first: &str, second: &str, p: &Composition) -> Option<Point2> {
        let a = self.line(first)?;
        let b = self.line(second)?;
        intersect_lines(a.coeffs(p), b.coeffs(p))
    }

    /// Every pairwise crossing among the lines of this diagram.
    pub fn all_intersections(&self, p: &Composition) -> Vec<Point2> {
        let coeffs: Vec<_> = self.lines.iter().map(|l| l.coeffs(p)).collect();
        let mut points = Vec::new();
        for i in 0..coeffs.len() {
            for j in (i + 1)..coeffs.len() {
                if let Some(pt) = intersect_lines(coeffs[i], coeffs[j]) {
                    points.push(pt);
                }
            }
        }
        points
    }

    /// Named stability regions of this diagram for one composition.
    pub fn regions(&self, p: &Composition, bounds: &Bounds) -> Result<Vec<PhaseRegion>, ArrangementError> {
        arrangement::compute_regions(self, p, bounds)
    }
}

#[cfg(test)]
mod tests;
