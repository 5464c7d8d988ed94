//! Half-plane rules restricting a boundary line to its physically valid part.
//!
//! A rule is evaluated at a candidate point and refers to other lines of the
//! same diagram by key. A clipped segment of a line is kept only when every
//! rule of that line holds at the segment midpoint.

use super::{Composition, Diagram};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// `y > y_of_x(x)` of the referenced line
    Above(String),
    /// `y < y_of_x(x)` of the referenced line
    Below(String),
    /// `x < x_of_y(y)` of the referenced line
    LeftOf(String),
    /// `x > x_of_y(y)` of the referenced line
    RightOf(String),
    Special(Special),
}

/// Rules that are not a single half-plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Special {
    /// Holds when at least one of the inner rules holds.
    AnyOf(Vec<Rule>),
    /// `x` lies right of the crossing of two lines.
    RightOfCrossing { first: String, second: String },
    /// Compares the x of two crossings: `first.x < second.x` when ascending,
    /// `first.x >= second.x` otherwise. Independent of the candidate point.
    CrossingsOrdered {
        first: (String, String),
        second: (String, String),
        ascending: bool,
    },
}

impl Rule {
    pub fn above(key: &str) -> Self {
        Rule::Above(key.to_string())
    }

    pub fn below(key: &str) -> Self {
        Rule::Below(key.to_string())
    }

    pub fn left_of(key: &str) -> Self {
        Rule::LeftOf(key.to_string())
    }

    pub fn right_of(key: &str) -> Self {
        Rule::RightOf(key.to_string())
    }

    /// Evaluate at `(x, y)`. A reference to a missing line, or a crossing of
    /// parallel lines, makes the rule fail.
    pub fn holds(&self, x: f64, y: f64, p: &Composition, diagram: &Diagram) -> bool {
        match self {
            Rule::Above(key) => diagram.line(key).map_or(false, |l| y > l.y_of_x(x, p)),
            Rule::Below(key) => diagram.line(key).map_or(false, |l| y < l.y_of_x(x, p)),
            Rule::LeftOf(key) => diagram.line(key).map_or(false, |l| x < l.x_of_y(y, p)),
            Rule::RightOf(key) => diagram.line(key).map_or(false, |l| x > l.x_of_y(y, p)),
            Rule::Special(special) => special.holds(x, y, p, diagram),
        }
    }

    /// Keys of every line this rule evaluates.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Rule::Above(key) | Rule::Below(key) | Rule::LeftOf(key) | Rule::RightOf(key) => {
                vec![key.as_str()]
            }
            Rule::Special(Special::AnyOf(rules)) => {
                rules.iter().flat_map(|r| r.references()).collect()
            }
            Rule::Special(Special::RightOfCrossing { first, second }) => {
                vec![first.as_str(), second.as_str()]
            }
            Rule::Special(Special::CrossingsOrdered { first, second, .. }) => vec![
                first.0.as_str(),
                first.1.as_str(),
                second.0.as_str(),
                second.1.as_str(),
            ],
        }
    }
}

impl Special {
    fn holds(&self, x: f64, y: f64, p: &Composition, diagram: &Diagram) -> bool {
        match self {
            Special::AnyOf(rules) => rules.iter().any(|r| r.holds(x, y, p, diagram)),
            Special::RightOfCrossing { first, second } => diagram
                .intersection(first, second, p)
                .map_or(false, |c| x > c[0]),
            Special::CrossingsOrdered {
                first,
                second,
                ascending,
            } => {
                let a = diagram.intersection(&first.0, &first.1, p);
                let b = diagram.intersection(&second.0, &second.1, p);
                match (a, b) {
                    (Some(a), Some(b)) if *ascending => a[0] < b[0],
                    (Some(a), Some(b)) => a[0] >= b[0],
                    _ => false,
                }
            }
        }
    }
}
