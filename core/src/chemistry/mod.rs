//! Thermodynamic source of the boundary lines.
//!
//! Parses reaction equations, evaluates their equilibrium constants from the
//! substance table and turns each reaction into a [`BoundaryLine`]. The
//! standard catalog assembles the four corrosion-product diagrams.
//!
//! [`BoundaryLine`]: crate::diagram::BoundaryLine

pub mod catalog;
pub mod reaction;
pub mod substances;

pub use catalog::{
    standard_diagram, standard_diagrams, standard_reactions, Domain, MapKind, Range, REACTIONS,
};
pub use reaction::{Reaction, ReactionThermo, Term};
pub use substances::{Substance, SUBSTANCES};

use crate::diagram::{Component, DiagramError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ChemistryError {
    #[error("Cannot parse reaction '{equation}': {message}")]
    Parse { equation: String, message: String },
    #[error("Unknown substance: {0}")]
    UnknownSubstance(String),
    #[error("Unknown reaction: {0}")]
    UnknownReaction(String),
    #[error("{component:?} = {value} is outside [{min}, {max}]")]
    OutOfDomain {
        component: Component,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error(transparent)]
    Diagram(#[from] DiagramError),
}
