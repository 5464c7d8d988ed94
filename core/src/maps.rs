//! The family of diagrams computed together for one composition.

use crate::arrangement::{ArrangementError, PhaseRegion};
use crate::chemistry::{self, ChemistryError, Domain, MapKind, Reaction};
use crate::diagram::{Bounds, Composition, Diagram};
use rayon::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

pub type Maps = BTreeMap<MapKind, Vec<PhaseRegion>>;

#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error(transparent)]
    Chemistry(#[from] ChemistryError),
    #[error("Map {map}: {source}")]
    Arrangement {
        map: MapKind,
        #[source]
        source: ArrangementError,
    },
}

/// Compute every diagram in parallel. One failing diagram fails the call.
pub fn compute_maps(
    diagrams: &[(MapKind, Diagram)],
    p: &Composition,
    bounds: &Bounds,
) -> Result<Maps, MapError> {
    diagrams
        .par_iter()
        .map(|(kind, diagram)| -> Result<_, MapError> {
            let regions = diagram
                .regions(p, bounds)
                .map_err(|source| MapError::Arrangement { map: *kind, source })?;
            debug!(map = %kind, regions = regions.len(), "Computed map");
            Ok((*kind, regions))
        })
        .collect()
}

/// Parsed catalog and the four standard diagrams, built once and reused for
/// every composition.
#[derive(Debug, Clone)]
pub struct StandardMaps {
    reactions: Vec<Reaction>,
    diagrams: Vec<(MapKind, Diagram)>,
    bounds: Bounds,
    domain: Domain,
}

impl StandardMaps {
    pub fn new() -> Result<Self, MapError> {
        let reactions = chemistry::standard_reactions()?;
        let diagrams = MapKind::ALL
            .iter()
            .map(|&kind| -> Result<_, ChemistryError> {
                Ok((kind, chemistry::standard_diagram(kind, &reactions)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            reactions = reactions.len(),
            diagrams = diagrams.len(),
            "Loaded standard maps"
        );
        Ok(Self {
            reactions,
            diagrams,
            bounds: Bounds::default(),
            domain: Domain::default(),
        })
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn diagrams(&self) -> &[(MapKind, Diagram)] {
        &self.diagrams
    }

    pub fn diagram(&self, kind: MapKind) -> Option<&Diagram> {
        self.diagrams
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, d)| d)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// All four maps for a composition inside the domain.
    pub fn compute(&self, p: &Composition) -> Result<Maps, MapError> {
        self.domain.check(p)?;
        compute_maps(&self.diagrams, p, &self.bounds)
    }
}
