//! The standard iron corrosion-product reactions and the rule sets that turn
//! them into the O, C, N and S stability diagrams.

use super::{ChemistryError, Reaction};
use crate::diagram::{Component, Composition, Diagram, Rule, Special};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `(key, equation)` of every reaction in the catalog.
pub const REACTIONS: &[(&str, &str)] = &[
    ("Fe/Fe3O4", "3Fe + 2O2 <=> Fe3O4"),
    ("Fe/Fe(OH)2", "Fe + H2O + 1/2O2 <=> Fe(OH)2"),
    ("Fe3O4/Fe2O3", "2Fe3O4 + 1/2O2 <=> 3Fe2O3"),
    ("Fe3O4/Fe(OH)2", "Fe3O4 + 3H2O <=> 3Fe(OH)2 + 1/2O2"),
    ("Fe2O3/FeO(OH)", "Fe2O3 + H2O <=> 2FeO(OH)"),
    ("Fe3O4/FeO(OH)", "Fe3O4 + 3/2H2O + 1/4O2 <=> 3FeO(OH)"),
    ("FeCO3/FeO(OH)", "FeCO3 + 1/2H2O + 1/4O2 <=> FeO(OH) + CO2"),
    ("Fe/CO2/FeCO3", "Fe + CO2 + 1/2O2 <=> FeCO3"),
    ("Fe/CO/FeCO3", "Fe + CO + O2 <=> FeCO3"),
    ("FeCO3/Fe2O3", "2FeCO3 + 1/2O2 <=> Fe2O3 + 2CO2"),
    ("Fe2O3/SO3/Fe2(SO4)3", "Fe2O3 + 3SO3 <=> Fe2(SO4)3"),
    ("Fe/COS/FeS", "Fe + COS + 1/2O2 <=> FeS + CO2"),
    ("Fe/H2S/FeS", "Fe + H2S + 1/2O2 <=> FeS + H2O"),
    ("FeCO3/H2S/FeS", "FeCO3 + H2S <=> FeS + H2O + CO2"),
    ("FeS/S/FeCO3", "FeS + CO2 + 1/2O2 <=> FeCO3 + S"),
    ("FeCO3/S/FeSO4", "FeCO3 + S + 3/2O2 <=> FeSO4 + CO2"),
    ("FeS/COS/FeS2", "FeS + COS + 1/2O2 <=> FeS2 + CO2"),
    ("FeS/H2S/FeS2", "FeS + H2S + 1/2O2 <=> FeS2 + H2O"),
    ("FeS2/S/FeSO4", "FeS2 + 2O2 <=> FeSO4 + S"),
    ("FeSO4/S/Fe2(SO4)3", "2FeSO4 + S + 2O2 <=> Fe2(SO4)3"),
    ("FeSO4/SO2/Fe2(SO4)3", "2FeSO4 + SO2 + O2 <=> Fe2(SO4)3"),
    ("Fe2O3/NO2/Fe(NO3)2", "Fe2O3 + 4NO2 + 1/2O2 <=> 2Fe(NO3)2"),
    ("Fe(NO3)2/NO2/FeO(OH)", "Fe(NO3)2 + 1/2H2O <=> FeO(OH) + 2NO2 + 1/4O2"),
    ("Fe(NO3)2/HNO3/FeO(OH)", "Fe(NO3)2 + 3/2H2O + 1/4O2 <=> FeO(OH) + 2HNO3"),
    ("FeSO4.H2O/FeSO4", "FeSO4.H2O <=> FeSO4 + H2O"),
    ("FeSO4.7H2O/FeSO4.H2O", "FeSO4.7H2O <=> FeSO4.H2O + 6H2O"),
    ("FeSO4.H2O/FeS2", "FeSO4.H2O + S <=> FeS2 + 2O2 + H2O"),
    ("FeSO4.H2O/S/Fe2(SO4)3", "2FeSO4.H2O + S + 2O2 <=> Fe2(SO4)3 + 2H2O"),
    ("FeSO4.7H2O/S/FeS2", "FeSO4.7H2O + S <=> FeS2 + 2O2 + 7H2O"),
    ("FeSO4.H2O/SO2/Fe2(SO4)3", "2FeSO4.H2O + SO2 + O2 <=> Fe2(SO4)3 + 2H2O"),
    ("FeSO4.7H2O/SO2/Fe2(SO4)3", "2FeSO4.7H2O + SO2 + O2 <=> Fe2(SO4)3 + 14H2O"),
    ("FeSO4.7H2O/H2SO4/Fe2(SO4)3", "2FeSO4.7H2O + H2SO4 + 1/2O2 <=> Fe2(SO4)3 + 15H2O"),
    ("FeSO4.7H2O/H2S/FeS2", "FeSO4.7H2O + H2S  <=> FeS2 + 8H2O + 3/2O2"),
    ("FeSO4.7H2O/FeS", "FeSO4.7H2O  <=> FeS + 7H2O + 2O2"),
    ("FeSO4.7H2O/Fe", "FeSO4.7H2O  <=> Fe + H2S + 6H2O + 5/2O2"),
    ("FeCO3/Fe3O4", "3FeCO3 + 1/2O2 <=> Fe3O4 + 3CO2"),
    ("FeCO3/Fe(OH)2", "FeCO3 + H2O <=> Fe(OH)2 + CO2"),
    ("Fe(OH)2/FeO(OH)", "Fe(OH)2 + 1/4O2 <=> FeO(OH) + 1/2H2O"),
    ("Fe(NO3)2/HNO2/FeO(OH)", "Fe(NO3)2 + 3/2H2O  <=> FeO(OH) + 2HNO2 + 3/4O2"),
    ("Fe(NO3)2/NO/FeO(OH)", "Fe(NO3)2 + 1/2H2O <=> FeO(OH) + 2NO + 5/4O2"),
    ("Fe2O3/NO/Fe(NO3)2", "Fe2O3 + 4NO + 5/2O2 <=> 2Fe(NO3)2"),
    ("Fe2O3/HNO3/Fe(NO3)2", "Fe2O3 + 4HNO3 <=> 2Fe(NO3)2 + 2H2O + 1/2O2"),
];

/// Which oxidant family a diagram covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MapKind {
    #[serde(rename = "O")]
    Oxygen,
    #[serde(rename = "C")]
    Carbon,
    #[serde(rename = "N")]
    Nitrogen,
    #[serde(rename = "S")]
    Sulfur,
}

impl MapKind {
    pub const ALL: [MapKind; 4] = [
        MapKind::Oxygen,
        MapKind::Carbon,
        MapKind::Nitrogen,
        MapKind::Sulfur,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            MapKind::Oxygen => "O",
            MapKind::Carbon => "C",
            MapKind::Nitrogen => "N",
            MapKind::Sulfur => "S",
        }
    }
}

impl std::fmt::Display for MapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parse every catalog reaction.
pub fn standard_reactions() -> Result<Vec<Reaction>, ChemistryError> {
    REACTIONS
        .iter()
        .map(|(key, equation)| Reaction::parse(key, equation))
        .collect()
}

/// Build one standard diagram from parsed catalog reactions.
pub fn standard_diagram(kind: MapKind, reactions: &[Reaction]) -> Result<Diagram, ChemistryError> {
    let rule_set = match kind {
        MapKind::Oxygen => oxygen_rules(),
        MapKind::Carbon => carbon_rules(),
        MapKind::Nitrogen => nitrogen_rules(),
        MapKind::Sulfur => sulfur_rules(),
    };

    let mut lines = Vec::with_capacity(rule_set.len());
    for (key, rules) in rule_set {
        let reaction = reactions
            .iter()
            .find(|r| r.key == key)
            .ok_or_else(|| ChemistryError::UnknownReaction(key.to_string()))?;
        lines.push(reaction.boundary_line()?.with_rules(rules));
    }

    debug!(map = %kind, lines = lines.len(), "Assembled standard diagram");
    Ok(Diagram::new(kind.symbol(), lines)?)
}

/// All four standard diagrams in `MapKind::ALL` order.
pub fn standard_diagrams() -> Result<Vec<(MapKind, Diagram)>, ChemistryError> {
    let reactions = standard_reactions()?;
    MapKind::ALL
        .iter()
        .map(|&kind| -> Result<_, ChemistryError> {
            Ok((kind, standard_diagram(kind, &reactions)?))
        })
        .collect()
}

type RuleSet = Vec<(&'static str, Vec<Rule>)>;

fn above(key: &str) -> Rule {
    Rule::above(key)
}

fn below(key: &str) -> Rule {
    Rule::below(key)
}

fn left_of(key: &str) -> Rule {
    Rule::left_of(key)
}

fn right_of(key: &str) -> Rule {
    Rule::right_of(key)
}

fn oxygen_rules() -> RuleSet {
    vec![
        ("Fe/Fe3O4", vec![below("Fe/Fe(OH)2")]),
        ("Fe/Fe(OH)2", vec![below("Fe/Fe3O4")]),
        (
            "Fe3O4/Fe(OH)2",
            vec![above("Fe/Fe3O4"), below("Fe(OH)2/FeO(OH)")],
        ),
        ("Fe3O4/Fe2O3", vec![left_of("Fe2O3/FeO(OH)")]),
        (
            "Fe3O4/FeO(OH)",
            vec![below("Fe3O4/Fe2O3"), above("Fe3O4/Fe(OH)2")],
        ),
        ("Fe2O3/FeO(OH)", vec![above("Fe3O4/Fe2O3")]),
        ("Fe(OH)2/FeO(OH)", vec![below("Fe3O4/Fe(OH)2")]),
    ]
}

/// Iron, iron oxides and hydroxides plus siderite (FeCO3).
fn carbon_rules() -> RuleSet {
    vec![
        ("Fe/Fe3O4", vec![below("Fe/CO2/FeCO3"), below("Fe/Fe(OH)2")]),
        (
            "Fe/Fe(OH)2",
            vec![right_of("FeCO3/Fe(OH)2"), below("Fe/Fe3O4")],
        ),
        (
            "Fe3O4/Fe(OH)2",
            vec![
                right_of("FeCO3/Fe(OH)2"),
                below("Fe(OH)2/FeO(OH)"),
                above("Fe/Fe(OH)2"),
            ],
        ),
        (
            "Fe3O4/Fe2O3",
            vec![left_of("Fe2O3/FeO(OH)"), above("FeCO3/Fe3O4")],
        ),
        (
            "Fe3O4/FeO(OH)",
            vec![
                below("Fe3O4/Fe2O3"),
                above("Fe3O4/Fe(OH)2"),
                above("FeCO3/Fe3O4"),
            ],
        ),
        (
            "Fe2O3/FeO(OH)",
            vec![above("Fe3O4/Fe2O3"), above("FeCO3/Fe2O3")],
        ),
        (
            "Fe/CO2/FeCO3",
            vec![left_of("FeCO3/Fe(OH)2"), below("Fe/Fe3O4")],
        ),
        (
            "FeCO3/Fe2O3",
            vec![above("Fe3O4/Fe2O3"), left_of("Fe2O3/FeO(OH)")],
        ),
        (
            "FeCO3/FeO(OH)",
            vec![
                right_of("Fe2O3/FeO(OH)"),
                left_of("FeCO3/Fe(OH)2"),
                below("FeCO3/Fe3O4"),
            ],
        ),
        (
            "FeCO3/Fe3O4",
            vec![
                left_of("FeCO3/Fe(OH)2"),
                below("Fe3O4/Fe2O3"),
                below("Fe3O4/FeO(OH)"),
                above("Fe/CO2/FeCO3"),
            ],
        ),
        (
            "FeCO3/Fe(OH)2",
            vec![
                below("FeCO3/Fe3O4"),
                above("Fe/CO2/FeCO3"),
                below("FeCO3/FeO(OH)"),
            ],
        ),
        (
            "Fe(OH)2/FeO(OH)",
            vec![below("Fe3O4/Fe(OH)2"), right_of("FeCO3/Fe(OH)2")],
        ),
    ]
}

/// The carbon set extended with the iron nitrate lines.
fn nitrogen_rules() -> RuleSet {
    // Both HNO3 lines are kept on the side of their crossings with the NO2
    // line that makes them adjacent to each other.
    let hno3_crossings = |ascending| {
        Rule::Special(Special::CrossingsOrdered {
            first: (
                "Fe(NO3)2/HNO3/FeO(OH)".to_string(),
                "Fe2O3/NO2/Fe(NO3)2".to_string(),
            ),
            second: (
                "Fe2O3/HNO3/Fe(NO3)2".to_string(),
                "Fe2O3/NO2/Fe(NO3)2".to_string(),
            ),
            ascending,
        })
    };

    let mut rules = carbon_rules();
    for (key, line_rules) in rules.iter_mut() {
        if *key == "Fe2O3/FeO(OH)" {
            line_rules.push(Rule::Special(Special::AnyOf(vec![
                below("Fe(NO3)2/NO2/FeO(OH)"),
                below("Fe2O3/NO/Fe(NO3)2"),
                Rule::Special(Special::RightOfCrossing {
                    first: "Fe(NO3)2/HNO3/FeO(OH)".to_string(),
                    second: "Fe(NO3)2/NO2/FeO(OH)".to_string(),
                }),
            ])));
        }
    }

    rules.extend([
        (
            "Fe2O3/NO2/Fe(NO3)2",
            vec![
                left_of("Fe2O3/FeO(OH)"),
                above("Fe2O3/NO/Fe(NO3)2"),
                below("Fe(NO3)2/HNO3/FeO(OH)"),
                below("Fe2O3/HNO3/Fe(NO3)2"),
            ],
        ),
        (
            "Fe(NO3)2/NO2/FeO(OH)",
            vec![
                above("Fe2O3/NO2/Fe(NO3)2"),
                below("Fe(NO3)2/HNO3/FeO(OH)"),
                above("Fe(NO3)2/NO/FeO(OH)"),
            ],
        ),
        (
            "Fe(NO3)2/HNO3/FeO(OH)",
            vec![
                above("Fe(NO3)2/NO2/FeO(OH)"),
                above("Fe2O3/NO2/Fe(NO3)2"),
                hno3_crossings(true),
            ],
        ),
        (
            "Fe(NO3)2/NO/FeO(OH)",
            vec![above("Fe2O3/NO/Fe(NO3)2"), above("Fe(NO3)2/NO2/FeO(OH)")],
        ),
        (
            "Fe2O3/NO/Fe(NO3)2",
            vec![above("Fe(NO3)2/NO/FeO(OH)"), above("Fe2O3/NO2/Fe(NO3)2")],
        ),
        (
            "Fe2O3/HNO3/Fe(NO3)2",
            vec![above("Fe2O3/NO2/Fe(NO3)2"), hno3_crossings(false)],
        ),
    ]);
    rules
}

fn sulfur_rules() -> RuleSet {
    vec![
        ("Fe/COS/FeS", vec![above("Fe/H2S/FeS")]),
        ("Fe/H2S/FeS", vec![above("Fe/COS/FeS")]),
        ("FeS/COS/FeS2", vec![above("FeS/H2S/FeS2")]),
        ("FeS/H2S/FeS2", vec![above("FeS/COS/FeS2")]),
        ("FeS2/S/FeSO4", vec![left_of("FeSO4.H2O/FeSO4")]),
        (
            "FeSO4/S/Fe2(SO4)3",
            vec![left_of("FeSO4.H2O/FeSO4"), above("FeSO4/SO2/Fe2(SO4)3")],
        ),
        (
            "FeSO4/SO2/Fe2(SO4)3",
            vec![left_of("FeSO4.H2O/FeSO4"), above("FeSO4/S/Fe2(SO4)3")],
        ),
        (
            "FeSO4.H2O/FeSO4",
            vec![
                above("FeS2/S/FeSO4"),
                Rule::Special(Special::AnyOf(vec![
                    below("FeSO4/SO2/Fe2(SO4)3"),
                    below("FeSO4/S/Fe2(SO4)3"),
                ])),
            ],
        ),
        (
            "FeSO4.7H2O/FeSO4.H2O",
            vec![
                above("FeSO4.H2O/FeS2"),
                below("FeSO4.H2O/SO2/Fe2(SO4)3"),
            ],
        ),
        (
            "FeSO4.H2O/FeS2",
            vec![
                right_of("FeSO4.H2O/FeSO4"),
                left_of("FeSO4.7H2O/FeSO4.H2O"),
            ],
        ),
        (
            "FeSO4.H2O/S/Fe2(SO4)3",
            vec![
                right_of("FeSO4.H2O/FeSO4"),
                above("FeSO4.H2O/SO2/Fe2(SO4)3"),
                left_of("FeSO4.7H2O/FeSO4.H2O"),
            ],
        ),
        (
            "FeSO4.7H2O/S/FeS2",
            vec![
                right_of("FeSO4.7H2O/FeSO4.H2O"),
                below("FeSO4.7H2O/H2S/FeS2"),
            ],
        ),
        (
            "FeSO4.H2O/SO2/Fe2(SO4)3",
            vec![
                right_of("FeSO4.H2O/FeSO4"),
                left_of("FeSO4.7H2O/FeSO4.H2O"),
                above("FeSO4.H2O/S/Fe2(SO4)3"),
            ],
        ),
        (
            "FeSO4.7H2O/SO2/Fe2(SO4)3",
            vec![
                above("FeSO4.H2O/SO2/Fe2(SO4)3"),
                above("FeSO4.H2O/S/Fe2(SO4)3"),
                above("FeSO4.7H2O/H2SO4/Fe2(SO4)3"),
            ],
        ),
        (
            "FeSO4.7H2O/H2SO4/Fe2(SO4)3",
            vec![above("FeSO4.7H2O/SO2/Fe2(SO4)3")],
        ),
        ("FeSO4.7H2O/H2S/FeS2", vec![below("FeSO4.7H2O/S/FeS2")]),
    ]
}

/// Closed interval of admissible values for one composition component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Compositions the thermodynamic data is considered valid for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub sulfur: Range,
    pub nitrogen: Range,
    pub co2: Range,
    pub temperature: Range,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            sulfur: Range::new(0.015, 3.0),
            nitrogen: Range::new(0.015, 3.0),
            co2: Range::new(0.015, 3e3),
            temperature: Range::new(258.15, 373.15),
        }
    }
}

impl Domain {
    pub fn range(&self, component: Component) -> Range {
        match component {
            Component::Sulfur => self.sulfur,
            Component::Nitrogen => self.nitrogen,
            Component::Co2 => self.co2,
            Component::Temperature => self.temperature,
        }
    }

    /// First component outside its range, if any. NaN is always rejected.
    pub fn check(&self, p: &Composition) -> Result<(), ChemistryError> {
        for component in [
            Component::Sulfur,
            Component::Nitrogen,
            Component::Co2,
            Component::Temperature,
        ] {
            let range = self.range(component);
            let value = p.get(component);
            if !range.contains(value) {
                return Err(ChemistryError::OutOfDomain {
                    component,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_parses() {
        let reactions = standard_reactions().unwrap();
        assert_eq!(reactions.len(), 42);
        assert!(reactions.iter().all(|r| r.thermo().is_ok()));
    }

    #[test]
    fn test_standard_diagrams_build() {
        let diagrams = standard_diagrams().unwrap();
        let counts: Vec<_> = diagrams
            .iter()
            .map(|(kind, d)| (*kind, d.lines().len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                (MapKind::Oxygen, 7),
                (MapKind::Carbon, 12),
                (MapKind::Nitrogen, 18),
                (MapKind::Sulfur, 16),
            ]
        );
        assert_eq!(diagrams[2].1.name(), "N");
    }

    #[test]
    fn test_nitrogen_map_carries_special_rules() {
        let reactions = standard_reactions().unwrap();
        let d = standard_diagram(MapKind::Nitrogen, &reactions).unwrap();
        let specials = d
            .lines()
            .iter()
            .flat_map(|l| l.rules())
            .filter(|r| matches!(r, Rule::Special(_)))
            .count();
        assert_eq!(specials, 3);
    }

    #[test]
    fn test_missing_reaction_reported() {
        let reactions = standard_reactions().unwrap();
        let partial: Vec<_> = reactions
            .into_iter()
            .filter(|r| r.key != "Fe/Fe3O4")
            .collect();
        assert_eq!(
            standard_diagram(MapKind::Oxygen, &partial).unwrap_err(),
            ChemistryError::UnknownReaction("Fe/Fe3O4".into())
        );
    }

    #[test]
    fn test_map_kind_order_and_serde() {
        assert!(MapKind::Oxygen < MapKind::Carbon);
        assert!(MapKind::Nitrogen < MapKind::Sulfur);
        assert_eq!(serde_json::to_string(&MapKind::Carbon).unwrap(), "\"C\"");
        let kind: MapKind = serde_json::from_str("\"S\"").unwrap();
        assert_eq!(kind, MapKind::Sulfur);
    }

    #[test]
    fn test_domain_check() {
        let domain = Domain::default();
        assert!(domain.check(&Composition::new(1.0, 1.0, 2000.0, 298.15)).is_ok());
        assert!(domain.check(&Composition::new(3.0, 0.015, 3000.0, 373.15)).is_ok());

        let err = domain
            .check(&Composition::new(1.0, 1.0, 2000.0, 400.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ChemistryError::OutOfDomain {
                component: Component::Temperature,
                ..
            }
        ));
        assert!(domain
            .check(&Composition::new(f64::NAN, 1.0, 1.0, 300.0))
            .is_err());
    }
}
