//! Standard thermodynamic properties of the species taking part in the reactions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Substance {
    pub formula: &'static str,
    /// Standard Gibbs energy of formation [kJ/mol]
    pub dfg: f64,
    /// Standard enthalpy of formation [kJ/mol]
    pub dfh: f64,
    /// Heat capacity [J/mol/K]
    pub cp: f64,
    pub solid: bool,
}

const fn gas(formula: &'static str, dfg: f64, dfh: f64, cp: f64) -> Substance {
    Substance {
        formula,
        dfg,
        dfh,
        cp,
        solid: false,
    }
}

const fn solid(formula: &'static str, dfg: f64, dfh: f64, cp: f64) -> Substance {
    Substance {
        formula,
        dfg,
        dfh,
        cp,
        solid: true,
    }
}

pub const SUBSTANCES: &[Substance] = &[
    gas("O2", 0.0, 0.0, 29.4),
    solid("S", 0.0, 0.0, 22.6),
    solid("Fe", 0.0, 0.0, 25.1),
    gas("H2O", -228.6, -241.8, 33.6),
    gas("CO2", -394.4, -393.5, 37.1),
    gas("CO", -137.2, -110.5, 29.1),
    gas("NO", 87.6, 91.3, 29.9),
    gas("NO2", 51.3, 33.2, 37.2),
    gas("H2S", -33.4, -20.6, 34.2),
    gas("COS", -169.2, -142.0, 41.5),
    gas("SO2", -300.1, -296.8, 39.9),
    gas("SO3", -371.1, -395.7, 50.7),
    gas("H2SO4", -653.31, -735.13, 83.7),
    gas("HNO2", -46.0, -79.5, 45.6),
    gas("HNO3", -73.5, -133.9, 54.1),
    solid("FeO", -251.46, -271.96, 49.915),
    solid("Fe3O4", -1015.46, -1118.4, 143.4),
    solid("Fe2O3", -742.24, -824.25, 103.9),
    solid("FeCO3", -666.72, -740.57, 82.1),
    solid("Fe(OH)3", -696.5, -823.0, 101.671),
    solid("Fe(OH)2", -486.5, -569.0, 97.069),
    solid("FeO(OH)", -489.8, -561.9, 74.5),
    solid("FeS2", -166.94, -178.24, 62.2),
    solid("FeS", -100.42, -99.998, 50.5),
    solid("FeSO4", -825.08, -928.43, 100.6),
    solid("Fe2(SO4)3", -2263.1, -2581.5, 264.722),
    // No heat capacity data available
    solid("FeSO4.H2O", -1081.2, -1243.69, 0.0),
    solid("FeSO4.7H2O", -2510.274, -3014.572, 394.5),
    solid("Fe(NO3)2", -288.0, -497.9, 150.0),
];

pub fn lookup(formula: &str) -> Option<&'static Substance> {
    SUBSTANCES.iter().find(|s| s.formula == formula)
}
