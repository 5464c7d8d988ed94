//! Reaction equations, their thermodynamics and the boundary line they induce.
//!
//! A reaction `aA + bB <=> cC + dD` in equilibrium defines a straight line in
//! the (lgH2O, lgO2) plane:
//!
//! `-lgKp(T) + s*log10(S) + n*log10(N) + c*log10(C) + b*lgH2O + c'*lgO2 = 0`
//!
//! where the slopes are the net stoichiometric coefficients of H2O and O2 and
//! the total-sulphur, total-nitrogen and CO2 species shift the intercept.

use super::substances;
use super::ChemistryError;
use crate::diagram::{BoundaryLine, Intercept};
use serde::{Deserialize, Serialize};

/// [J/K/mol]
pub const GAS_CONSTANT: f64 = 8.314;
/// [K]
pub const REFERENCE_TEMPERATURE: f64 = 298.15;
/// [Pa]
pub const STANDARD_PRESSURE: f64 = 1e5;

/// Species whose activity is approximated by the total sulphur concentration.
pub const TOTAL_SULFUR_SPECIES: &[&str] = &["COS", "H2S", "SO2", "SO3", "H2SO4"];
/// Species whose activity is approximated by the total nitrogen concentration.
pub const TOTAL_NITROGEN_SPECIES: &[&str] = &["NO2", "HNO3"];

/// One `coefficient formula` term of a reaction side.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub coeff: f64,
    pub formula: String,
}

impl Term {
    /// Parse `3/2H2O`, `2O2` or `Fe`.
    fn parse(text: &str, equation: &str) -> Result<Self, ChemistryError> {
        let parse_err = |message: String| ChemistryError::Parse {
            equation: equation.to_string(),
            message,
        };

        let split = text
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| parse_err(format!("term '{}' has no formula", text)))?;
        let (number, formula) = text.split_at(split);

        let coeff = if number.is_empty() {
            1.0
        } else if let Some((num, den)) = number.split_once('/') {
            let num: u32 = num
                .parse()
                .map_err(|_| parse_err(format!("bad numerator in '{}'", text)))?;
            let den: u32 = den
                .parse()
                .map_err(|_| parse_err(format!("bad denominator in '{}'", text)))?;
            if den == 0 {
                return Err(parse_err(format!("zero denominator in '{}'", text)));
            }
            num as f64 / den as f64
        } else {
            number
                .parse::<u32>()
                .map_err(|_| parse_err(format!("bad coefficient in '{}'", text)))? as f64
        };

        Ok(Self {
            coeff,
            formula: formula.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Boundary key, e.g. `Fe/CO2/FeCO3`
    pub key: String,
    pub equation: String,
    pub reactants: Vec<Term>,
    pub products: Vec<Term>,
}

impl Reaction {
    /// Parse an equation of the form `Fe + CO2 + 1/2O2 <=> FeCO3`.
    pub fn parse(key: &str, equation: &str) -> Result<Self, ChemistryError> {
        let compact: String = equation.chars().filter(|c| !c.is_whitespace()).collect();
        let (lhs, rhs) = compact.split_once("<=>").ok_or_else(|| ChemistryError::Parse {
            equation: equation.to_string(),
            message: "missing '<=>'".to_string(),
        })?;

        let side = |text: &str| -> Result<Vec<Term>, ChemistryError> {
            text.split('+').map(|t| Term::parse(t, equation)).collect()
        };

        let reaction = Self {
            key: key.to_string(),
            equation: equation.to_string(),
            reactants: side(lhs)?,
            products: side(rhs)?,
        };

        if let Some(term) = reaction
            .terms()
            .find(|(_, formula)| substances::lookup(formula).is_none())
        {
            return Err(ChemistryError::UnknownSubstance(term.1.to_string()));
        }

        Ok(reaction)
    }

    /// Signed coefficients: reactants negative, products positive.
    pub fn terms(&self) -> impl Iterator<Item = (f64, &str)> {
        self.reactants
            .iter()
            .map(|t| (-t.coeff, t.formula.as_str()))
            .chain(self.products.iter().map(|t| (t.coeff, t.formula.as_str())))
    }

    /// Net signed coefficient of one species (zero when absent).
    pub fn net_coefficient(&self, formula: &str) -> f64 {
        self.terms()
            .filter(|(_, f)| *f == formula)
            .map(|(c, _)| c)
            .sum()
    }

    fn net_coefficient_of_any(&self, formulas: &[&str]) -> f64 {
        formulas.iter().map(|f| self.net_coefficient(f)).sum()
    }

    pub fn thermo(&self) -> Result<ReactionThermo, ChemistryError> {
        let mut thermo = ReactionThermo {
            drg: 0.0,
            drh: 0.0,
            drcp: 0.0,
            nur: 0.0,
        };
        for (coeff, formula) in self.terms() {
            let s = substances::lookup(formula)
                .ok_or_else(|| ChemistryError::UnknownSubstance(formula.to_string()))?;
            thermo.drg += s.dfg * 1e3 * coeff;
            thermo.drh += s.dfh * 1e3 * coeff;
            thermo.drcp += s.cp * coeff;
            if !s.solid {
                thermo.nur += coeff;
            }
        }
        Ok(thermo)
    }

    /// The equilibrium line of this reaction in (lgH2O, lgO2) coordinates.
    pub fn boundary_line(&self) -> Result<BoundaryLine, ChemistryError> {
        let intercept = Intercept::Equilibrium {
            thermo: self.thermo()?,
            sulfur: self.net_coefficient_of_any(TOTAL_SULFUR_SPECIES),
            nitrogen: self.net_coefficient_of_any(TOTAL_NITROGEN_SPECIES),
            co2: self.net_coefficient("CO2"),
        };
        let line = BoundaryLine::new(
            self.key.as_str(),
            intercept,
            self.net_coefficient("H2O"),
            self.net_coefficient("O2"),
        )?;
        Ok(line)
    }
}

/// Reaction Gibbs energy, enthalpy, heat capacity and gas mole change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionThermo {
    /// [J/mol]
    pub drg: f64,
    /// [J/mol]
    pub drh: f64,
    /// [J/mol/K]
    pub drcp: f64,
    /// Net change of gaseous moles
    pub nur: f64,
}

impl ReactionThermo {
    /// Equilibrium constant in mole-fraction form at 298.15 K.
    pub fn k_chi_298(&self) -> f64 {
        (-self.drg / GAS_CONSTANT / REFERENCE_TEMPERATURE).exp()
    }

    /// ln K_chi(T), assuming a temperature-independent ΔrCp.
    pub fn ln_k_chi(&self, t: f64) -> f64 {
        let t0 = REFERENCE_TEMPERATURE;
        -self.drg / (GAS_CONSTANT * t0) + self.drcp / GAS_CONSTANT * (t / t0).ln()
            - (self.drh - t0 * self.drcp) / GAS_CONSTANT * (t0 - t) / (t * t0)
    }

    /// log10 of the pressure-based equilibrium constant, evaluated in log space.
    pub fn lg_kp(&self, t: f64) -> f64 {
        let ln_kp = self.ln_k_chi(t) + self.nur * (STANDARD_PRESSURE / GAS_CONSTANT / t).ln();
        ln_kp / std::f64::consts::LN_10
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ApproxEq;

    #[test]
    fn test_parse_fractional_coefficients() {
        let r = Reaction::parse("Fe/Fe(OH)2", "Fe + H2O + 1/2O2 <=> Fe(OH)2").unwrap();
        assert_eq!(r.reactants.len(), 3);
        assert_eq!(r.products.len(), 1);
        assert_eq!(r.reactants[2], Term { coeff: 0.5, formula: "O2".into() });
        assert_eq!(r.net_coefficient("O2"), -0.5);
        assert_eq!(r.net_coefficient("H2O"), -1.0);
        assert_eq!(r.net_coefficient("Fe(OH)2"), 1.0);
        assert_eq!(r.net_coefficient("CO2"), 0.0);
    }

    #[test]
    fn test_parse_hydrate_formula_and_extra_whitespace() {
        let r = Reaction::parse("FeSO4.7H2O/FeS", "FeSO4.7H2O  <=> FeS + 7H2O + 2O2").unwrap();
        assert_eq!(r.reactants[0].formula, "FeSO4.7H2O");
        assert_eq!(r.net_coefficient("H2O"), 7.0);
        assert_eq!(r.net_coefficient("O2"), 2.0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Reaction::parse("x", "Fe + O2 -> FeO"),
            Err(ChemistryError::Parse { .. })
        ));
        assert!(matches!(
            Reaction::parse("x", "Fe + 1/0O2 <=> FeO"),
            Err(ChemistryError::Parse { .. })
        ));
        assert!(matches!(
            Reaction::parse("x", "Fe + <=> FeO"),
            Err(ChemistryError::Parse { .. })
        ));
        assert_eq!(
            Reaction::parse("x", "Fe + Xe <=> FeXe").unwrap_err(),
            ChemistryError::UnknownSubstance("Xe".into())
        );
    }

    #[test]
    fn test_thermo_of_magnetite_formation() {
        let r = Reaction::parse("Fe/Fe3O4", "3Fe + 2O2 <=> Fe3O4").unwrap();
        let t = r.thermo().unwrap();
        assert!(t.drg.approx_eq(&-1_015_460.0));
        assert!(t.drh.approx_eq(&-1_118_400.0));
        assert!(t.drcp.approx_eq(&(143.4 - 3.0 * 25.1 - 2.0 * 29.4)));
        assert_eq!(t.nur, -2.0);
    }

    #[test]
    fn test_lg_kp_at_reference_temperature() {
        let r = Reaction::parse("Fe2O3/FeO(OH)", "Fe2O3 + H2O <=> 2FeO(OH)").unwrap();
        let t = r.thermo().unwrap();
        let expected = (t.k_chi_298().ln()
            + t.nur * (STANDARD_PRESSURE / GAS_CONSTANT / REFERENCE_TEMPERATURE).ln())
            / std::f64::consts::LN_10;
        assert!(t.lg_kp(REFERENCE_TEMPERATURE).approx_eq(&expected));
    }

    #[test]
    fn test_lg_kp_grows_on_cooling_for_oxidation() {
        let r = Reaction::parse("Fe/Fe3O4", "3Fe + 2O2 <=> Fe3O4").unwrap();
        let thermo = r.thermo().unwrap();
        let cold = thermo.lg_kp(258.15);
        assert!(cold.is_finite());
        assert!(cold > thermo.lg_kp(373.15));
    }

    #[test]
    fn test_boundary_line_slopes_and_intercept_terms() {
        let r = Reaction::parse("FeCO3/H2S/FeS", "FeCO3 + H2S <=> FeS + H2O + CO2").unwrap();
        let line = r.boundary_line().unwrap();
        assert!(line.is_vertical());
        match line.intercept() {
            Intercept::Equilibrium {
                sulfur,
                nitrogen,
                co2,
                ..
            } => {
                assert_eq!(*sulfur, -1.0);
                assert_eq!(*nitrogen, 0.0);
                assert_eq!(*co2, 1.0);
            }
            other => panic!("unexpected intercept {:?}", other),
        }
    }

    #[test]
    fn test_reaction_without_water_or_oxygen_is_degenerate() {
        let r = Reaction::parse("Fe2O3/SO3/Fe2(SO4)3", "Fe2O3 + 3SO3 <=> Fe2(SO4)3").unwrap();
        assert!(matches!(
            r.boundary_line(),
            Err(ChemistryError::Diagram(crate::diagram::DiagramError::DegenerateLine(_)))
        ));
    }
}
