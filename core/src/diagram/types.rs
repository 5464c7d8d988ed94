use super::DiagramError;
use crate::chemistry::ReactionThermo;
use crate::geometry::LineCoeffs;
use serde::{Deserialize, Serialize};

use super::rules::Rule;

/// Environmental parameters a diagram is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Total sulphur concentration [mM]
    pub sulfur: f64,
    /// Total nitrogen concentration [mM]
    pub nitrogen: f64,
    /// Activity of CO2 [mM]
    pub co2: f64,
    /// Temperature [K]
    pub temperature: f64,
}

impl Composition {
    pub fn new(sulfur: f64, nitrogen: f64, co2: f64, temperature: f64) -> Self {
        Self {
            sulfur,
            nitrogen,
            co2,
            temperature,
        }
    }

    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Sulfur => self.sulfur,
            Component::Nitrogen => self.nitrogen,
            Component::Co2 => self.co2,
            Component::Temperature => self.temperature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Sulfur,
    Nitrogen,
    Co2,
    Temperature,
}

/// Rectangle in the two free log-activity coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn area(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }

    pub fn contains_x(&self, x: f64) -> bool {
        self.x_min <= x && x <= self.x_max
    }

    pub fn contains_y(&self, y: f64) -> bool {
        self.y_min <= y && y <= self.y_max
    }

    pub fn corners(&self) -> [[f64; 2]; 4] {
        [
            [self.x_min, self.y_min],
            [self.x_max, self.y_min],
            [self.x_max, self.y_max],
            [self.x_min, self.y_max],
        ]
    }
}

impl Default for Bounds {
    /// lgH2O in [-20, 2], lgO2 in [-120, 2].
    fn default() -> Self {
        Self::new(-20.0, 2.0, -120.0, 2.0)
    }
}

/// The composition-dependent term `a(P)` of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intercept {
    Constant(f64),
    /// `-lgKp(T) + sulfur*log10(S) + nitrogen*log10(N) + co2*log10(C)`
    Equilibrium {
        thermo: ReactionThermo,
        sulfur: f64,
        nitrogen: f64,
        co2: f64,
    },
}

impl Intercept {
    pub fn eval(&self, p: &Composition) -> f64 {
        match self {
            Intercept::Constant(a) => *a,
            Intercept::Equilibrium {
                thermo,
                sulfur,
                nitrogen,
                co2,
            } => {
                let mut a = -thermo.lg_kp(p.temperature);
                // Zero coefficients skip the log so a zero activity cannot poison the sum.
                if *sulfur != 0.0 {
                    a += sulfur * p.sulfur.log10();
                }
                if *nitrogen != 0.0 {
                    a += nitrogen * p.nitrogen.log10();
                }
                if *co2 != 0.0 {
                    a += co2 * p.co2.log10();
                }
                a
            }
        }
    }
}

/// Restricts a line to compositions with `min <= P[component] <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityGate {
    pub component: Component,
    pub min: f64,
    pub max: f64,
}

impl ActivityGate {
    pub fn admits(&self, p: &Composition) -> bool {
        let v = p.get(self.component);
        self.min <= v && v <= self.max
    }
}

/// A boundary between stability regions: `a(P) + b*x + c*y = 0`.
///
/// Only the intercept depends on the composition; the slopes are fixed, so
/// the vertical/horizontal flags are structural. The key doubles as the name
/// source for the regions the line bounds (`"A/B/C"` separates A, B and C).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryLine {
    key: String,
    intercept: Intercept,
    slope_x: f64,
    slope_y: f64,
    rules: Vec<Rule>,
    gate: Option<ActivityGate>,
}

impl BoundaryLine {
    pub fn new(
        key: impl Into<String>,
        intercept: Intercept,
        slope_x: f64,
        slope_y: f64,
    ) -> Result<Self, DiagramError> {
        let key = key.into();
        if slope_x == 0.0 && slope_y == 0.0 {
            return Err(DiagramError::DegenerateLine(key));
        }
        Ok(Self {
            key,
            intercept,
            slope_x,
            slope_y,
            rules: Vec::new(),
            gate: None,
        })
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_gate(mut self, gate: ActivityGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn intercept(&self) -> &Intercept {
        &self.intercept
    }

    pub fn coeffs(&self, p: &Composition) -> LineCoeffs {
        LineCoeffs::new(self.intercept.eval(p), self.slope_x, self.slope_y)
    }

    /// y on the line at `x`. Not defined for vertical lines.
    pub fn y_of_x(&self, x: f64, p: &Composition) -> f64 {
        -(self.intercept.eval(p) + self.slope_x * x) / self.slope_y
    }

    /// x on the line at `y`. Not defined for horizontal lines.
    pub fn x_of_y(&self, y: f64, p: &Composition) -> f64 {
        -(self.intercept.eval(p) + self.slope_y * y) / self.slope_x
    }

    pub fn is_vertical(&self) -> bool {
        self.slope_y == 0.0
    }

    pub fn is_horizontal(&self) -> bool {
        self.slope_x == 0.0
    }

    /// Whether the line takes part in the arrangement for this composition.
    pub fn is_active(&self, p: &Composition) -> bool {
        self.gate.map_or(true, |g| g.admits(p))
    }
}

/// Phase tokens of a line key: `"Fe/CO2/FeCO3"` carries `Fe`, `CO2` and `FeCO3`.
pub fn key_tokens(key: &str) -> impl Iterator<Item = &str> {
    key.split('/')
}
