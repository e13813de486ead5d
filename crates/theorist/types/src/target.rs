//! Named irrational constants a run's convergence can be compared against.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetConstant {
    /// Golden ratio.
    Phi,
    Sqrt2,
    /// Real root of x³ = x + 1.
    Plastic,
    Silver,
}

impl TargetConstant {
    pub const ALL: [TargetConstant; 4] = [Self::Phi, Self::Sqrt2, Self::Plastic, Self::Silver];

    /// Look a constant up by name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "phi" => Some(Self::Phi),
            "sqrt2" => Some(Self::Sqrt2),
            "plastic" => Some(Self::Plastic),
            "silver" => Some(Self::Silver),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Phi => "phi",
            Self::Sqrt2 => "sqrt2",
            Self::Plastic => "plastic",
            Self::Silver => "silver",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Phi => (1.0 + 5.0_f64.sqrt()) / 2.0,
            Self::Sqrt2 => std::f64::consts::SQRT_2,
            Self::Plastic => 1.324_717_957_244_746,
            // Kept as the simulator's historical approximation.
            Self::Silver => 1.414_213_562_373_095_1,
        }
    }
}

impl std::fmt::Display for TargetConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
