//! Soil readings and the resulting health score.

use super::advisory::Advisory;

/// A laboratory soil sample.
///
/// Nutrients are in mg/kg, `organic_matter` is a percentage and `ph` sits on
/// the 0-14 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilSample {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
    pub organic_matter: f64,
}

impl SoilSample {
    pub fn new(nitrogen: f64, phosphorus: f64, potassium: f64, ph: f64, organic_matter: f64) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            ph,
            organic_matter,
        }
    }
}

/// One of the readings in a [`SoilSample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    OrganicMatter,
}

impl SoilSample {
    pub fn reading(&self, reading: Reading) -> f64 {
        match reading {
            Reading::Nitrogen => self.nitrogen,
            Reading::Phosphorus => self.phosphorus,
            Reading::Potassium => self.potassium,
            Reading::Ph => self.ph,
            Reading::OrganicMatter => self.organic_matter,
        }
    }
}

/// Soil health on a 1-100 scale plus the advisories that fired for it.
///
/// `advisories` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SoilScore {
    pub score: u8,
    pub advisories: Vec<Advisory>,
}

impl SoilScore {
    /// Advisory texts in rule-evaluation order.
    pub fn advisory_texts(&self) -> Vec<String> {
        self.advisories.iter().map(|a| a.text.to_string()).collect()
    }
}
