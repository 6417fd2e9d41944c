//! Rule-triggered agronomic advisories.

/// Identifier of the rule that produced an advisory.
///
/// Variants are declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvisoryRule {
    NitrogenLow,
    PhosphorusLow,
    PotassiumLow,
    SoilAcidic,
    SoilAlkaline,
    OrganicMatterLow,
    Balanced,
}

impl AdvisoryRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NitrogenLow => "nitrogen_low",
            Self::PhosphorusLow => "phosphorus_low",
            Self::PotassiumLow => "potassium_low",
            Self::SoilAcidic => "soil_acidic",
            Self::SoilAlkaline => "soil_alkaline",
            Self::OrganicMatterLow => "organic_matter_low",
            Self::Balanced => "balanced",
        }
    }

    /// Fixed recommendation text for the rule.
    pub fn text(&self) -> &'static str {
        match self {
            Self::NitrogenLow => "Nitrogen low: add urea or organic manure (apply split doses).",
            Self::PhosphorusLow => "Phosphorus low: apply single super phosphate as basal.",
            Self::PotassiumLow => "Potassium low: apply muriate of potash as per crop stage.",
            Self::SoilAcidic => "Soil acidic: apply lime (dose as per lab test).",
            Self::SoilAlkaline => "Soil alkaline: consider gypsum and organic matter.",
            Self::OrganicMatterLow => "Add compost/green manure to improve organic matter.",
            Self::Balanced => "Soil appears balanced: maintain with crop rotation and compost.",
        }
    }
}

/// A rule identifier paired with its human-readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub rule: AdvisoryRule,
    pub text: &'static str,
}

impl From<AdvisoryRule> for Advisory {
    fn from(rule: AdvisoryRule) -> Self {
        Self {
            rule,
            text: rule.text(),
        }
    }
}
