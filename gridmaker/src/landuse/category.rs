//! The fixed set of land-use categories the classifier can produce.

use std::fmt;
use std::str::FromStr;

/// A land-use category derived from OpenStreetMap tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LanduseCategory {
    Campus,
    Industrial,
    Institutional,
    LightIndustrial,
    Office,
    Park,
    Parking,
    Residential,
    Retail,
}

impl LanduseCategory {
    /// All categories in alphabetical order of their display names.
    pub const ALL: [LanduseCategory; 9] = [
        LanduseCategory::Campus,
        LanduseCategory::Industrial,
        LanduseCategory::Institutional,
        LanduseCategory::LightIndustrial,
        LanduseCategory::Office,
        LanduseCategory::Park,
        LanduseCategory::Parking,
        LanduseCategory::Residential,
        LanduseCategory::Retail,
    ];

    /// The name used to look the category up in a types table.
    pub fn name(self) -> &'static str {
        match self {
            LanduseCategory::Campus => "Campus",
            LanduseCategory::Industrial => "Industrial",
            LanduseCategory::Institutional => "Institutional",
            LanduseCategory::LightIndustrial => "Light Industrial",
            LanduseCategory::Office => "Office",
            LanduseCategory::Park => "Park",
            LanduseCategory::Parking => "Parking",
            LanduseCategory::Residential => "Residential",
            LanduseCategory::Retail => "Retail",
        }
    }
}

impl fmt::Display for LanduseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LanduseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanduseCategory::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown land-use category '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = LanduseCategory::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), LanduseCategory::ALL.len());
    }

    #[test]
    fn test_light_industrial_has_space() {
        assert_eq!(LanduseCategory::LightIndustrial.name(), "Light Industrial");
        assert_eq!(
            "light industrial".parse::<LanduseCategory>().unwrap(),
            LanduseCategory::LightIndustrial
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("Farmland".parse::<LanduseCategory>().is_err());
    }
}
