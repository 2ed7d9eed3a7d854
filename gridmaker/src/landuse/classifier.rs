//! Ordered first-match rule list mapping OSM tags to a land-use category.
//!
//! A feature can satisfy several rules at once (an `office` that is also
//! tagged `residential`), so the rule order is the priority contract.

use std::collections::BTreeMap;

use super::LanduseCategory;

/// Free-form OSM tag mapping.
pub type Tags = BTreeMap<String, String>;

/// A single test against a feature's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPredicate {
    /// `key=value`
    Equals(&'static str, &'static str),
    /// `key` is one of the listed values
    OneOf(&'static str, &'static [&'static str]),
    /// `key` is present with any value
    Has(&'static str),
}

impl TagPredicate {
    /// Evaluates the predicate against a tag mapping.
    pub fn matches(&self, tags: &Tags) -> bool {
        match *self {
            TagPredicate::Equals(key, value) => tags.get(key).is_some_and(|v| v == value),
            TagPredicate::OneOf(key, values) => tags
                .get(key)
                .is_some_and(|v| values.contains(&v.as_str())),
            TagPredicate::Has(key) => tags.contains_key(key),
        }
    }
}

/// A category together with the predicates that select it (any may match).
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: LanduseCategory,
    pub any_of: &'static [TagPredicate],
}

impl Rule {
    pub fn matches(&self, tags: &Tags) -> bool {
        self.any_of.iter().any(|p| p.matches(tags))
    }
}

use TagPredicate::{Equals, Has, OneOf};

static RULES: [Rule; 9] = [
    Rule {
        category: LanduseCategory::Campus,
        any_of: &[OneOf("amenity", &["college", "university"])],
    },
    Rule {
        category: LanduseCategory::Industrial,
        any_of: &[
            Equals("building", "industrial"),
            Equals("landuse", "industrial"),
            Has("industrial"),
        ],
    },
    Rule {
        category: LanduseCategory::Institutional,
        any_of: &[
            Equals("office", "educational_institution"),
            Equals("tourism", "museum"),
            OneOf("amenity", &["language_school", "music_school"]),
        ],
    },
    Rule {
        category: LanduseCategory::LightIndustrial,
        any_of: &[Equals("railway", "narrow_gauge")],
    },
    Rule {
        category: LanduseCategory::Office,
        any_of: &[Equals("building", "office"), Has("office")],
    },
    Rule {
        category: LanduseCategory::Park,
        any_of: &[OneOf("leisure", &["dog_park", "park"])],
    },
    Rule {
        category: LanduseCategory::Parking,
        any_of: &[
            OneOf("amenity", &["bicycle_parking", "motorcycle_parking", "parking"]),
            Equals("building", "parking"),
        ],
    },
    Rule {
        category: LanduseCategory::Residential,
        any_of: &[
            OneOf(
                "building",
                &["detached", "semidetached_house", "dormitory", "residential"],
            ),
            Has("residential"),
            Equals("landuse", "residential"),
        ],
    },
    Rule {
        category: LanduseCategory::Retail,
        any_of: &[
            Equals("building", "retail"),
            Equals("landuse", "retail"),
            Has("shop"),
        ],
    },
];

/// The classification rules in priority order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Classifies a tag mapping. Falls through to Residential when no rule matches.
pub fn classify(tags: &Tags) -> LanduseCategory {
    RULES
        .iter()
        .find(|rule| rule.matches(tags))
        .map(|rule| rule.category)
        .unwrap_or(LanduseCategory::Residential)
}
