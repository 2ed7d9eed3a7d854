//! The caller-supplied land-use types table.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the type every table must contain; used when a cell has no match.
pub const DEFAULT_TYPE_NAME: &str = "Residential";

/// Errors raised when validating a types table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesError {
    #[error("Types table is empty")]
    Empty,

    #[error("Types table contains '{0}' more than once")]
    DuplicateName(String),

    #[error("Types table must contain an entry named 'Residential'")]
    MissingDefault,

    #[error("Invalid color '{color}' for type '{name}': expected #RRGGBB or #RGB")]
    InvalidColor { name: String, color: String },

    #[error("Invalid height {height} for type '{name}': must be a finite number")]
    InvalidHeight { name: String, height: f64 },
}

/// A named land-use type and its rendering attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanduseType {
    /// Unique key, e.g. "Residential" or "Light Industrial"
    pub name: String,
    /// Hex color, e.g. "#002DD5"
    pub color: String,
    /// Extrusion height in rendering units
    pub height: f64,
    /// Whether users may edit cells of this type
    pub interactive: bool,
}

impl LanduseType {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        height: f64,
        interactive: bool,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            height,
            interactive,
        }
    }

    /// The color as `[r, g, b]`.
    pub fn rgb(&self) -> Result<[u8; 3], TypesError> {
        parse_hex_color(&self.color).ok_or_else(|| TypesError::InvalidColor {
            name: self.name.clone(),
            color: self.color.clone(),
        })
    }
}

/// Parses `#RRGGBB` or `#RGB` (leading `#` optional, case-insensitive).
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            let mut out = [0u8; 3];
            for (slot, c) in out.iter_mut().zip(digits.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 16 + v;
            }
            Some(out)
        }
        _ => None,
    }
}

/// An ordered, validated sequence of land-use types.
///
/// Guaranteed non-empty, with unique names, parsable colors, finite heights,
/// and an entry named [`DEFAULT_TYPE_NAME`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypesTable {
    types: Vec<LanduseType>,
    default_index: usize,
}

impl TypesTable {
    /// Validates and wraps a list of types, preserving order.
    pub fn new(types: Vec<LanduseType>) -> Result<Self, TypesError> {
        if types.is_empty() {
            return Err(TypesError::Empty);
        }

        let mut seen = HashSet::new();
        for t in &types {
            if !seen.insert(t.name.as_str()) {
                return Err(TypesError::DuplicateName(t.name.clone()));
            }
            t.rgb()?;
            if !t.height.is_finite() {
                return Err(TypesError::InvalidHeight {
                    name: t.name.clone(),
                    height: t.height,
                });
            }
        }

        let default_index = types
            .iter()
            .position(|t| t.name == DEFAULT_TYPE_NAME)
            .ok_or(TypesError::MissingDefault)?;

        Ok(Self {
            types,
            default_index,
        })
    }

    /// The built-in CityScope table covering every classifier category.
    pub fn cityscope() -> Self {
        let types = vec![
            LanduseType::new("Campus", "#8E44AD", 40.0, true),
            LanduseType::new("Industrial", "#F5A623", 30.0, true),
            LanduseType::new("Institutional", "#7ED321", 40.0, true),
            LanduseType::new("Light Industrial", "#F8E71C", 20.0, true),
            LanduseType::new("Office", "#E43F0F", 80.0, true),
            LanduseType::new("Park", "#4CAF50", 0.0, true),
            LanduseType::new("Parking", "#9B9B9B", 5.0, true),
            LanduseType::new("Residential", "#002DD5", 50.0, true),
            LanduseType::new("Retail", "#F51476", 30.0, true),
        ];
        Self {
            types,
            default_index: 7,
        }
    }

    pub fn get(&self, name: &str) -> Option<&LanduseType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// The "Residential" fallback type.
    pub fn default_type(&self) -> &LanduseType {
        &self.types[self.default_index]
    }

    /// Draws a type uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &LanduseType {
        // Non-empty by construction
        self.types
            .choose(rng)
            .unwrap_or_else(|| self.default_type())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanduseType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn as_slice(&self) -> &[LanduseType] {
        &self.types
    }
}

impl Default for TypesTable {
    fn default() -> Self {
        Self::cityscope()
    }
}

impl TryFrom<Vec<LanduseType>> for TypesTable {
    type Error = TypesError;

    fn try_from(types: Vec<LanduseType>) -> Result<Self, Self::Error> {
        Self::new(types)
    }
}
