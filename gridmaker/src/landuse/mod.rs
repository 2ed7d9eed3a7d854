//! Land-use categories, the caller-supplied types table, and the OSM tag
//! classifier.
//!
//! The classifier maps a free-form tag mapping to one of the fixed
//! [`LanduseCategory`] values. The types table maps category names to the
//! rendering attributes (color, height, interactivity) written onto cells.

mod category;
mod classifier;
mod table;

pub use category::LanduseCategory;
pub use classifier::{classify, rules, Rule, TagPredicate, Tags};
pub use table::{parse_hex_color, LanduseType, TypesError, TypesTable, DEFAULT_TYPE_NAME};
