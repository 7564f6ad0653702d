use serde::{Deserialize, Serialize};

/// Category label attached to recipes, e.g. "Breakfast".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    /// Unique human-readable name.
    pub name: String,
    /// Display color as `#RRGGBB`.
    pub color: String,
    /// Unique URL-safe identifier used by the recipe filter.
    pub slug: String,
}

/// Payload required to insert a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl NewTag {
    /// Construct a new tag payload, trimming every field and upper-casing the color.
    pub fn new(name: impl Into<String>, color: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            color: color.into().trim().to_uppercase(),
            slug: slug.into().trim().to_string(),
        }
    }
}
