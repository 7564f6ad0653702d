use serde::{Deserialize, Serialize};

/// Catalog entry that recipes reference with an amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    /// Unit the recipe amounts are expressed in, e.g. `g` or `ml`.
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

impl NewIngredient {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            measurement_unit: measurement_unit.into().trim().to_string(),
        }
    }
}

/// Query definition used to search the ingredient catalog.
#[derive(Debug, Clone, Default)]
pub struct IngredientListQuery {
    /// Optional case-insensitive prefix matched against the ingredient name.
    pub name_prefix: Option<String>,
}

impl IngredientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the results to names starting with `prefix`, ignoring case.
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }
}
