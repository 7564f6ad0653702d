//! Consolidation of cart ingredients into a single shopping list.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// One recipe-ingredient row reachable from a user's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredient {
    pub recipe_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl CartIngredient {
    pub fn new(
        recipe_id: i32,
        name: impl Into<String>,
        measurement_unit: impl Into<String>,
        amount: i32,
    ) -> Self {
        Self {
            recipe_id,
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// A consolidated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub amount: i64,
    pub measurement_unit: String,
}

/// Ingredients of every recipe in a cart, grouped by name and summed.
///
/// Items are ordered alphabetically by name. Rows sharing a name but not a
/// unit are still summed without conversion; the smallest unit (by string
/// order) is reported so the outcome does not depend on row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
}

#[derive(Default)]
struct Group {
    amount: i64,
    units: Vec<String>,
}

impl ShoppingList {
    pub fn aggregate<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = CartIngredient>,
    {
        let mut groups: BTreeMap<String, Group> = BTreeMap::new();

        for row in rows {
            let group = groups.entry(row.name).or_default();
            group.amount += i64::from(row.amount);
            if !group.units.contains(&row.measurement_unit) {
                group.units.push(row.measurement_unit);
            }
        }

        let items = groups
            .into_iter()
            .map(|(name, mut group)| {
                group.units.sort();
                if group.units.len() > 1 {
                    log::warn!(
                        "Summing `{name}` across mismatched units {:?} without conversion",
                        group.units
                    );
                }
                ShoppingListItem {
                    name,
                    amount: group.amount,
                    measurement_unit: group.units.into_iter().next().unwrap_or_default(),
                }
            })
            .collect();

        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {}", self.name, self.amount, self.measurement_unit)
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}
