use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;
use crate::pagination::Pagination;

/// Smallest accepted cooking time in minutes.
pub const COOKING_TIME_MIN: i32 = 1;
/// Largest accepted cooking time in minutes (one day).
pub const COOKING_TIME_MAX: i32 = 1440;
/// Smallest accepted ingredient amount.
pub const AMOUNT_MIN: i32 = 1;
/// Largest accepted ingredient amount.
pub const AMOUNT_MAX: i32 = 10_000;

/// Domain representation of a published recipe with its associations loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    /// Identifier of the user who published the recipe. Never changes.
    pub author_id: i32,
    pub name: String,
    /// Free-text cooking instructions.
    pub text: String,
    /// Cooking time in minutes.
    pub cooking_time: i32,
    /// Public reference of the stored image.
    pub image: String,
    /// Set once on insert.
    pub pub_date: NaiveDateTime,
    /// Tags in the order they were supplied.
    pub tags: Vec<Tag>,
    /// Ingredients in the order they were supplied.
    pub ingredients: Vec<RecipeIngredient>,
}

/// An ingredient as used by a recipe, joined with its catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Reference to a catalog ingredient together with the amount a recipe needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

impl IngredientAmount {
    pub fn new(ingredient_id: i32, amount: i32) -> Self {
        Self {
            ingredient_id,
            amount,
        }
    }
}

/// Payload required to publish a new recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Full replacement of a recipe's editable fields and associations.
///
/// Tags and ingredients replace the stored sets entirely. `image` of `None`
/// keeps the stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecipe {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: Option<String>,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// How the `author` filter identifies a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorFilter {
    Id(i32),
    Username(String),
}

impl AuthorFilter {
    /// Numeric values are treated as user ids, anything else as a username.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        match value.parse::<i32>() {
            Ok(id) => Some(AuthorFilter::Id(id)),
            Err(_) => Some(AuthorFilter::Username(value.to_string())),
        }
    }
}

/// Query definition used to filter and paginate recipes.
///
/// `is_favorited` and `is_in_shopping_cart` only apply when `requester_id` is
/// set; anonymous requests ignore them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeListQuery {
    pub requester_id: Option<i32>,
    pub author: Option<AuthorFilter>,
    /// Tag slugs, any of which must be present.
    pub tags: Vec<String>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl RecipeListQuery {
    pub fn new(requester_id: Option<i32>) -> Self {
        Self {
            requester_id,
            ..Self::default()
        }
    }

    pub fn author(mut self, author: AuthorFilter) -> Self {
        self.author = Some(author);
        self
    }

    pub fn tags<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = slugs.into_iter().map(Into::into).collect();
        self
    }

    pub fn favorited(mut self, flag: bool) -> Self {
        self.is_favorited = Some(flag);
        self
    }

    pub fn in_shopping_cart(mut self, flag: bool) -> Self {
        self.is_in_shopping_cart = Some(flag);
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// The favorites constraint that actually applies to this query.
    pub fn effective_favorited(&self) -> Option<(i32, bool)> {
        self.requester_id.zip(self.is_favorited)
    }

    /// The shopping-cart constraint that actually applies to this query.
    pub fn effective_in_shopping_cart(&self) -> Option<(i32, bool)> {
        self.requester_id.zip(self.is_in_shopping_cart)
    }
}
