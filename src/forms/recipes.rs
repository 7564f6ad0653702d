use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::recipe::{
    AMOUNT_MAX, AMOUNT_MIN, COOKING_TIME_MAX, COOKING_TIME_MIN, IngredientAmount,
};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a recipe name.
const NAME_MAX_LEN: usize = 200;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the recipe form helpers.
pub type RecipeFormResult<T> = Result<T, RecipeFormError>;

/// Errors that can occur while processing recipe payloads.
#[derive(Debug, Error)]
pub enum RecipeFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("recipe name cannot be empty")]
    EmptyName,
    #[error("recipe text cannot be empty")]
    EmptyText,
    /// New recipes must carry an image.
    #[error("image is required")]
    MissingImage,
    #[error("tag {id} is listed more than once")]
    DuplicateTag { id: i32 },
    #[error("ingredient {id} is listed more than once")]
    DuplicateIngredient { id: i32 },
}

/// One `{id, amount}` entry of the `ingredients` array.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientAmountForm {
    /// Catalog ingredient identifier.
    pub id: i32,
    #[validate(range(min = AMOUNT_MIN, max = AMOUNT_MAX))]
    pub amount: i32,
}

/// JSON body accepted by `POST /api/recipes` and `PATCH /api/recipes/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    /// Minutes, one minute up to a full day.
    #[validate(range(min = COOKING_TIME_MIN, max = COOKING_TIME_MAX))]
    pub cooking_time: i32,
    /// Base64 image, optionally prefixed with a `data:image/...;base64,` header.
    #[serde(default)]
    pub image: Option<String>,
    /// Tag ids in display order.
    #[validate(length(min = 1))]
    pub tags: Vec<i32>,
    #[validate(length(min = 1), nested)]
    pub ingredients: Vec<IngredientAmountForm>,
}

/// Validated and sanitized recipe payload, still carrying the raw image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePayload {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: Option<String>,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

impl RecipeForm {
    /// Validates a payload for a new recipe. The image is mandatory and is
    /// returned separately from the remaining fields.
    pub fn into_create_payload(self) -> RecipeFormResult<(RecipePayload, String)> {
        let mut payload = self.into_payload()?;
        let image = payload.image.take().ok_or(RecipeFormError::MissingImage)?;
        Ok((payload, image))
    }

    /// Validates a replacement payload. A missing image keeps the stored one.
    pub fn into_update_payload(self) -> RecipeFormResult<RecipePayload> {
        self.into_payload()
    }

    fn into_payload(self) -> RecipeFormResult<RecipePayload> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(RecipeFormError::EmptyName);
        }

        let text = sanitize_multiline_text(&self.text);
        if text.is_empty() {
            return Err(RecipeFormError::EmptyText);
        }

        let mut seen_tags = HashSet::with_capacity(self.tags.len());
        for id in &self.tags {
            if !seen_tags.insert(*id) {
                return Err(RecipeFormError::DuplicateTag { id: *id });
            }
        }

        let mut seen_ingredients = HashSet::with_capacity(self.ingredients.len());
        let mut ingredients = Vec::with_capacity(self.ingredients.len());
        for entry in &self.ingredients {
            if !seen_ingredients.insert(entry.id) {
                return Err(RecipeFormError::DuplicateIngredient { id: entry.id });
            }
            ingredients.push(IngredientAmount::new(entry.id, entry.amount));
        }

        let image = self
            .image
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(RecipePayload {
            name,
            text,
            cooking_time: self.cooking_time,
            image,
            tag_ids: self.tags,
            ingredients,
        })
    }
}
