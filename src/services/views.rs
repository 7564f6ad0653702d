//! Requester-aware JSON projections of users and recipes.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::recipe::{Recipe, RecipeIngredient};
use crate::domain::tag::Tag;
use crate::domain::user::{Requester, User};
use crate::repository::{FavoriteReader, ShoppingCartReader, SubscriptionReader, UserReader};
use crate::services::ServiceResult;

/// Repository capabilities needed to fill in projection flags and authors.
pub trait ProjectionReader:
    UserReader + FavoriteReader + ShoppingCartReader + SubscriptionReader
{
}

impl<T> ProjectionReader for T where
    T: UserReader + FavoriteReader + ShoppingCartReader + SubscriptionReader + ?Sized
{
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the requester follows this user.
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecipeIngredientView {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecipeView {
    pub id: i32,
    pub tags: Vec<Tag>,
    pub author: UserView,
    pub ingredients: Vec<RecipeIngredientView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

/// Compact recipe card returned by the toggles and nested in author views.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecipeShortView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthorView {
    #[serde(flatten)]
    pub user: UserView,
    pub recipes: Vec<RecipeShortView>,
    pub recipes_count: usize,
}

/// Relations of the requester to the recipes and authors being projected.
///
/// Empty for anonymous requesters, so every flag reads `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequesterLookups {
    pub favorited: HashSet<i32>,
    pub in_shopping_cart: HashSet<i32>,
    pub subscribed: HashSet<i32>,
}

impl RequesterLookups {
    pub fn load<R>(
        repo: &R,
        requester: &Requester,
        recipe_ids: &[i32],
        author_ids: &[i32],
    ) -> ServiceResult<Self>
    where
        R: FavoriteReader + ShoppingCartReader + SubscriptionReader + ?Sized,
    {
        let Some(user_id) = requester.user_id() else {
            return Ok(Self::default());
        };

        let favorited = if recipe_ids.is_empty() {
            HashSet::new()
        } else {
            repo.favorited_recipe_ids(user_id, recipe_ids)?
        };
        let in_shopping_cart = if recipe_ids.is_empty() {
            HashSet::new()
        } else {
            repo.carted_recipe_ids(user_id, recipe_ids)?
        };
        let subscribed = if author_ids.is_empty() {
            HashSet::new()
        } else {
            repo.subscribed_author_ids(user_id, author_ids)?
        };

        Ok(Self {
            favorited,
            in_shopping_cart,
            subscribed,
        })
    }
}

pub fn user_view(user: &User, lookups: &RequesterLookups) -> UserView {
    UserView {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        is_subscribed: lookups.subscribed.contains(&user.id),
    }
}

fn recipe_ingredient_view(ingredient: RecipeIngredient) -> RecipeIngredientView {
    RecipeIngredientView {
        id: ingredient.ingredient_id,
        name: ingredient.name,
        measurement_unit: ingredient.measurement_unit,
        amount: ingredient.amount,
    }
}

pub fn recipe_view(recipe: Recipe, author: &User, lookups: &RequesterLookups) -> RecipeView {
    RecipeView {
        id: recipe.id,
        tags: recipe.tags,
        author: user_view(author, lookups),
        ingredients: recipe
            .ingredients
            .into_iter()
            .map(recipe_ingredient_view)
            .collect(),
        is_favorited: lookups.favorited.contains(&recipe.id),
        is_in_shopping_cart: lookups.in_shopping_cart.contains(&recipe.id),
        name: recipe.name,
        image: recipe.image,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
    }
}

pub fn recipe_short_view(recipe: &Recipe) -> RecipeShortView {
    RecipeShortView {
        id: recipe.id,
        name: recipe.name.clone(),
        image: recipe.image.clone(),
        cooking_time: recipe.cooking_time,
    }
}

pub fn author_view(
    author: &User,
    recipes: &[Recipe],
    recipes_count: usize,
    lookups: &RequesterLookups,
) -> AuthorView {
    AuthorView {
        user: user_view(author, lookups),
        recipes: recipes.iter().map(recipe_short_view).collect(),
        recipes_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{sample_recipe, sample_user};

    #[test]
    fn anonymous_lookups_leave_every_flag_false() {
        let recipe = sample_recipe(5, 2, "Borscht");
        let author = sample_user(2, "chef");

        let view = recipe_view(recipe, &author, &RequesterLookups::default());

        assert!(!view.is_favorited);
        assert!(!view.is_in_shopping_cart);
        assert!(!view.author.is_subscribed);
        assert_eq!(view.author.username, "chef");
    }

    #[test]
    fn recipe_view_reflects_lookups_and_keeps_ingredient_order() {
        let recipe = sample_recipe(5, 2, "Borscht");
        let author = sample_user(2, "chef");
        let lookups = RequesterLookups {
            favorited: HashSet::from([5]),
            in_shopping_cart: HashSet::new(),
            subscribed: HashSet::from([2]),
        };

        let view = recipe_view(recipe, &author, &lookups);

        assert!(view.is_favorited);
        assert!(!view.is_in_shopping_cart);
        assert!(view.author.is_subscribed);
        let ids: Vec<i32> = view.ingredients.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn author_view_flattens_user_fields() {
        let author = sample_user(2, "chef");
        let recipes = vec![sample_recipe(5, 2, "Borscht")];

        let view = author_view(&author, &recipes, 3, &RequesterLookups::default());
        let value = serde_json::to_value(&view).expect("serialization should succeed");

        assert_eq!(value["username"], "chef");
        assert_eq!(value["recipes_count"], 3);
        assert_eq!(value["is_subscribed"], false);
        assert_eq!(value["recipes"][0]["name"], "Borscht");
        assert!(value["recipes"][0].get("text").is_none());
    }
}
