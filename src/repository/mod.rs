use std::collections::HashSet;

use crate::db::{DbConnection, DbPool};
use crate::domain::favorite::NewFavorite;
use crate::domain::ingredient::{Ingredient, IngredientListQuery, NewIngredient};
use crate::domain::recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe};
use crate::domain::shopping_cart::NewShoppingCartEntry;
use crate::domain::shopping_list::CartIngredient;
use crate::domain::subscription::{NewSubscription, SubscriptionListQuery};
use crate::domain::tag::{NewTag, Tag};
use crate::domain::user::{NewUser, User};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod shopping_cart;
pub mod subscription;
pub mod tag;
pub mod user;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the local user mirror.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn list_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<User>>;
    /// One page of all users ordered by id, with the total user count.
    fn list_users(&self, pagination: Pagination) -> RepositoryResult<(usize, Vec<User>)>;
}

/// Write operations over the local user mirror.
pub trait UserWriter {
    /// Insert the user or refresh its profile fields, keyed by `sub`.
    fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

pub trait TagReader {
    fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
    fn list_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
}

pub trait TagWriter {
    /// Insert tags, skipping those that clash with existing ones. Returns the number inserted.
    fn create_tags(&self, new_tags: &[NewTag]) -> RepositoryResult<usize>;
}

pub trait IngredientReader {
    fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<Ingredient>>;
    fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<Ingredient>>;
    fn list_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Ingredient>>;
}

pub trait IngredientWriter {
    /// Get-or-create on `(name, measurement_unit)`. Returns the number inserted.
    fn create_ingredients(&self, new_ingredients: &[NewIngredient]) -> RepositoryResult<usize>;
}

pub trait RecipeReader {
    fn get_recipe_by_id(&self, id: i32) -> RepositoryResult<Option<Recipe>>;
    /// Filtered recipes in publish order plus the total count before pagination.
    fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
}

pub trait RecipeWriter {
    fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
    /// Replace the recipe fields and its whole tag and ingredient sets atomically.
    fn update_recipe(&self, recipe_id: i32, updates: &UpdateRecipe) -> RepositoryResult<Recipe>;
    fn delete_recipe(&self, recipe_id: i32) -> RepositoryResult<()>;
}

pub trait FavoriteReader {
    /// Subset of `recipe_ids` the user has favorited.
    fn favorited_recipe_ids(&self, user_id: i32, recipe_ids: &[i32])
    -> RepositoryResult<HashSet<i32>>;
}

pub trait FavoriteWriter {
    /// Fails with `RepositoryError::Conflict` when the pair already exists.
    fn add_favorite(&self, favorite: &NewFavorite) -> RepositoryResult<()>;
    /// Returns whether a row was deleted.
    fn remove_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<bool>;
}

pub trait ShoppingCartReader {
    /// Subset of `recipe_ids` the user has in the shopping cart.
    fn carted_recipe_ids(&self, user_id: i32, recipe_ids: &[i32])
    -> RepositoryResult<HashSet<i32>>;
    /// Every ingredient row of every recipe in the user's cart.
    fn list_cart_ingredients(&self, user_id: i32) -> RepositoryResult<Vec<CartIngredient>>;
}

pub trait ShoppingCartWriter {
    /// Fails with `RepositoryError::Conflict` when the pair already exists.
    fn add_to_shopping_cart(&self, entry: &NewShoppingCartEntry) -> RepositoryResult<()>;
    /// Returns whether a row was deleted.
    fn remove_from_shopping_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<bool>;
}

pub trait SubscriptionReader {
    /// Subset of `author_ids` the user follows.
    fn subscribed_author_ids(&self, user_id: i32, author_ids: &[i32])
    -> RepositoryResult<HashSet<i32>>;
    fn list_subscribed_authors(
        &self,
        query: SubscriptionListQuery,
    ) -> RepositoryResult<(usize, Vec<User>)>;
}

pub trait SubscriptionWriter {
    /// Fails with `RepositoryError::Conflict` when the pair already exists.
    fn add_subscription(&self, subscription: &NewSubscription) -> RepositoryResult<()>;
    /// Returns whether a row was deleted.
    fn remove_subscription(&self, user_id: i32, author_id: i32) -> RepositoryResult<bool>;
}
