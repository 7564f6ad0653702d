use std::collections::HashSet;

use mockall::mock;

use super::{
    FavoriteReader, FavoriteWriter, IngredientReader, IngredientWriter, RecipeReader,
    RecipeWriter, ShoppingCartReader, ShoppingCartWriter, SubscriptionReader, SubscriptionWriter,
    TagReader, TagWriter, UserReader, UserWriter,
};
use crate::domain::{
    favorite::NewFavorite,
    ingredient::{Ingredient, IngredientListQuery, NewIngredient},
    recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe},
    shopping_cart::NewShoppingCartEntry,
    shopping_list::CartIngredient,
    subscription::{NewSubscription, SubscriptionListQuery},
    tag::{NewTag, Tag},
    user::{NewUser, User},
};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
        fn list_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
    }
}

mock! {
    pub IngredientReader {}

    impl IngredientReader for IngredientReader {
        fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<Ingredient>>;
        fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<Ingredient>>;
        fn list_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Ingredient>>;
    }
}

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn list_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<User>>;
        fn list_users(&self, pagination: Pagination) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Repository {
        fn upsert_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }

    impl TagReader for Repository {
        fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
        fn list_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
    }

    impl TagWriter for Repository {
        fn create_tags(&self, new_tags: &[NewTag]) -> RepositoryResult<usize>;
    }

    impl IngredientReader for Repository {
        fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<Ingredient>>;
        fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<Ingredient>>;
        fn list_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Ingredient>>;
    }

    impl IngredientWriter for Repository {
        fn create_ingredients(&self, new_ingredients: &[NewIngredient]) -> RepositoryResult<usize>;
    }

    impl RecipeReader for Repository {
        fn get_recipe_by_id(&self, id: i32) -> RepositoryResult<Option<Recipe>>;
        fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
    }

    impl RecipeWriter for Repository {
        fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
        fn update_recipe(&self, recipe_id: i32, updates: &UpdateRecipe) -> RepositoryResult<Recipe>;
        fn delete_recipe(&self, recipe_id: i32) -> RepositoryResult<()>;
    }

    impl FavoriteReader for Repository {
        fn favorited_recipe_ids(&self, user_id: i32, recipe_ids: &[i32]) -> RepositoryResult<HashSet<i32>>;
    }

    impl FavoriteWriter for Repository {
        fn add_favorite(&self, favorite: &NewFavorite) -> RepositoryResult<()>;
        fn remove_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<bool>;
    }

    impl ShoppingCartReader for Repository {
        fn carted_recipe_ids(&self, user_id: i32, recipe_ids: &[i32]) -> RepositoryResult<HashSet<i32>>;
        fn list_cart_ingredients(&self, user_id: i32) -> RepositoryResult<Vec<CartIngredient>>;
    }

    impl ShoppingCartWriter for Repository {
        fn add_to_shopping_cart(&self, entry: &NewShoppingCartEntry) -> RepositoryResult<()>;
        fn remove_from_shopping_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<bool>;
    }

    impl SubscriptionReader for Repository {
        fn subscribed_author_ids(&self, user_id: i32, author_ids: &[i32]) -> RepositoryResult<HashSet<i32>>;
        fn list_subscribed_authors(&self, query: SubscriptionListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl SubscriptionWriter for Repository {
        fn add_subscription(&self, subscription: &NewSubscription) -> RepositoryResult<()>;
        fn remove_subscription(&self, user_id: i32, author_id: i32) -> RepositoryResult<bool>;
    }
}
