//! Helpers for integration tests.
#![allow(dead_code)]

use pushkind_recipes::db::{DbPool, establish_connection_pool, run_migrations};
use pushkind_recipes::domain::ingredient::{Ingredient, IngredientListQuery, NewIngredient};
use pushkind_recipes::domain::recipe::{IngredientAmount, NewRecipe, Recipe};
use pushkind_recipes::domain::tag::{NewTag, Tag};
use pushkind_recipes::domain::user::{NewUser, User};
use pushkind_recipes::repository::{
    DieselRepository, IngredientReader, IngredientWriter, RecipeWriter, TagReader, TagWriter,
    UserWriter,
};

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        remove_files(filename); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        remove_files(&self.filename);
    }
}

fn remove_files(filename: &str) {
    std::fs::remove_file(filename).ok();
    std::fs::remove_file(format!("{filename}-shm")).ok();
    std::fs::remove_file(format!("{filename}-wal")).ok();
}

/// Catalog shared by most scenarios.
pub struct Catalog {
    pub breakfast: Tag,
    pub lunch: Tag,
    pub dinner: Tag,
    pub flour: Ingredient,
    pub egg: Ingredient,
    pub milk: Ingredient,
}

pub fn seed_user(repo: &DieselRepository, username: &str) -> User {
    repo.upsert_user(&NewUser::new(
        format!("auth|{username}"),
        format!("{username}@example.com"),
        username,
    ))
    .expect("user upsert should succeed")
}

pub fn seed_catalog(repo: &DieselRepository) -> Catalog {
    repo.create_tags(&[
        NewTag::new("Breakfast", "#E26C2D", "breakfast"),
        NewTag::new("Lunch", "#49B64E", "lunch"),
        NewTag::new("Dinner", "#8775D2", "dinner"),
    ])
    .expect("tags should be created");
    repo.create_ingredients(&[
        NewIngredient::new("Flour", "g"),
        NewIngredient::new("Egg", "pcs"),
        NewIngredient::new("Milk", "ml"),
    ])
    .expect("ingredients should be created");

    let tags = repo.list_tags().expect("tags should load");
    let tag = |slug: &str| {
        tags.iter()
            .find(|tag| tag.slug == slug)
            .cloned()
            .expect("seeded tag")
    };
    let ingredients = repo
        .list_ingredients(IngredientListQuery::new())
        .expect("ingredients should load");
    let ingredient = |name: &str| {
        ingredients
            .iter()
            .find(|ingredient| ingredient.name == name)
            .cloned()
            .expect("seeded ingredient")
    };

    Catalog {
        breakfast: tag("breakfast"),
        lunch: tag("lunch"),
        dinner: tag("dinner"),
        flour: ingredient("Flour"),
        egg: ingredient("Egg"),
        milk: ingredient("Milk"),
    }
}

pub fn new_recipe(
    author: &User,
    name: &str,
    tags: &[&Tag],
    ingredients: &[(&Ingredient, i32)],
) -> NewRecipe {
    NewRecipe {
        author_id: author.id,
        name: name.to_string(),
        text: format!("How to make {name}."),
        cooking_time: 20,
        image: format!("/media/recipes/{name}.png"),
        tag_ids: tags.iter().map(|tag| tag.id).collect(),
        ingredients: ingredients
            .iter()
            .map(|(ingredient, amount)| IngredientAmount::new(ingredient.id, *amount))
            .collect(),
    }
}

pub fn seed_recipe(
    repo: &DieselRepository,
    author: &User,
    name: &str,
    tags: &[&Tag],
    ingredients: &[(&Ingredient, i32)],
) -> Recipe {
    repo.create_recipe(&new_recipe(author, name, tags, ingredients))
        .expect("recipe should be created")
}
