use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recipe::{
    IngredientAmount, NewRecipe as DomainNewRecipe, Recipe as DomainRecipe,
    RecipeIngredient as DomainRecipeIngredient, UpdateRecipe as DomainUpdateRecipe,
};
use crate::domain::tag::Tag as DomainTag;
use crate::models::ingredient::Ingredient;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::recipes,
    belongs_to(super::user::User, foreign_key = author_id)
)]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub pub_date: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub author_id: i32,
    pub name: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
    pub image: &'a str,
}

/// Author and publish date are fixed at creation and never part of an update.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct UpdateRecipe<'a> {
    pub name: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
    pub image: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::recipe_tags,
    belongs_to(Recipe, foreign_key = recipe_id),
    belongs_to(super::tag::Tag, foreign_key = tag_id)
)]
pub struct RecipeTag {
    pub id: i32,
    pub recipe_id: i32,
    pub tag_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_tags)]
pub struct NewRecipeTag {
    pub recipe_id: i32,
    pub tag_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::recipe_ingredients,
    belongs_to(Recipe, foreign_key = recipe_id),
    belongs_to(super::ingredient::Ingredient, foreign_key = ingredient_id)
)]
pub struct RecipeIngredient {
    pub id: i32,
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub amount: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub amount: i32,
}

impl NewRecipeIngredient {
    pub fn from_domain(recipe_id: i32, value: &IngredientAmount) -> Self {
        Self {
            recipe_id,
            ingredient_id: value.ingredient_id,
            amount: value.amount,
        }
    }
}

impl From<(RecipeIngredient, Ingredient)> for DomainRecipeIngredient {
    fn from((row, ingredient): (RecipeIngredient, Ingredient)) -> Self {
        Self {
            ingredient_id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
            amount: row.amount,
        }
    }
}

impl From<(Recipe, Vec<DomainTag>, Vec<DomainRecipeIngredient>)> for DomainRecipe {
    fn from(
        (recipe, tags, ingredients): (Recipe, Vec<DomainTag>, Vec<DomainRecipeIngredient>),
    ) -> Self {
        Self {
            id: recipe.id,
            author_id: recipe.author_id,
            name: recipe.name,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            image: recipe.image,
            pub_date: recipe.pub_date,
            tags,
            ingredients,
        }
    }
}

impl<'a> From<&'a DomainNewRecipe> for NewRecipe<'a> {
    fn from(value: &'a DomainNewRecipe) -> Self {
        Self {
            author_id: value.author_id,
            name: value.name.as_str(),
            text: value.text.as_str(),
            cooking_time: value.cooking_time,
            image: value.image.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateRecipe> for UpdateRecipe<'a> {
    fn from(value: &'a DomainUpdateRecipe) -> Self {
        Self {
            name: value.name.as_str(),
            text: value.text.as_str(),
            cooking_time: value.cooking_time,
            image: value.image.as_deref(),
        }
    }
}
