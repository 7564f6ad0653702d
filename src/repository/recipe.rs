use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::recipe::{
    AuthorFilter, IngredientAmount, NewRecipe as DomainNewRecipe, Recipe as DomainRecipe,
    RecipeIngredient as DomainRecipeIngredient, RecipeListQuery,
    UpdateRecipe as DomainUpdateRecipe,
};
use crate::domain::tag::Tag as DomainTag;
use crate::models::ingredient::Ingredient as DbIngredient;
use crate::models::recipe::{
    NewRecipe as DbNewRecipe, NewRecipeIngredient as DbNewRecipeIngredient,
    NewRecipeTag as DbNewRecipeTag, Recipe as DbRecipe, RecipeIngredient as DbRecipeIngredient,
    RecipeTag as DbRecipeTag, UpdateRecipe as DbUpdateRecipe,
};
use crate::models::tag::Tag as DbTag;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, RecipeReader, RecipeWriter};
use crate::schema::recipes;

impl RecipeReader for DieselRepository {
    fn get_recipe_by_id(&self, id: i32) -> RepositoryResult<Option<DomainRecipe>> {
        let mut conn = self.conn()?;
        let recipe = recipes::table
            .filter(recipes::id.eq(id))
            .first::<DbRecipe>(&mut conn)
            .optional()?;

        let Some(recipe) = recipe else {
            return Ok(None);
        };

        Ok(Some(with_associations(&mut conn, recipe)?))
    }

    fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<DomainRecipe>)> {
        let mut conn = self.conn()?;

        let total = filtered_recipes(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_recipes(&query).order((recipes::pub_date.desc(), recipes::id.desc()));

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_recipes = items.load::<DbRecipe>(&mut conn)?;
        if db_recipes.is_empty() {
            return Ok((total, Vec::new()));
        }

        let recipe_ids: Vec<i32> = db_recipes.iter().map(|recipe| recipe.id).collect();
        let mut tags_by_recipe = load_tags_for_recipes(&mut conn, &recipe_ids)?;
        let mut ingredients_by_recipe = load_ingredients_for_recipes(&mut conn, &recipe_ids)?;

        let recipes = db_recipes
            .into_iter()
            .map(|recipe| {
                let tags = tags_by_recipe.remove(&recipe.id).unwrap_or_default();
                let ingredients = ingredients_by_recipe.remove(&recipe.id).unwrap_or_default();
                DomainRecipe::from((recipe, tags, ingredients))
            })
            .collect();

        Ok((total, recipes))
    }
}

impl RecipeWriter for DieselRepository {
    fn create_recipe(&self, new_recipe: &DomainNewRecipe) -> RepositoryResult<DomainRecipe> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainRecipe, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(recipes::table)
                .values(&DbNewRecipe::from(new_recipe))
                .get_result::<DbRecipe>(conn)?;

            insert_associations(conn, created.id, &new_recipe.tag_ids, &new_recipe.ingredients)?;

            with_associations(conn, created)
        })
    }

    fn update_recipe(
        &self,
        recipe_id: i32,
        updates: &DomainUpdateRecipe,
    ) -> RepositoryResult<DomainRecipe> {
        use crate::schema::{recipe_ingredients, recipe_tags};

        let mut conn = self.conn()?;

        conn.transaction::<DomainRecipe, RepositoryError, _>(|conn| {
            let updated = diesel::update(recipes::table.filter(recipes::id.eq(recipe_id)))
                .set(&DbUpdateRecipe::from(updates))
                .get_result::<DbRecipe>(conn)?;

            diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
                .execute(conn)?;
            diesel::delete(
                recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
            )
            .execute(conn)?;

            insert_associations(conn, recipe_id, &updates.tag_ids, &updates.ingredients)?;

            with_associations(conn, updated)
        })
    }

    fn delete_recipe(&self, recipe_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(recipes::table.filter(recipes::id.eq(recipe_id))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Recipes matching every filter of `query`, unordered and unpaginated.
fn filtered_recipes(query: &RecipeListQuery) -> recipes::BoxedQuery<'static, Sqlite> {
    use crate::schema::{favorites, recipe_tags, shopping_carts, tags, users};

    let mut items = recipes::table.into_boxed::<Sqlite>();

    match &query.author {
        Some(AuthorFilter::Id(author_id)) => {
            items = items.filter(recipes::author_id.eq(*author_id));
        }
        Some(AuthorFilter::Username(username)) => {
            let authors = users::table
                .filter(users::username.eq(username.clone()))
                .select(users::id);
            items = items.filter(recipes::author_id.eq_any(authors));
        }
        None => {}
    }

    if !query.tags.is_empty() {
        let tagged = recipe_tags::table
            .inner_join(tags::table)
            .filter(tags::slug.eq_any(query.tags.clone()))
            .select(recipe_tags::recipe_id);
        items = items.filter(recipes::id.eq_any(tagged));
    }

    if let Some((user_id, wanted)) = query.effective_favorited() {
        let favorited = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .select(favorites::recipe_id);
        items = if wanted {
            items.filter(recipes::id.eq_any(favorited))
        } else {
            items.filter(recipes::id.ne_all(favorited))
        };
    }

    if let Some((user_id, wanted)) = query.effective_in_shopping_cart() {
        let carted = shopping_carts::table
            .filter(shopping_carts::user_id.eq(user_id))
            .select(shopping_carts::recipe_id);
        items = if wanted {
            items.filter(recipes::id.eq_any(carted))
        } else {
            items.filter(recipes::id.ne_all(carted))
        };
    }

    items
}

fn insert_associations(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    tag_ids: &[i32],
    ingredients: &[IngredientAmount],
) -> RepositoryResult<()> {
    use crate::schema::{recipe_ingredients, recipe_tags};

    if !tag_ids.is_empty() {
        let rows: Vec<DbNewRecipeTag> = tag_ids
            .iter()
            .map(|tag_id| DbNewRecipeTag {
                recipe_id,
                tag_id: *tag_id,
            })
            .collect();
        diesel::insert_into(recipe_tags::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !ingredients.is_empty() {
        let rows: Vec<DbNewRecipeIngredient> = ingredients
            .iter()
            .map(|ingredient| DbNewRecipeIngredient::from_domain(recipe_id, ingredient))
            .collect();
        diesel::insert_into(recipe_ingredients::table)
            .values(&rows)
            .execute(conn)?;
    }

    Ok(())
}

fn with_associations(
    conn: &mut SqliteConnection,
    recipe: DbRecipe,
) -> RepositoryResult<DomainRecipe> {
    let ids = [recipe.id];
    let tags = load_tags_for_recipes(conn, &ids)?
        .remove(&recipe.id)
        .unwrap_or_default();
    let ingredients = load_ingredients_for_recipes(conn, &ids)?
        .remove(&recipe.id)
        .unwrap_or_default();

    Ok(DomainRecipe::from((recipe, tags, ingredients)))
}

fn load_tags_for_recipes(
    conn: &mut SqliteConnection,
    recipe_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{recipe_tags, tags};

    let rows = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
        .order(recipe_tags::id.asc())
        .select((DbRecipeTag::as_select(), DbTag::as_select()))
        .load::<(DbRecipeTag, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (link, tag) in rows {
        map.entry(link.recipe_id).or_default().push(tag.into());
    }

    Ok(map)
}

fn load_ingredients_for_recipes(
    conn: &mut SqliteConnection,
    recipe_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DomainRecipeIngredient>>> {
    use crate::schema::{ingredients, recipe_ingredients};

    let rows = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .order(recipe_ingredients::id.asc())
        .select((DbRecipeIngredient::as_select(), DbIngredient::as_select()))
        .load::<(DbRecipeIngredient, DbIngredient)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainRecipeIngredient>> = HashMap::new();
    for (row, ingredient) in rows {
        map.entry(row.recipe_id)
            .or_default()
            .push(DomainRecipeIngredient::from((row, ingredient)));
    }

    Ok(map)
}
