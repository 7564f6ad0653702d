use diesel::prelude::*;

use crate::domain::ingredient::{
    Ingredient as DomainIngredient, IngredientListQuery, NewIngredient as DomainNewIngredient,
};
use crate::models::ingredient::{Ingredient as DbIngredient, NewIngredient as DbNewIngredient};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, IngredientReader, IngredientWriter};

impl IngredientReader for DieselRepository {
    fn list_ingredients(
        &self,
        query: IngredientListQuery,
    ) -> RepositoryResult<Vec<DomainIngredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let prefix = query
            .name_prefix
            .as_deref()
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty());

        let mut items = ingredients::table.into_boxed::<diesel::sqlite::Sqlite>();

        // SQLite folds case in LIKE for ASCII only; other prefixes are matched below.
        if let Some(prefix) = prefix
            && prefix.is_ascii()
        {
            let pattern = format!("{}%", escape_like(prefix));
            items = items.filter(ingredients::name.like(pattern).escape('\\'));
        }

        let mut db_ingredients = items
            .order((ingredients::name.asc(), ingredients::measurement_unit.asc()))
            .load::<DbIngredient>(&mut conn)?;

        if let Some(prefix) = prefix
            && !prefix.is_ascii()
        {
            let prefix = prefix.to_lowercase();
            db_ingredients.retain(|ingredient| ingredient.name.to_lowercase().starts_with(&prefix));
        }

        Ok(db_ingredients.into_iter().map(Into::into).collect())
    }

    fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<DomainIngredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;
        let ingredient = ingredients::table
            .filter(ingredients::id.eq(id))
            .first::<DbIngredient>(&mut conn)
            .optional()?;

        Ok(ingredient.map(Into::into))
    }

    fn list_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<DomainIngredient>> {
        use crate::schema::ingredients;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let db_ingredients = ingredients::table
            .filter(ingredients::id.eq_any(ids))
            .order(ingredients::id.asc())
            .load::<DbIngredient>(&mut conn)?;

        Ok(db_ingredients.into_iter().map(Into::into).collect())
    }
}

impl IngredientWriter for DieselRepository {
    fn create_ingredients(
        &self,
        new_ingredients: &[DomainNewIngredient],
    ) -> RepositoryResult<usize> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut inserted = 0;
            for new_ingredient in new_ingredients {
                inserted += diesel::insert_or_ignore_into(ingredients::table)
                    .values(DbNewIngredient::from(new_ingredient))
                    .execute(conn)?;
            }
            Ok(inserted)
        })
    }
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
