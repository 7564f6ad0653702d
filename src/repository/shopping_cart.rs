use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::shopping_cart::NewShoppingCartEntry as DomainNewShoppingCartEntry;
use crate::domain::shopping_list::CartIngredient;
use crate::models::shopping_cart::NewShoppingCartEntry as DbNewShoppingCartEntry;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ShoppingCartReader, ShoppingCartWriter};

impl ShoppingCartReader for DieselRepository {
    fn carted_recipe_ids(
        &self,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> RepositoryResult<HashSet<i32>> {
        use crate::schema::shopping_carts;

        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut conn = self.conn()?;
        let ids = shopping_carts::table
            .filter(shopping_carts::user_id.eq(user_id))
            .filter(shopping_carts::recipe_id.eq_any(recipe_ids))
            .select(shopping_carts::recipe_id)
            .load::<i32>(&mut conn)?;

        Ok(ids.into_iter().collect())
    }

    fn list_cart_ingredients(&self, user_id: i32) -> RepositoryResult<Vec<CartIngredient>> {
        use crate::schema::{ingredients, recipe_ingredients, shopping_carts};

        let mut conn = self.conn()?;

        let carted = shopping_carts::table
            .filter(shopping_carts::user_id.eq(user_id))
            .select(shopping_carts::recipe_id);

        let rows = recipe_ingredients::table
            .inner_join(ingredients::table)
            .filter(recipe_ingredients::recipe_id.eq_any(carted))
            .order(recipe_ingredients::id.asc())
            .select((
                recipe_ingredients::recipe_id,
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ))
            .load::<(i32, String, String, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(recipe_id, name, measurement_unit, amount)| {
                CartIngredient::new(recipe_id, name, measurement_unit, amount)
            })
            .collect())
    }
}

impl ShoppingCartWriter for DieselRepository {
    fn add_to_shopping_cart(&self, entry: &DomainNewShoppingCartEntry) -> RepositoryResult<()> {
        use crate::schema::shopping_carts;

        let mut conn = self.conn()?;
        diesel::insert_into(shopping_carts::table)
            .values(&DbNewShoppingCartEntry::from(entry))
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove_from_shopping_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<bool> {
        use crate::schema::shopping_carts;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            shopping_carts::table
                .filter(shopping_carts::user_id.eq(user_id))
                .filter(shopping_carts::recipe_id.eq(recipe_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
