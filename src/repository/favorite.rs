use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::favorite::NewFavorite as DomainNewFavorite;
use crate::models::favorite::NewFavorite as DbNewFavorite;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, FavoriteReader, FavoriteWriter};

impl FavoriteReader for DieselRepository {
    fn favorited_recipe_ids(
        &self,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> RepositoryResult<HashSet<i32>> {
        use crate::schema::favorites;

        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut conn = self.conn()?;
        let ids = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .filter(favorites::recipe_id.eq_any(recipe_ids))
            .select(favorites::recipe_id)
            .load::<i32>(&mut conn)?;

        Ok(ids.into_iter().collect())
    }
}

impl FavoriteWriter for DieselRepository {
    fn add_favorite(&self, favorite: &DomainNewFavorite) -> RepositoryResult<()> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;
        diesel::insert_into(favorites::table)
            .values(&DbNewFavorite::from(favorite))
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<bool> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::recipe_id.eq(recipe_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
