use diesel::prelude::*;

use crate::domain::favorite::NewFavorite as DomainNewFavorite;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavorite {
    pub user_id: i32,
    pub recipe_id: i32,
}

impl From<&DomainNewFavorite> for NewFavorite {
    fn from(value: &DomainNewFavorite) -> Self {
        Self {
            user_id: value.user_id,
            recipe_id: value.recipe_id,
        }
    }
}
