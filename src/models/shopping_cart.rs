use diesel::prelude::*;

use crate::domain::shopping_cart::NewShoppingCartEntry as DomainNewShoppingCartEntry;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shopping_carts)]
pub struct NewShoppingCartEntry {
    pub user_id: i32,
    pub recipe_id: i32,
}

impl From<&DomainNewShoppingCartEntry> for NewShoppingCartEntry {
    fn from(value: &DomainNewShoppingCartEntry) -> Self {
        Self {
            user_id: value.user_id,
            recipe_id: value.recipe_id,
        }
    }
}
