/// Payload putting a recipe into a user's shopping cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewShoppingCartEntry {
    pub user_id: i32,
    pub recipe_id: i32,
}

impl NewShoppingCartEntry {
    pub fn new(user_id: i32, recipe_id: i32) -> Self {
        Self { user_id, recipe_id }
    }
}
