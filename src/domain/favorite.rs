/// Payload marking a recipe as a favorite of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewFavorite {
    pub user_id: i32,
    pub recipe_id: i32,
}

impl NewFavorite {
    pub fn new(user_id: i32, recipe_id: i32) -> Self {
        Self { user_id, recipe_id }
    }
}
