use crate::pagination::Pagination;

/// Payload subscribing `user_id` to the recipes of `author_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewSubscription {
    pub user_id: i32,
    pub author_id: i32,
}

impl NewSubscription {
    pub fn new(user_id: i32, author_id: i32) -> Self {
        Self { user_id, author_id }
    }

    /// Users cannot follow themselves.
    pub fn is_self_subscription(&self) -> bool {
        self.user_id == self.author_id
    }
}

/// Query definition used to list the authors a user follows.
#[derive(Debug, Clone)]
pub struct SubscriptionListQuery {
    pub user_id: i32,
    pub pagination: Option<Pagination>,
}

impl SubscriptionListQuery {
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            pagination: None,
        }
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}
