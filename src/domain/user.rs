use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthenticatedUser;

/// Local mirror of an identity known to the external auth service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    pub id: i32,
    pub sub: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub sub: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    #[must_use]
    pub fn new(
        sub: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            sub: sub.into(),
            email: email.into().to_lowercase(),
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    #[must_use]
    pub fn with_full_name(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }
}

impl From<&AuthenticatedUser> for NewUser {
    fn from(value: &AuthenticatedUser) -> Self {
        NewUser::new(
            value.sub.clone(),
            value.email.clone(),
            value.username.clone(),
        )
        .with_full_name(value.first_name.clone(), value.last_name.clone())
    }
}

/// Who is asking: drives permission checks and the per-requester flags of projections.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Requester {
    #[default]
    Anonymous,
    User(User),
}

impl Requester {
    /// Identifier of the authenticated user, `None` when anonymous.
    pub fn user_id(&self) -> Option<i32> {
        match self {
            Requester::Anonymous => None,
            Requester::User(user) => Some(user.id),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Requester::Anonymous => None,
            Requester::User(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Requester::User(_))
    }
}
