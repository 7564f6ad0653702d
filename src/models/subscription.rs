use diesel::prelude::*;

use crate::domain::subscription::NewSubscription as DomainNewSubscription;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::subscriptions)]
pub struct NewSubscription {
    pub user_id: i32,
    pub author_id: i32,
}

impl From<&DomainNewSubscription> for NewSubscription {
    fn from(value: &DomainNewSubscription) -> Self {
        Self {
            user_id: value.user_id,
            author_id: value.author_id,
        }
    }
}
