use std::collections::HashSet;

use diesel::prelude::*;

use crate::domain::subscription::{
    NewSubscription as DomainNewSubscription, SubscriptionListQuery,
};
use crate::domain::user::User as DomainUser;
use crate::models::subscription::NewSubscription as DbNewSubscription;
use crate::models::user::User as DbUser;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SubscriptionReader, SubscriptionWriter};

impl SubscriptionReader for DieselRepository {
    fn subscribed_author_ids(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> RepositoryResult<HashSet<i32>> {
        use crate::schema::subscriptions;

        if author_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut conn = self.conn()?;
        let ids = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::author_id.eq_any(author_ids))
            .select(subscriptions::author_id)
            .load::<i32>(&mut conn)?;

        Ok(ids.into_iter().collect())
    }

    fn list_subscribed_authors(
        &self,
        query: SubscriptionListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainUser>)> {
        use crate::schema::{subscriptions, users};

        let mut conn = self.conn()?;

        let total = subscriptions::table
            .filter(subscriptions::user_id.eq(query.user_id))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let followed = subscriptions::table
            .filter(subscriptions::user_id.eq(query.user_id))
            .select(subscriptions::author_id);

        let mut items = users::table
            .filter(users::id.eq_any(followed))
            .order(users::username.asc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let authors = items.load::<DbUser>(&mut conn)?;

        Ok((total, authors.into_iter().map(Into::into).collect()))
    }
}

impl SubscriptionWriter for DieselRepository {
    fn add_subscription(&self, subscription: &DomainNewSubscription) -> RepositoryResult<()> {
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        diesel::insert_into(subscriptions::table)
            .values(&DbNewSubscription::from(subscription))
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove_subscription(&self, user_id: i32, author_id: i32) -> RepositoryResult<bool> {
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            subscriptions::table
                .filter(subscriptions::user_id.eq(user_id))
                .filter(subscriptions::author_id.eq(author_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
