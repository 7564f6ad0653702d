use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::recipe::{AuthorFilter, RecipeListQuery};
use crate::domain::subscription::{NewSubscription, SubscriptionListQuery};
use crate::domain::user::{Requester, User};
use crate::pagination::{Paginated, Pagination};
use crate::repository::errors::RepositoryError;
use crate::repository::{RecipeReader, SubscriptionReader, SubscriptionWriter, UserReader};
use crate::services::users::require_user;
use crate::services::views::{AuthorView, RequesterLookups, author_view};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters of `POST /api/users/{id}/subscribe`.
#[derive(Debug, Default, Deserialize)]
pub struct AuthorQuery {
    /// Truncates the nested recipe list; the count is unaffected.
    pub recipes_limit: Option<usize>,
}

/// Query parameters of `GET /api/users/subscriptions`.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionsQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub recipes_limit: Option<usize>,
}

/// Follows `author_id` on behalf of the requester.
pub fn subscribe<R>(
    repo: &R,
    requester: &Requester,
    author_id: i32,
    query: AuthorQuery,
) -> ServiceResult<AuthorView>
where
    R: UserReader + SubscriptionWriter + RecipeReader + ?Sized,
{
    let user = require_user(requester)?;

    let subscription = NewSubscription::new(user.id, author_id);
    if subscription.is_self_subscription() {
        return Err(ServiceError::Validation(
            "you cannot subscribe to yourself".to_string(),
        ));
    }

    let author = repo
        .get_user_by_id(author_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.add_subscription(&subscription)
        .map_err(|err| match err {
            RepositoryError::Conflict(_) => ServiceError::Conflict(format!(
                "already subscribed to {}",
                author.username
            )),
            other => ServiceError::from(other),
        })?;
    log::info!("User {} subscribed to {}", user.id, author.id);

    let lookups = RequesterLookups {
        subscribed: HashSet::from([author.id]),
        ..RequesterLookups::default()
    };
    load_author_view(repo, &author, query.recipes_limit, &lookups)
}

/// Stops following `author_id`. Succeeds when there was no subscription.
pub fn unsubscribe<R>(repo: &R, requester: &Requester, author_id: i32) -> ServiceResult<()>
where
    R: UserReader + SubscriptionWriter + ?Sized,
{
    let user = require_user(requester)?;
    if repo.get_user_by_id(author_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.remove_subscription(user.id, author_id)?;

    Ok(())
}

/// Authors the requester follows, ordered by username.
pub fn list_subscriptions<R>(
    repo: &R,
    requester: &Requester,
    query: SubscriptionsQuery,
) -> ServiceResult<Paginated<AuthorView>>
where
    R: SubscriptionReader + RecipeReader + ?Sized,
{
    let user = require_user(requester)?;
    let pagination = Pagination::from_query(query.page, query.limit);

    let list_query = SubscriptionListQuery::new(user.id).paginate(pagination);
    let (total, authors) = repo.list_subscribed_authors(list_query)?;

    let lookups = RequesterLookups {
        subscribed: authors.iter().map(|author| author.id).collect(),
        ..RequesterLookups::default()
    };

    let views = authors
        .iter()
        .map(|author| load_author_view(repo, author, query.recipes_limit, &lookups))
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(Paginated::new(views, total, pagination))
}

fn load_author_view<R>(
    repo: &R,
    author: &User,
    recipes_limit: Option<usize>,
    lookups: &RequesterLookups,
) -> ServiceResult<AuthorView>
where
    R: RecipeReader + ?Sized,
{
    let mut query = RecipeListQuery::new(None).author(AuthorFilter::Id(author.id));
    if let Some(limit) = recipes_limit {
        query = query.paginate(Pagination {
            page: 1,
            per_page: limit,
        });
    }

    let (recipes_count, recipes) = repo.list_recipes(query)?;

    Ok(author_view(author, &recipes, recipes_count, lookups))
}
