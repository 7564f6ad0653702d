use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::{NewUser, Requester, User};
use crate::pagination::{Paginated, Pagination};
use crate::repository::{SubscriptionReader, UserReader, UserWriter};
use crate::services::views::{RequesterLookups, UserView, user_view};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters of `GET /api/users`.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Turns the session claims into a requester, mirroring the user locally.
pub fn resolve_requester<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
) -> ServiceResult<Requester>
where
    R: UserWriter + ?Sized,
{
    let Some(user) = user else {
        return Ok(Requester::Anonymous);
    };

    let stored = repo.upsert_user(&NewUser::from(user))?;
    Ok(Requester::User(stored))
}

/// The requester's user record, or `Unauthorized` for anonymous requests.
pub fn require_user(requester: &Requester) -> ServiceResult<&User> {
    requester.user().ok_or(ServiceError::Unauthorized)
}

/// Profile of the current user. Users never follow themselves.
pub fn current_user(requester: &Requester) -> ServiceResult<UserView> {
    let user = require_user(requester)?;
    Ok(user_view(user, &RequesterLookups::default()))
}

pub fn get_user<R>(repo: &R, requester: &Requester, user_id: i32) -> ServiceResult<UserView>
where
    R: UserReader + SubscriptionReader + ?Sized,
{
    let user = repo.get_user_by_id(user_id)?.ok_or(ServiceError::NotFound)?;

    let subscribed = match requester.user_id() {
        Some(requester_id) => repo.subscribed_author_ids(requester_id, &[user.id])?,
        None => Default::default(),
    };
    let lookups = RequesterLookups {
        subscribed,
        ..RequesterLookups::default()
    };

    Ok(user_view(&user, &lookups))
}

/// Every registered user, one page at a time. Open to anonymous requesters.
pub fn list_users<R>(
    repo: &R,
    requester: &Requester,
    query: UsersQuery,
) -> ServiceResult<Paginated<UserView>>
where
    R: UserReader + SubscriptionReader + ?Sized,
{
    let pagination = Pagination::from_query(query.page, query.limit);
    let (total, users) = repo.list_users(pagination)?;

    let subscribed = match requester.user_id() {
        Some(requester_id) if !users.is_empty() => {
            let ids: Vec<i32> = users.iter().map(|user| user.id).collect();
            repo.subscribed_author_ids(requester_id, &ids)?
        }
        _ => Default::default(),
    };
    let lookups = RequesterLookups {
        subscribed,
        ..RequesterLookups::default()
    };

    let views = users.iter().map(|user| user_view(user, &lookups)).collect();
    Ok(Paginated::new(views, total, pagination))
}
