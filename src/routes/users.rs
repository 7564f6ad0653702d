use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::subscriptions::{self as subscription_service, AuthorQuery, SubscriptionsQuery};
use crate::services::users::{self as user_service, UsersQuery, resolve_requester};

#[get("/api/users")]
pub async fn list_users(
    params: web::Query<UsersQuery>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        user_service::list_users(repo.get_ref(), &requester, params.into_inner())
    });

    match result {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "Failed to list users"),
    }
}

#[get("/api/users/me")]
pub async fn me(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = resolve_requester(repo.get_ref(), user.as_ref())
        .and_then(|requester| user_service::current_user(&requester));

    match result {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(err, "Failed to load current user"),
    }
}

#[get("/api/users/subscriptions")]
/// Authors the current user follows, each with a preview of their recipes.
pub async fn subscriptions(
    params: web::Query<SubscriptionsQuery>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        subscription_service::list_subscriptions(repo.get_ref(), &requester, params.into_inner())
    });

    match result {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "Failed to list subscriptions"),
    }
}

#[get("/api/users/{user_id}")]
pub async fn get_user(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let user_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref())
        .and_then(|requester| user_service::get_user(repo.get_ref(), &requester, user_id));

    match result {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response(err, &format!("Failed to load user {user_id}")),
    }
}

#[post("/api/users/{user_id}/subscribe")]
pub async fn subscribe(
    path: web::Path<i32>,
    params: web::Query<AuthorQuery>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let author_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        subscription_service::subscribe(repo.get_ref(), &requester, author_id, params.into_inner())
    });

    match result {
        Ok(author) => HttpResponse::Created().json(author),
        Err(err) => error_response(err, &format!("Failed to subscribe to {author_id}")),
    }
}

#[delete("/api/users/{user_id}/subscribe")]
pub async fn unsubscribe(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let author_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        subscription_service::unsubscribe(repo.get_ref(), &requester, author_id)
    });

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("Failed to unsubscribe from {author_id}")),
    }
}
