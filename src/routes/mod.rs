use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Map a service failure to its HTTP status. Internal details are logged, never returned.
pub fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        ServiceError::Conflict(message) => HttpResponse::Conflict().json(ErrorBody::new(message)),
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new("Not found.")),
        ServiceError::Unauthorized => HttpResponse::Unauthorized()
            .json(ErrorBody::new("Authentication credentials were not provided.")),
        ServiceError::Forbidden => HttpResponse::Forbidden()
            .json(ErrorBody::new("You do not have permission to perform this action.")),
        ServiceError::Internal(message) => {
            log::error!("{context}: {message}");
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error."))
        }
    }
}

/// Registers every API endpoint.
///
/// Literal paths go before their `{id}` siblings so that, for example,
/// `/api/recipes/download_shopping_cart` is not parsed as a recipe id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(tags::list_tags)
        .service(tags::get_tag)
        .service(ingredients::list_ingredients)
        .service(ingredients::get_ingredient)
        .service(recipes::download_shopping_cart)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::get_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(recipes::add_favorite)
        .service(recipes::remove_favorite)
        .service(recipes::add_to_shopping_cart)
        .service(recipes::remove_from_shopping_cart)
        .service(users::list_users)
        .service(users::me)
        .service(users::subscriptions)
        .service(users::get_user)
        .service(users::subscribe)
        .service(users::unsubscribe);
}
