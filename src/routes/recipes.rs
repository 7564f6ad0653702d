use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, patch, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::recipes::RecipeForm;
use crate::images::FsImageStore;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::recipes::{self as recipe_service, RecipeQuery};
use crate::services::shopping_cart::{self as cart_service, SHOPPING_LIST_FILE_NAME};
use crate::services::users::resolve_requester;
use crate::services::{ServiceError, favorites as favorite_service};

#[get("/api/recipes")]
/// Paginated recipe feed filtered by `author`, repeated `tags`, `is_favorited`
/// and `is_in_shopping_cart`.
pub async fn list_recipes(
    req: HttpRequest,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = match serde_html_form::from_str::<RecipeQuery>(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            return error_response(
                ServiceError::Validation(format!("invalid query: {err}")),
                "Failed to parse recipe query",
            );
        }
    };

    let result = resolve_requester(repo.get_ref(), user.as_ref())
        .and_then(|requester| recipe_service::load_recipes(repo.get_ref(), &requester, query));

    match result {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "Failed to list recipes"),
    }
}

#[get("/api/recipes/{recipe_id}")]
pub async fn get_recipe(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref())
        .and_then(|requester| recipe_service::get_recipe(repo.get_ref(), &requester, recipe_id));

    match result {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => error_response(err, &format!("Failed to load recipe {recipe_id}")),
    }
}

#[post("/api/recipes")]
pub async fn create_recipe(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    images: web::Data<FsImageStore>,
    web::Json(form): web::Json<RecipeForm>,
) -> impl Responder {
    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        recipe_service::create_recipe(repo.get_ref(), images.get_ref(), &requester, form)
    });

    match result {
        Ok(recipe) => HttpResponse::Created().json(recipe),
        Err(err) => error_response(err, "Failed to create recipe"),
    }
}

#[patch("/api/recipes/{recipe_id}")]
pub async fn update_recipe(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    images: web::Data<FsImageStore>,
    web::Json(form): web::Json<RecipeForm>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        recipe_service::update_recipe(
            repo.get_ref(),
            images.get_ref(),
            &requester,
            recipe_id,
            form,
        )
    });

    match result {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => error_response(err, &format!("Failed to update recipe {recipe_id}")),
    }
}

#[delete("/api/recipes/{recipe_id}")]
pub async fn delete_recipe(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    images: web::Data<FsImageStore>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        recipe_service::delete_recipe(repo.get_ref(), images.get_ref(), &requester, recipe_id)
    });

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("Failed to delete recipe {recipe_id}")),
    }
}

#[post("/api/recipes/{recipe_id}/favorite")]
pub async fn add_favorite(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        favorite_service::add_favorite(repo.get_ref(), &requester, recipe_id)
    });

    match result {
        Ok(recipe) => HttpResponse::Created().json(recipe),
        Err(err) => error_response(err, &format!("Failed to favorite recipe {recipe_id}")),
    }
}

#[delete("/api/recipes/{recipe_id}/favorite")]
pub async fn remove_favorite(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        favorite_service::remove_favorite(repo.get_ref(), &requester, recipe_id)
    });

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, &format!("Failed to unfavorite recipe {recipe_id}")),
    }
}

#[post("/api/recipes/{recipe_id}/shopping_cart")]
pub async fn add_to_shopping_cart(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        cart_service::add_to_shopping_cart(repo.get_ref(), &requester, recipe_id)
    });

    match result {
        Ok(recipe) => HttpResponse::Created().json(recipe),
        Err(err) => error_response(err, &format!("Failed to add recipe {recipe_id} to cart")),
    }
}

#[delete("/api/recipes/{recipe_id}/shopping_cart")]
pub async fn remove_from_shopping_cart(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    let result = resolve_requester(repo.get_ref(), user.as_ref()).and_then(|requester| {
        cart_service::remove_from_shopping_cart(repo.get_ref(), &requester, recipe_id)
    });

    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(
            err,
            &format!("Failed to remove recipe {recipe_id} from cart"),
        ),
    }
}

#[get("/api/recipes/download_shopping_cart")]
/// Consolidated shopping list as a plain-text attachment.
pub async fn download_shopping_cart(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = resolve_requester(repo.get_ref(), user.as_ref())
        .and_then(|requester| cart_service::download_shopping_list(repo.get_ref(), &requester));

    match result {
        Ok(list) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILE_NAME}\""),
            ))
            .body(list.to_string()),
        Err(err) => error_response(err, "Failed to build shopping list"),
    }
}
