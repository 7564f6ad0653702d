use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ingredients::{self as ingredient_service, IngredientQuery};

#[get("/api/ingredients")]
/// Ingredient catalog, narrowed by the `name` prefix when given.
pub async fn list_ingredients(
    params: web::Query<IngredientQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match ingredient_service::list_ingredients(repo.get_ref(), params.into_inner()) {
        Ok(ingredients) => HttpResponse::Ok().json(ingredients),
        Err(err) => error_response(err, "Failed to search ingredients"),
    }
}

#[get("/api/ingredients/{ingredient_id}")]
pub async fn get_ingredient(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ingredient_id = path.into_inner();

    match ingredient_service::get_ingredient(repo.get_ref(), ingredient_id) {
        Ok(ingredient) => HttpResponse::Ok().json(ingredient),
        Err(err) => error_response(err, &format!("Failed to load ingredient {ingredient_id}")),
    }
}
