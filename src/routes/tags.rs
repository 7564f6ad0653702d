use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::tags as tag_service;

#[get("/api/tags")]
pub async fn list_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match tag_service::list_tags(repo.get_ref()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => error_response(err, "Failed to list tags"),
    }
}

#[get("/api/tags/{tag_id}")]
pub async fn get_tag(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let tag_id = path.into_inner();

    match tag_service::get_tag(repo.get_ref(), tag_id) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(err) => error_response(err, &format!("Failed to load tag {tag_id}")),
    }
}
