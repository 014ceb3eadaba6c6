//! HTTP handlers and route configuration.

mod accounts;
mod admin;
mod api;
mod health;
mod posts;

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};

use quill_core::ports::{BaseRepository, UserRepository};

use crate::middleware::error::AppResult;
use crate::views::AuthorNames;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::post_list))
        // `new` is registered before `{pk}` so it is not read as an id
        .service(
            web::resource("/post/new/")
                .route(web::get().to(posts::post_new_form))
                .route(web::post().to(posts::post_new)),
        )
        .route("/post/{pk}/", web::get().to(posts::post_detail))
        .service(
            web::resource("/post/{pk}/edit/")
                .route(web::get().to(posts::post_edit_form))
                .route(web::post().to(posts::post_edit)),
        )
        .service(
            web::resource("/accounts/login/")
                .route(web::get().to(accounts::login_form))
                .route(web::post().to(accounts::login)),
        )
        .route("/accounts/logout/", web::post().to(accounts::logout))
        .service(
            web::scope("/admin")
                .route("/", web::get().to(admin::index))
                .route("/blog/post/", web::get().to(admin::post_changelist)),
        )
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/posts", web::get().to(api::list_posts))
                .route("/posts/{pk}", web::get().to(api::get_post)),
        );
}

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn author_names(users: &dyn UserRepository) -> AppResult<AuthorNames> {
    Ok(users
        .find_all()
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect())
}
