//! Back-office pages.

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::Action;
use quill_core::ports::BaseRepository;

use super::{author_names, html};
use crate::middleware::error::AppResult;
use crate::middleware::session::Viewer;
use crate::state::AppState;
use crate::views;

/// GET /admin/
pub async fn index(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
) -> AppResult<HttpResponse> {
    viewer.authorize(Action::BackOfficeIndex, &req)?;

    Ok(html(views::admin::index(&viewer, state.locale)))
}

/// GET /admin/blog/post/
pub async fn post_changelist(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
) -> AppResult<HttpResponse> {
    viewer.authorize(Action::BackOfficePosts, &req)?;

    let posts = state.posts.find_all().await?;
    let authors = author_names(state.users.as_ref()).await?;

    Ok(html(views::admin::post_changelist(
        &viewer,
        state.locale,
        &posts,
        &authors,
    )))
}
