//! Post list, detail, create and edit pages.

use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::Action;
use quill_core::domain::{FormErrors, NewPost, Post, PostForm};
use quill_core::error::DomainError;
use quill_core::ports::BaseRepository;

use super::{author_names, html, redirect};
use crate::middleware::error::AppResult;
use crate::middleware::session::Viewer;
use crate::state::AppState;
use crate::views;

async fn load_post(state: &AppState, id: i64) -> AppResult<Post> {
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;
    Ok(post)
}

/// GET /
pub async fn post_list(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
) -> AppResult<HttpResponse> {
    viewer.authorize(Action::ListPosts, &req)?;

    let posts = state.posts.list_published().await?;
    let authors = author_names(state.users.as_ref()).await?;

    Ok(html(views::posts::list(&viewer, state.locale, &posts, &authors)))
}

/// GET /post/{pk}/
pub async fn post_detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    viewer.authorize(Action::ViewPost, &req)?;

    let post = load_post(&state, path.into_inner()).await?;
    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();

    Ok(html(views::posts::detail(&viewer, state.locale, &post, &author)))
}

/// GET /post/new/
pub async fn post_new_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
) -> AppResult<HttpResponse> {
    viewer.authorize(Action::NewPost, &req)?;

    Ok(html(views::posts::form(
        &viewer,
        state.locale,
        "New post",
        &PostForm::default(),
        &FormErrors::default(),
    )))
}

/// POST /post/new/
pub async fn post_new(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    viewer.authorize(Action::CreatePost, &req)?;
    let author = viewer.require_user(state.users.as_ref(), &req).await?;
    let form = form.into_inner();

    match form.validate() {
        Ok(draft) => {
            let post = state.posts.create(NewPost::new(author.id, draft)).await?;
            tracing::info!(post_id = post.id, author_id = author.id, "Post created");

            Ok(redirect(&format!("/post/{}/", post.id)))
        }
        Err(errors) => {
            tracing::debug!(%errors, "Post form rejected");
            Ok(html(views::posts::form(
                &viewer,
                state.locale,
                "New post",
                &form,
                &errors,
            )))
        }
    }
}

/// GET /post/{pk}/edit/
pub async fn post_edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    viewer.authorize(Action::EditPost, &req)?;

    let post = load_post(&state, path.into_inner()).await?;

    Ok(html(views::posts::form(
        &viewer,
        state.locale,
        "Edit post",
        &PostForm::from_post(&post),
        &FormErrors::default(),
    )))
}

/// POST /post/{pk}/edit/
pub async fn post_edit(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<i64>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    viewer.authorize(Action::UpdatePost, &req)?;
    let editor = viewer.require_user(state.users.as_ref(), &req).await?;
    let post = load_post(&state, path.into_inner()).await?;
    let form = form.into_inner();

    match form.validate() {
        Ok(draft) => {
            let updated = state.posts.update(post.id, draft).await?;
            tracing::info!(post_id = updated.id, editor_id = editor.id, "Post updated");

            Ok(redirect(&format!("/post/{}/", updated.id)))
        }
        Err(errors) => {
            tracing::debug!(post_id = post.id, %errors, "Post form rejected");
            Ok(html(views::posts::form(
                &viewer,
                state.locale,
                "Edit post",
                &form,
                &errors,
            )))
        }
    }
}
