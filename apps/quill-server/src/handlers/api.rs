//! Read-only JSON view of published posts.

use actix_web::{HttpResponse, web};

use quill_core::domain::Post;
use quill_core::error::DomainError;
use quill_core::ports::BaseRepository;
use quill_shared::ApiResponse;
use quill_shared::dto::{AuthorResponse, PostResponse};

use super::author_names;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::AuthorNames;

fn to_response(post: Post, authors: &AuthorNames) -> PostResponse {
    PostResponse {
        author: AuthorResponse {
            id: post.author_id,
            username: authors.get(&post.author_id).cloned().unwrap_or_default(),
        },
        id: post.id,
        title: post.title,
        text: post.text,
        created_at: post.created_at,
        published_at: post.published_at,
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_published().await?;
    let authors = author_names(state.users.as_ref()).await?;

    let body: Vec<PostResponse> = posts
        .into_iter()
        .map(|post| to_response(post, &authors))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::list(body)))
}

/// GET /api/posts/{pk}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;
    let authors = author_names(state.users.as_ref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post, &authors))))
}
