//! Login and logout.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::dto::LoginRequest;

use super::html;
use crate::middleware::error::AppResult;
use crate::middleware::session::{Viewer, removal_cookie, safe_next, session_cookie};
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

/// GET /accounts/login/
pub async fn login_form(
    state: web::Data<AppState>,
    viewer: Viewer,
    query: web::Query<NextQuery>,
) -> HttpResponse {
    let next = safe_next(query.next.as_deref());
    html(views::accounts::login(&viewer, state.locale, "", next, None))
}

/// POST /accounts/login/
pub async fn login(
    state: web::Data<AppState>,
    viewer: Viewer,
    form: web::Form<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = form.into_inner();
    let next = safe_next(req.next.as_deref());

    let user = match state.users.find_by_username(&req.username).await? {
        Some(user) => {
            let valid = state.passwords.verify(&req.password, &user.password_hash)?;
            valid.then_some(user)
        }
        None => None,
    };

    let Some(user) = user else {
        tracing::warn!(username = %req.username, "Login failed");
        let message = views::accounts::invalid_login_message(state.locale);
        return Ok(html(views::accounts::login(
            &viewer,
            state.locale,
            &req.username,
            next,
            Some(message),
        )));
    };

    let role = user.role();
    let token = state
        .tokens
        .generate_token(user.id, &user.username, vec![role.as_str().to_string()])?;
    let cookie = session_cookie(&state.session, token, state.tokens.expiration_seconds());

    tracing::info!(user_id = user.id, %role, "User logged in");

    Ok(HttpResponse::Found()
        .cookie(cookie)
        .insert_header((header::LOCATION, next))
        .finish())
}

/// POST /accounts/logout/
pub async fn logout(state: web::Data<AppState>, viewer: Viewer) -> HttpResponse {
    match viewer.identity() {
        Some(identity) => tracing::info!(user_id = identity.user_id, "User logged out"),
        None => tracing::debug!("Logout without a session"),
    }

    HttpResponse::Found()
        .cookie(removal_cookie(&state.session))
        .insert_header((header::LOCATION, "/"))
        .finish()
}
