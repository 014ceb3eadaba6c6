//! Shared setup for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test;

use quill_core::domain::{Locale, NewPost, Post, PostForm};
use quill_infra::{Argon2PasswordService, JwtConfig, JwtTokenService, PasswordConfig};
use quill_server::middleware::session::session_cookie;
use quill_server::state::AppState;

pub const USERS_JSON: &str = include_str!("../../../../fixtures/users.json");

/// Build the app service around a state.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(quill_server::handlers::configure_routes),
        )
        .await
    };
}

/// In-memory state seeded with the `admin`, `staff01` and `user01` fixture users.
pub async fn setup() -> AppState {
    setup_with_locale(Locale::Ja).await
}

pub async fn setup_with_locale(locale: Locale) -> AppState {
    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "integration-test-secret".to_string(),
        ..JwtConfig::default()
    }));
    let passwords = Arc::new(
        Argon2PasswordService::with_config(PasswordConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap(),
    );

    let state = AppState::in_memory(tokens, passwords).with_locale(locale);

    let fixtures = quill_infra::parse_user_fixtures(USERS_JSON).unwrap();
    quill_infra::seed_users(state.users.as_ref(), state.passwords.as_ref(), &fixtures)
        .await
        .unwrap();

    state
}

pub async fn user_id(state: &AppState, username: &str) -> i64 {
    state
        .users
        .find_by_username(username)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("fixture user {username} missing"))
        .id
}

/// Session cookie for a fixture user, as if they had just logged in.
pub async fn login_cookie(state: &AppState, username: &str) -> Cookie<'static> {
    let user = state
        .users
        .find_by_username(username)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("fixture user {username} missing"));

    let token = state
        .tokens
        .generate_token(user.id, &user.username, vec![user.role().as_str().to_string()])
        .unwrap();

    session_cookie(&state.session, token, state.tokens.expiration_seconds())
}

pub async fn create_post(state: &AppState, author: &str, title: &str, text: &str) -> Post {
    let author_id = user_id(state, author).await;
    let draft = PostForm::new(title, text).validate().unwrap();

    state
        .posts
        .create(NewPost::new(author_id, draft))
        .await
        .unwrap()
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}
