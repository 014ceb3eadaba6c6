#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use quill_core::domain::PostForm;
use quill_core::ports::BaseRepository;

use common::{body_text, create_post, location, login_cookie, setup};

const CHAR_200: &str = "12345678901234567890123456789012345678901234567890\
12345678901234567890123456789012345678901234567890\
12345678901234567890123456789012345678901234567890\
12345678901234567890123456789012345678901234567890";

#[actix_web::test]
async fn test_detail_is_public() {
    let state = setup().await;
    let post = create_post(&state, "staff01", "タイトル１", "内容１").await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("タイトル１"));
    assert!(body.contains("内容１"));
    assert!(body.contains("staff01"));
    assert!(!body.contains("/edit/"));
}

#[actix_web::test]
async fn test_detail_offers_edit_when_logged_in() {
    let state = setup().await;
    let post = create_post(&state, "staff01", "タイトル１", "内容１").await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/", post.id))
        .cookie(login_cookie(&state, "user01").await)
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains(&format!(r#"href="/post/{}/edit/""#, post.id)));
}

#[actix_web::test]
async fn test_detail_missing_post() {
    let state = setup().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/post/999/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_edit_form_prefilled() {
    let state = setup().await;
    let post = create_post(&state, "staff01", "タイトル１", "内容１").await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/edit/", post.id))
        .cookie(login_cookie(&state, "staff01").await)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(r#"value="タイトル１""#));
    assert!(body.contains(">内容１</textarea>"));
}

#[actix_web::test]
async fn test_update_post() {
    let state = setup().await;
    let post = create_post(&state, "staff01", "タイトル１", "内容１").await;
    let app = init_app!(state);
    let cookie = login_cookie(&state, "staff01").await;

    let req = test::TestRequest::post()
        .uri(&format!("/post/{}/edit/", post.id))
        .cookie(cookie.clone())
        .set_form(PostForm::new("タイトル２", "内容２"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/post/{}/", post.id));

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/", post.id))
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("タイトル２"));
    assert!(body.contains("内容２"));
    assert!(!body.contains("タイトル１"));

    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.author_id, post.author_id);
    assert!(stored.published_at >= post.published_at);
}

#[actix_web::test]
async fn test_update_with_200_char_title() {
    let state = setup().await;
    let post = create_post(&state, "admin", "タイトル１", "内容１").await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/post/{}/edit/", post.id))
        .cookie(login_cookie(&state, "admin").await)
        .set_form(PostForm::new(CHAR_200, "内容２"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, CHAR_200);
}

#[actix_web::test]
async fn test_update_rejects_invalid_form() {
    let state = setup().await;
    let post = create_post(&state, "staff01", "タイトル１", "内容１").await;
    let app = init_app!(state);
    let cookie = login_cookie(&state, "staff01").await;

    let too_long = format!("{CHAR_200}1");
    let cases = [
        (
            PostForm::new("", "内容のみ_タイトルなし"),
            "error_id_title",
            "このフィールドは必須です。".to_string(),
        ),
        (
            PostForm::new("タイトルのみ_内容なし", ""),
            "error_id_text",
            "このフィールドは必須です。".to_string(),
        ),
        (
            PostForm::new(too_long.as_str(), "内容２"),
            "error_id_title",
            "この値は 200 文字以下でなければなりません( 201 文字になっています)。".to_string(),
        ),
    ];

    for (form, error_id, message) in cases {
        let req = test::TestRequest::post()
            .uri(&format!("/post/{}/edit/", post.id))
            .cookie(cookie.clone())
            .set_form(form)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains(error_id), "missing {error_id}");
        assert!(body.contains(&message), "missing message {message}");
    }

    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored, post);

    for uri in [format!("/post/{}/edit/", post.id), format!("/post/{}/", post.id)] {
        let req = test::TestRequest::get()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request();
        let body = body_text(test::call_service(&app, req).await).await;

        assert!(body.contains("タイトル１"), "{uri}");
        assert!(body.contains("内容１"), "{uri}");
        for rejected in ["内容のみ_タイトルなし", "タイトルのみ_内容なし", too_long.as_str(), "内容２"] {
            assert!(!body.contains(rejected), "{uri} shows {rejected}");
        }
    }
}

#[actix_web::test]
async fn test_anonymous_edit_form_redirects_to_login() {
    let state = setup().await;
    let post = create_post(&state, "staff01", "タイトル１", "内容１").await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/post/{}/edit/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        format!("/accounts/login/?next=%2Fpost%2F{}%2Fedit%2F", post.id)
    );
}

#[actix_web::test]
async fn test_update_missing_post() {
    let state = setup().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/post/42/edit/")
        .cookie(login_cookie(&state, "staff01").await)
        .set_form(PostForm::new("タイトル", "内容"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_anonymous_update_redirects_to_login() {
    let state = setup().await;
    let post = create_post(&state, "staff01", "タイトル１", "内容１").await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/post/{}/edit/", post.id))
        .set_form(PostForm::new("乗っ取り", "内容"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp),
        format!("/accounts/login/?next=%2Fpost%2F{}%2Fedit%2F", post.id)
    );
    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "タイトル１");
}
