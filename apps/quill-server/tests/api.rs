#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use common::{create_post, setup};

#[actix_web::test]
async fn test_health() {
    let state = setup().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_list_posts_json() {
    let state = setup().await;
    create_post(&state, "staff01", "タイトル１", "内容１").await;
    create_post(&state, "admin", "タイトル２", "内容２").await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(body["count"], 2);
    assert_eq!(posts[0]["title"], "タイトル１");
    assert_eq!(posts[0]["author"]["username"], "staff01");
    assert_eq!(posts[1]["author"]["username"], "admin");
}

#[actix_web::test]
async fn test_get_post_json() {
    let state = setup().await;
    let post = create_post(&state, "user01", "タイトル１", "内容１").await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["text"], "内容１");

    let req = test::TestRequest::get().uri("/api/posts/77").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
}
