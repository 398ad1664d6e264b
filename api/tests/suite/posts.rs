use jsonboard_api::POSTS_ENDPOINT;
use jsonboard_types::{NewPost, PostId, PostPatch, UserId};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{client_for, post_json};

#[tokio::test]
async fn get_all_decodes_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POSTS_ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([post_json(1, 1), post_json(2, 3)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let posts = client_for(&server, 0).posts().get_all().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, Some(PostId::new(1)));
    assert_eq!(posts[1].user_id, UserId::new(3));
}

#[tokio::test]
async fn get_by_id_hits_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(7, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let post = client_for(&server, 0)
        .posts()
        .get_by_id(PostId::new(7))
        .await
        .unwrap();

    assert_eq!(post.id, Some(PostId::new(7)));
    assert_eq!(post.title, "post number 7 title");
}

#[tokio::test]
async fn create_sends_camel_case_body() {
    let server = MockServer::start().await;
    let new_post = NewPost {
        user_id: UserId::new(4),
        title: "A valid title".to_string(),
        body: "b".repeat(120),
    };
    Mock::given(method("POST"))
        .and(path(POSTS_ENDPOINT))
        .and(body_json(json!({
            "userId": 4,
            "title": "A valid title",
            "body": "b".repeat(120),
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 101,
            "userId": 4,
            "title": "A valid title",
            "body": "b".repeat(120),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server, 0)
        .posts()
        .create(&new_post)
        .await
        .unwrap();

    assert_eq!(created.id, Some(PostId::new(101)));
}

#[tokio::test]
async fn update_uses_put_and_patch_uses_patch() {
    let server = MockServer::start().await;
    let patch = PostPatch {
        title: Some("Renamed post title".to_string()),
        ..PostPatch::default()
    };
    Mock::given(method("PUT"))
        .and(path("/posts/1"))
        .and(body_json(json!({ "title": "Renamed post title" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(1, 1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/posts/1"))
        .and(body_json(json!({ "title": "Renamed post title" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    client.posts().update(PostId::new(1), &patch).await.unwrap();
    client.posts().patch(PostId::new(1), &patch).await.unwrap();
}

#[tokio::test]
async fn delete_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server, 0)
        .posts()
        .delete(PostId::new(3))
        .await
        .unwrap();
}
