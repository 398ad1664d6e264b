use jsonboard_api::USERS_ENDPOINT;
use jsonboard_types::{NewUser, UserId, UserPatch};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{client_for, user_json};

#[tokio::test]
async fn get_all_and_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USERS_ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(1), user_json(2)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(2)))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let users = client.users().get_all().await.unwrap();
    let user = client.users().get_by_id(UserId::new(2)).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(user.id, UserId::new(2));
    assert!(user.address.is_none());
}

#[tokio::test]
async fn create_update_patch_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(USERS_ENDPOINT))
        .and(body_json(json!({
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json(11)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/users/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(11)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/11"))
        .and(body_json(json!({ "email": "new@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(11)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/11"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let users = client.users();
    let created = users
        .create(&NewUser {
            name: "Clementine Bauch".to_string(),
            username: "Samantha".to_string(),
            email: "Nathan@yesenia.net".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, UserId::new(11));

    let patch = UserPatch {
        email: Some("new@example.com".to_string()),
        ..UserPatch::default()
    };
    users.update(created.id, &patch).await.unwrap();
    users.patch(created.id, &patch).await.unwrap();
    users.delete(created.id).await.unwrap();
}
