mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_user_journey() {
    let app = common::create_test_app();

    app.server
        .post("/signup")
        .json(&json!({ "username": "alice", "password": "pw1", "role": "user" }))
        .await
        .assert_status(StatusCode::CREATED);

    let login = app
        .server
        .post("/login")
        .json(&json!({ "username": "alice", "password": "pw1" }))
        .await;
    login.assert_status_ok();
    let token = login.json::<Value>()["token"].as_str().unwrap().to_string();

    let convert = app
        .server
        .post("/convert")
        .authorization_bearer(&token)
        .json(&json!({ "link": "https://example.com/very/long/path" }))
        .await;
    convert.assert_status_ok();
    let code = convert.json::<Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(code.len() >= 5);

    app.server
        .get("/admin/links")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_journey() {
    let app = common::create_test_app();
    let alice = common::token_for(&app.server, "alice", "user").await;
    let admin = common::token_for(&app.server, "root", "admin").await;

    let (id, _) = common::convert(&app, &alice, "https://example.com").await;

    app.server
        .put(&format!("/admin/links/{}", id))
        .authorization_bearer(&admin)
        .json(&json!({ "original_link": "https://example.org", "converted_link": "fixed" }))
        .await
        .assert_status_ok();

    let listing: Value = app
        .server
        .get("/admin/links")
        .authorization_bearer(&admin)
        .await
        .json();
    let links = listing["users"]["user_1"]["list_of_converted_links"]
        .as_array()
        .unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["original_link"], "https://example.org");
    assert_eq!(
        links[0]["converted_link"],
        format!("{}/fixed", common::BASE_URL)
    );

    app.server
        .delete(&format!("/admin/links/{}", id))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();

    let listing: Value = app
        .server
        .get("/admin/links")
        .authorization_bearer(&admin)
        .await
        .json();
    assert!(listing["users"].as_object().unwrap().is_empty());
}
