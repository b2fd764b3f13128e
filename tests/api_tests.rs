// tests/api_tests.rs

use std::sync::Arc;

use post_page::{config::Config, loader::MockPostSource, routes, state::AppState};
use serde_json::{Value, json};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    spawn_app_with(Config {
        rust_log: "error".to_string(),
        ..Config::default()
    })
    .await
}

async fn spawn_app_with(config: Config) -> String {
    // 1. Deterministic mock loader
    let source = Arc::new(MockPostSource::with_seed(config.upvote_seed_max, 1234));
    let state = AppState::with_source(config, source);

    // 2. Create the router with the app state
    let app = routes::create_router(state);

    // 3. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 4. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn open(client: &reqwest::Client, address: &str, id: &str) -> Value {
    let response = client
        .get(&format!("{}/api/posts/{}", address, id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    response.json::<Value>().await.unwrap()
}

async fn act(client: &reqwest::Client, address: &str, id: &str, action: Value) -> reqwest::Response {
    client
        .post(&format!("{}/api/posts/{}/actions", address, id))
        .json(&action)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn unknown_path_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn open_page_returns_mock_post() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = uuid::Uuid::new_v4().to_string();

    // Act
    let page = open(&client, &address, &id).await;

    // Assert
    assert_eq!(page["state"], "ready");
    assert_eq!(page["post"]["id"], id.as_str());
    assert_eq!(page["post"]["title"], format!("Post Title {}", id));
    assert!(page["action_bar"]["upvotes"].as_u64().unwrap() < 100);
    assert_eq!(
        page["action_bar"]["register_button"]["label"],
        "Register for this Event"
    );
    assert_eq!(page["comments"].as_array().unwrap().len(), 2);
    assert_eq!(page["comments"][0]["body"]["mode"], "reading");
    assert_eq!(page["comments"][0]["body"]["content"], "Great post!");
    assert_eq!(page["comments"][0]["created_at"], "2024-05-01");
}

#[tokio::test]
async fn upvote_and_comment_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let page = open(&client, &address, "42").await;
    let start = page["action_bar"]["upvotes"].as_u64().unwrap();

    // 1. Upvote three times
    let mut last = Value::Null;
    for _ in 0..3 {
        let response = act(&client, &address, "42", json!({"type": "upvote"})).await;
        assert_eq!(response.status().as_u16(), 200);
        last = response.json().await.unwrap();
    }
    assert_eq!(last["action_bar"]["upvotes"].as_u64().unwrap(), start + 3);

    // 2. Submit a comment
    let response = act(
        &client,
        &address,
        "42",
        json!({"type": "submit_comment", "content": "Nice!"}),
    )
    .await;
    let page: Value = response.json().await.unwrap();
    let comments = page["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 3);
    assert_eq!(comments[2]["id"], 3);
    assert_eq!(comments[2]["author"], "Random User");
    assert_eq!(comments[2]["body"]["content"], "Nice!");

    // 3. Edit it
    act(&client, &address, "42", json!({"type": "edit_comment", "id": 3})).await;
    let response = act(
        &client,
        &address,
        "42",
        json!({"type": "change_edit", "content": "Nicer!"}),
    )
    .await;
    let page: Value = response.json().await.unwrap();
    assert_eq!(page["comments"][2]["body"]["mode"], "editing");
    assert_eq!(page["comments"][2]["body"]["buffer"], "Nicer!");

    let response = act(&client, &address, "42", json!({"type": "save_edit", "id": 3})).await;
    let page: Value = response.json().await.unwrap();
    assert_eq!(page["comments"][2]["body"]["mode"], "reading");
    assert_eq!(page["comments"][2]["body"]["content"], "Nicer!");

    // 4. Delete a seed comment
    let response = act(&client, &address, "42", json!({"type": "delete_comment", "id": 1})).await;
    let page: Value = response.json().await.unwrap();
    let ids: Vec<u64> = page["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn registration_toggles() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    open(&client, &address, "9").await;

    let page: Value = act(&client, &address, "9", json!({"type": "toggle_registration"}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(page["action_bar"]["register_button"]["label"], "Registered!");
    assert_eq!(page["action_bar"]["register_button"]["color"], "success");

    let page: Value = act(&client, &address, "9", json!({"type": "toggle_registration"}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(
        page["action_bar"]["register_button"]["label"],
        "Register for this Event"
    );
}

#[tokio::test]
async fn action_on_other_post_conflicts() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    open(&client, &address, "1").await;

    let response = act(&client, &address, "2", json!({"type": "upvote"})).await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not the page currently open"));
}

#[tokio::test]
async fn action_before_any_page_conflicts() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = act(&client, &address, "1", json!({"type": "share"})).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn overlong_comment_is_bad_request() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    open(&client, &address, "1").await;

    let response = act(
        &client,
        &address,
        "1",
        json!({"type": "submit_comment", "content": "x".repeat(1001)}),
    )
    .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn empty_comment_rejected_when_configured() {
    let address = spawn_app_with(Config {
        rust_log: "error".to_string(),
        reject_empty_comments: true,
        ..Config::default()
    })
    .await;
    let client = reqwest::Client::new();
    open(&client, &address, "1").await;

    let response = act(
        &client,
        &address,
        "1",
        json!({"type": "submit_comment", "content": ""}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let page = open(&client, &address, "1").await;
    assert_eq!(page["comments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn navigation_resets_page() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    open(&client, &address, "1").await;

    act(&client, &address, "1", json!({"type": "delete_comment", "id": 1})).await;
    act(&client, &address, "1", json!({"type": "edit_comment", "id": 2})).await;

    // Reopening the same post keeps the state
    let page = open(&client, &address, "1").await;
    assert_eq!(page["comments"].as_array().unwrap().len(), 1);
    assert_eq!(page["comments"][0]["body"]["mode"], "editing");

    // Moving to another post throws it away
    let page = open(&client, &address, "2").await;
    assert_eq!(page["comments"].as_array().unwrap().len(), 2);
    assert_eq!(page["comments"][0]["body"]["mode"], "reading");
    assert_eq!(page["post"]["id"], "2");
}

#[tokio::test]
async fn html_page_escapes_comment_markup() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    open(&client, &address, "5").await;

    act(
        &client,
        &address,
        "5",
        json!({"type": "submit_comment", "content": "<script>alert(1)</script>"}),
    )
    .await;

    let response = client
        .get(&format!("{}/posts/5", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();

    // clean_text escapes spaces and punctuation too
    assert!(html.contains(&format!("<h1>{}</h1>", ammonia::clean_text("Post Title 5"))));
    assert!(html.contains("Register for this Event"));
    assert!(html.contains(&ammonia::clean_text("Great post!")));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn unknown_action_is_json_bad_request() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    open(&client, &address, "1").await;

    let response = act(&client, &address, "1", json!({"type": "frobnicate"})).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("unknown variant"));
}

#[tokio::test]
async fn malformed_body_is_json_bad_request() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    open(&client, &address, "1").await;

    let response = client
        .post(&format!("{}/api/posts/1/actions", address))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
