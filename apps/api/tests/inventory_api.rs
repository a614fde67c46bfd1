use codelab_api::routes::build_app;
use codelab_api::state::AppState;
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod with a fresh store, bound to an ephemeral port.
        let app = build_app(AppState::new());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn list_items(client: &reqwest::Client, srv: &TestServer) -> Vec<Value> {
    let res = client.get(srv.url("/items")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn root_and_health_respond() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("Welcome"));

    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn duplicate_create_is_conflict() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let widget = json!({"id": 1, "name": "Widget", "price": 9.99});

    let res = client.post(srv.url("/items")).json(&widget).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item added successfully");
    assert_eq!(body["item"]["id"], 1);
    assert_eq!(body["item"]["name"], "Widget");
    assert!(body["item"]["description"].is_null());

    let res = client.post(srv.url("/items")).json(&widget).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    assert_eq!(list_items(&client, &srv).await.len(), 1);
}

#[tokio::test]
async fn negative_price_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/items"))
        .json(&json!({"id": 2, "name": "Gadget", "price": -5}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    assert!(list_items(&client, &srv).await.is_empty());
}

#[tokio::test]
async fn missing_field_and_wrong_type_are_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for payload in [
        json!({"id": 1, "name": "No price"}),
        json!({"name": "No id", "price": 1.0}),
        json!({"id": "one", "name": "Bad id", "price": 1.0}),
        json!({"id": 1, "name": "Bad price", "price": "cheap"}),
        json!({"id": 1, "name": "", "price": 1.0}),
    ] {
        let res = client.post(srv.url("/items")).json(&payload).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
    }

    let res = client
        .post(srv.url("/items"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert!(list_items(&client, &srv).await.is_empty());
}

#[tokio::test]
async fn update_with_mismatched_id_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let gizmo = json!({"id": 3, "name": "Gizmo", "description": null, "price": 5.0});

    client.post(srv.url("/items")).json(&gizmo).send().await.unwrap();

    let res = client
        .put(srv.url("/items/3"))
        .json(&json!({"id": 4, "name": "Gizmo v2", "price": 6.0}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(srv.url("/items/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, gizmo);
}

#[tokio::test]
async fn update_replaces_fields_in_place() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for id in 1..=4 {
        client
            .post(srv.url("/items"))
            .json(&json!({"id": id, "name": format!("item-{id}"), "price": 1.0}))
            .send()
            .await
            .unwrap();
    }

    let res = client
        .put(srv.url("/items/3"))
        .json(&json!({"id": 3, "name": "Gizmo", "description": "Shiny", "price": 12.5}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item updated");
    assert_eq!(body["item"]["description"], "Shiny");

    let items = list_items(&client, &srv).await;
    let ids: Vec<i64> = items.iter().map(|i| i["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(items[2]["name"], "Gizmo");
}

#[tokio::test]
async fn update_missing_item_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/items/42"))
        .json(&json!({"id": 42, "name": "Ghost", "price": 1.0}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_on_empty_store_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/items/99")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn non_integer_path_id_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/items/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_get_and_list() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(srv.url("/items"))
        .json(&json!({"id": 5, "name": "Doomed", "price": 2.0}))
        .send()
        .await
        .unwrap();

    let res = client.delete(srv.url("/items/5")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item deleted");
    assert_eq!(body["id"], 5);

    let res = client.get(srv.url("/items/5")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(srv.url("/items/5")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert!(list_items(&client, &srv).await.is_empty());
}

#[tokio::test]
async fn separate_instances_do_not_share_items() {
    let first = TestServer::spawn().await;
    let second = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(first.url("/items"))
        .json(&json!({"id": 1, "name": "Widget", "price": 9.99}))
        .send()
        .await
        .unwrap();

    let res = client.get(second.url("/items/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
