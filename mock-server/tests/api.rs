use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, TodoItem};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/todos/?owner=alice"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<TodoItem> = body_json(resp).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn list_without_trailing_slash() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/todos?owner=alice"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- create ---

#[tokio::test]
async fn create_returns_201_not_done() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/todos/",
            r#"{"name":"buy milk","owner":"alice"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: TodoItem = body_json(resp).await;
    assert_eq!(item.id, 1);
    assert_eq!(item.name, "buy milk");
    assert_eq!(item.owner, "alice");
    assert!(!item.done);
}

#[tokio::test]
async fn create_empty_name_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/todos/", r#"{"name":"","owner":"alice"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_keeps_whitespace_in_name() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/todos/",
            r#"{"name":"  wash car ","owner":"alice"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: TodoItem = body_json(resp).await;
    assert_eq!(item.name, "  wash car ");
}

#[tokio::test]
async fn item_routes_hang_off_collection_path() {
    let resp = app()
        .oneshot(empty_request(
            "GET",
            &format!("{}/?owner=alice", mock_server::COLLECTION_PATH),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app()
        .oneshot(empty_request("GET", &format!("{}/1", mock_server::COLLECTION_PATH)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/todos/", r#"{"title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get / patch / delete on missing items ---

#[tokio::test]
async fn get_not_found() {
    let resp = app().oneshot(empty_request("GET", "/api/todos/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/todos/not-a-number"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_not_found() {
    let resp = app()
        .oneshot(json_request("PATCH", "/api/todos/42", r#"{"done":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/todos/42"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn lifecycle_is_scoped_by_owner() {
    use tower::Service;

    let mut app = app().into_service();

    for body in [
        r#"{"name":"buy milk","owner":"alice"}"#,
        r#"{"name":"fix bike","owner":"bob"}"#,
        r#"{"name":"wash car","owner":"alice"}"#,
    ] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/api/todos/", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // list: only alice's items, in creation order
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos/?owner=alice"))
        .await
        .unwrap();
    let items: Vec<TodoItem> = body_json(resp).await;
    let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["buy milk", "wash car"]);
    assert!(items.iter().all(|item| item.owner == "alice"));

    // patch done
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PATCH", "/api/todos/1", r#"{"done":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let patched: TodoItem = body_json(resp).await;
    assert!(patched.done);
    assert_eq!(patched.name, "buy milk");

    // get reflects the patch
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos/1"))
        .await
        .unwrap();
    let fetched: TodoItem = body_json(resp).await;
    assert!(fetched.done);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/api/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // list after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos/?owner=alice"))
        .await
        .unwrap();
    let items: Vec<TodoItem> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 3);

    // no owner filter lists everything
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos/"))
        .await
        .unwrap();
    let items: Vec<TodoItem> = body_json(resp).await;
    assert_eq!(items.len(), 2);
}
