use futures_util::TryStreamExt;
use qiita_client::http_client::ReqwestQiitaClient;
use qiita_client::pagination::user_items;
use qiita_client::{Item, QiitaClient, QiitaError};
use secrecy::SecretString;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestQiitaClient {
    ReqwestQiitaClient::new(&server.uri(), SecretString::new("tok".into())).expect("client")
}

fn item_json(id: &str, likes: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("post {id}"),
        "created_at": "2024-03-01T12:00:00+09:00",
        "updated_at": "2024-03-02T12:00:00+09:00",
        "likes_count": likes,
        "comments_count": 0
    })
}

#[tokio::test]
async fn get_user_sends_bearer_token_and_parses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/alice"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "alice",
            "followees_count": 3,
            "followers_count": 12,
            "items_count": 2,
            "description": null
        })))
        .mount(&server)
        .await;

    let user = client_for(&server).get_user("alice").await.expect("user");
    assert_eq!(user.id, "alice");
    assert_eq!(user.followers_count, 12);
    assert_eq!(user.followees_count, 3);
}

#[tokio::test]
async fn list_items_passes_page_and_per_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/alice/items"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([item_json("i1", 4), item_json("i2", 0)])),
        )
        .mount(&server)
        .await;

    let items = client_for(&server)
        .list_items("alice", 2, 5)
        .await
        .expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "i1");
    assert_eq!(items[0].endorsement_count, 4);
}

#[tokio::test]
async fn user_items_walks_pages_over_http() {
    let server = MockServer::start().await;
    for (page, body) in [
        ("1", serde_json::json!([item_json("a", 1), item_json("b", 1)])),
        ("2", serde_json::json!([item_json("c", 1), item_json("d", 1)])),
        ("3", serde_json::json!([item_json("e", 1)])),
    ] {
        Mock::given(method("GET"))
            .and(path("/api/v2/users/alice/items"))
            .and(query_param("page", page))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let items: Vec<Item> = user_items(&client, "alice", 2)
        .try_collect()
        .await
        .expect("items");
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn stock_count_prefers_total_count_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/items/i1/stockers"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Count", "321")
                .set_body_json(serde_json::json!([{"id": "u1"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let count = client_for(&server).get_stock_count("i1").await.expect("count");
    assert_eq!(count, 321);
}

#[tokio::test]
async fn stock_count_pages_stockers_without_header() {
    let server = MockServer::start().await;
    let full_page: Vec<serde_json::Value> = (0..100)
        .map(|n| serde_json::json!({"id": format!("u{n}")}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v2/items/i1/stockers"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/items/i1/stockers"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": "x"}, {"id": "y"}])),
        )
        .mount(&server)
        .await;

    let count = client_for(&server).get_stock_count("i1").await.expect("count");
    assert_eq!(count, 102);
}

#[tokio::test]
async fn stock_count_stops_after_last_served_page() {
    let server = MockServer::start().await;
    let full_page: Vec<serde_json::Value> = (0..100)
        .map(|n| serde_json::json!({"id": format!("u{n}")}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v2/items/popular/stockers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_page))
        .expect(100)
        .mount(&server)
        .await;

    let count = client_for(&server)
        .get_stock_count("popular")
        .await
        .expect("count");
    assert_eq!(count, 10_000);
}

#[tokio::test]
async fn item_id_with_slash_is_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/items/a%2Fb/stockers"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Count", "7")
                .set_body_json(serde_json::json!([])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let count = client_for(&server).get_stock_count("a/b").await.expect("count");
    assert_eq!(count, 7);
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/alice/items"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\":\"Unauthorized\"}"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_items("alice", 1, 10)
        .await
        .expect_err("should fail");
    match err {
        QiitaError::Auth { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Unauthorized"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/items/i1/stockers"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit exceeded"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_stock_count("i1")
        .await
        .expect_err("should fail");
    assert!(matches!(err, QiitaError::RateLimited { status: 429, .. }));
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_user("ghost")
        .await
        .expect_err("should fail");
    assert_eq!(err.status(), Some(404));
}
