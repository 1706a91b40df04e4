mod common;

use axum::http::StatusCode;
use common::{delete, get, patch, post, spawn_app};
use serde_json::json;

const USER: &str = "user_keywords";

#[tokio::test]
async fn test_create_then_duplicate_is_conflict() {
    let app = spawn_app().await;

    let (status, body) = post(&app.router, "/api/keywords", USER, json!({"phrase": "SEO"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["phrase"], "SEO");
    assert_eq!(body["data"]["normalized"], "seo");
    assert_eq!(body["data"]["source"], "manual");

    let (status, body) = post(&app.router, "/api/keywords", USER, json!({"phrase": "seo"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "DUPLICATE_KEYWORD_NORMALIZED");
}

#[tokio::test]
async fn test_normalized_variants_collide() {
    let app = spawn_app().await;

    let (status, _) = post(
        &app.router,
        "/api/keywords",
        USER,
        json!({"phrase": "React Framework"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for variant in ["react framework", "  REACT   framework ", "React\tFramework"] {
        let (status, _) =
            post(&app.router, "/api/keywords", USER, json!({"phrase": variant})).await;
        assert_eq!(status, StatusCode::CONFLICT, "variant {variant:?}");
    }
}

#[tokio::test]
async fn test_invalid_phrases_are_rejected() {
    let app = spawn_app().await;

    for phrase in ["", "   ", "!!! ---"] {
        let (status, body) =
            post(&app.router, "/api/keywords", USER, json!({"phrase": phrase})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "phrase {phrase:?}");
        assert_eq!(body["error"]["code"], "INVALID_KEYWORD_PHRASE");
    }

    let long = "a".repeat(101);
    let (status, _) = post(&app.router, "/api/keywords", USER, json!({"phrase": long})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let exact = "a".repeat(100);
    let (status, _) = post(&app.router, "/api/keywords", USER, json!({"phrase": exact})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&app.router, "/api/keywords", USER, json!({"text": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
}

#[tokio::test]
async fn test_bulk_create_counts_duplicates_as_skipped() {
    let app = spawn_app().await;

    let (status, body) = post(
        &app.router,
        "/api/keywords/bulk",
        USER,
        json!({"phrases": ["React", "react", "Vue"]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["created"], 2);
    assert_eq!(body["data"]["skipped"], 1);
    let keywords = body["data"]["keywords"].as_array().unwrap();
    assert_eq!(keywords.len(), 2);
    assert!(keywords.iter().all(|k| k["source"] == "dataforseo"));

    // Existing rows are skipped too.
    let (status, body) = post(
        &app.router,
        "/api/keywords/bulk",
        USER,
        json!({"phrases": ["VUE", "Svelte"]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["created"], 1);
    assert_eq!(body["data"]["skipped"], 1);
    assert_eq!(body["data"]["keywords"][0]["normalized"], "svelte");
}

#[tokio::test]
async fn test_bulk_create_silently_drops_invalid_phrases() {
    let app = spawn_app().await;

    let (status, body) = post(
        &app.router,
        "/api/keywords/bulk",
        USER,
        json!({"phrases": ["valid one", "   ", "???"]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // Invalid entries count neither as created nor as skipped.
    assert_eq!(body["data"]["created"], 1);
    assert_eq!(body["data"]["skipped"], 0);

    let (status, body) = post(
        &app.router,
        "/api/keywords/bulk",
        USER,
        json!({"phrases": ["", "---"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "KEYWORD_BULK_INSERT_ERROR");
}

#[tokio::test]
async fn test_bulk_create_size_limits() {
    let app = spawn_app().await;

    let (status, body) =
        post(&app.router, "/api/keywords/bulk", USER, json!({"phrases": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");

    let many: Vec<String> = (0..51).map(|i| format!("kw {i}")).collect();
    let (status, _) = post(&app.router, "/api/keywords/bulk", USER, json!({"phrases": many})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_pagination_and_search() {
    let app = spawn_app().await;

    for phrase in ["rust async", "rust traits", "go channels"] {
        let (status, _) =
            post(&app.router, "/api/keywords", USER, json!({"phrase": phrase})).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app.router, "/api/keywords", USER).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["limit"], 20);
    assert_eq!(body["data"]["hasMore"], false);
    // Newest first.
    assert_eq!(body["data"]["items"][0]["phrase"], "go channels");

    let (_, body) = get(&app.router, "/api/keywords?limit=2&page=1", USER).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["hasMore"], true);

    let (_, body) = get(&app.router, "/api/keywords?limit=2&page=2", USER).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["hasMore"], false);

    let (_, body) = get(&app.router, "/api/keywords?query=RUST", USER).await;
    assert_eq!(body["data"]["total"], 2);
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let app = spawn_app().await;

    let (status, _) = post(&app.router, "/api/keywords", USER, json!({"phrase": "École Café"})).await;
    assert_eq!(status, StatusCode::CREATED);
    post(&app.router, "/api/keywords", USER, json!({"phrase": "ecole publique"})).await;

    for query in ["%C3%A9cole", "%C3%89COLE", "%C3%89cole", "CAF%C3%89"] {
        let (status, body) = get(&app.router, &format!("/api/keywords?query={query}"), USER).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1, "query {query}");
        assert_eq!(body["data"]["items"][0]["phrase"], "École Café");
    }
}

#[tokio::test]
async fn test_far_page_is_empty() {
    let app = spawn_app().await;
    post(&app.router, "/api/keywords", USER, json!({"phrase": "only one"})).await;

    let (status, body) = get(&app.router, "/api/keywords?page=1000000&limit=100", USER).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["hasMore"], false);
}

#[tokio::test]
async fn test_list_rejects_out_of_range_params() {
    let app = spawn_app().await;

    for uri in [
        "/api/keywords?limit=101",
        "/api/keywords?limit=0",
        "/api/keywords?page=0",
        "/api/keywords?page=abc",
        "/api/keywords?page=9223372036854775807",
        "/api/keywords?page=9223372036854775807&limit=100",
    ] {
        let (status, body) = get(&app.router, uri, USER).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_eq!(body["error"]["code"], "INVALID_QUERY_PARAMS");
    }
}

#[tokio::test]
async fn test_get_update_delete() {
    let app = spawn_app().await;

    let (_, body) = post(&app.router, "/api/keywords", USER, json!({"phrase": "Node.JS"})).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    post(&app.router, "/api/keywords", USER, json!({"phrase": "deno"})).await;

    let (status, body) = get(&app.router, &format!("/api/keywords/{id}"), USER).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["normalized"], "node.js");

    let (status, body) = patch(
        &app.router,
        &format!("/api/keywords/{id}"),
        USER,
        json!({"phrase": "Node  Runtime"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phrase"], "Node  Runtime");
    assert_eq!(body["data"]["normalized"], "node runtime");

    let (status, body) = patch(
        &app.router,
        &format!("/api/keywords/{id}"),
        USER,
        json!({"phrase": "DENO"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_KEYWORD_NORMALIZED");

    let (status, _) = delete(&app.router, &format!("/api/keywords/{id}"), USER).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app.router, &format!("/api/keywords/{id}"), USER).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "KEYWORD_NOT_FOUND");

    let (status, _) = delete(&app.router, &format!("/api/keywords/{id}"), USER).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
