//! Integration tests for the ordered content collections.
//!
//! Run with: cargo test -p veranda-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use veranda_integration_tests::TestContext;

async fn create_feature(ctx: &TestContext, title: &str) -> String {
    let resp = ctx
        .client
        .post(ctx.url("/api/admin/features"))
        .json(&json!({
            "icon": "star",
            "title": title,
            "description": "created by integration test",
        }))
        .send()
        .await
        .expect("Failed to create feature");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("body");
    assert_eq!(body["order"], 0, "new rows land at order 0");
    body["id"].as_str().expect("id").to_owned()
}

async fn delete_feature(ctx: &TestContext, id: &str) {
    let _ = ctx
        .client
        .delete(ctx.url(&format!("/api/admin/features/{id}")))
        .send()
        .await;
}

fn order_of(list: &[Value], id: &str) -> i64 {
    list.iter()
        .find(|f| f["id"] == id)
        .and_then(|f| f["order"].as_i64())
        .expect("feature missing from listing")
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_create_rejects_blank_required_fields() {
    let ctx = TestContext::new();
    ctx.sign_in().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/admin/features"))
        .json(&json!({
            "icon": "star",
            "title": "   ",
            "description": "blank title must not persist",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let slide = ctx
        .client
        .post(ctx.url("/api/admin/slides"))
        .json(&json!({ "title": "No image", "image": "" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(slide.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_reorder_assigns_positions() {
    let ctx = TestContext::new();
    ctx.sign_in().await;

    let marker = Uuid::new_v4();
    let a = create_feature(&ctx, &format!("reorder-a-{marker}")).await;
    let b = create_feature(&ctx, &format!("reorder-b-{marker}")).await;
    let c = create_feature(&ctx, &format!("reorder-c-{marker}")).await;

    let resp = ctx
        .client
        .put(ctx.url("/api/admin/features"))
        .json(&json!({ "ids": [c, a, b] }))
        .send()
        .await
        .expect("Failed to reorder");
    assert_eq!(resp.status(), StatusCode::OK);

    let list: Vec<Value> = resp.json().await.expect("body");
    assert_eq!(order_of(&list, &c), 1);
    assert_eq!(order_of(&list, &a), 2);
    assert_eq!(order_of(&list, &b), 3);

    delete_feature(&ctx, &a).await;
    delete_feature(&ctx, &b).await;
    delete_feature(&ctx, &c).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_reorder_duplicate_id_last_position_wins() {
    let ctx = TestContext::new();
    ctx.sign_in().await;

    let marker = Uuid::new_v4();
    let a = create_feature(&ctx, &format!("dup-a-{marker}")).await;
    let b = create_feature(&ctx, &format!("dup-b-{marker}")).await;

    let resp = ctx
        .client
        .put(ctx.url("/api/admin/features"))
        .json(&json!({ "ids": [a, b, a] }))
        .send()
        .await
        .expect("Failed to reorder");
    assert_eq!(resp.status(), StatusCode::OK);

    let list: Vec<Value> = resp.json().await.expect("body");
    assert_eq!(order_of(&list, &a), 3, "last occurrence decides the rank");
    assert_eq!(order_of(&list, &b), 2);

    delete_feature(&ctx, &a).await;
    delete_feature(&ctx, &b).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_inactive_rows_hidden_from_public_listing() {
    let ctx = TestContext::new();
    ctx.sign_in().await;

    let marker = Uuid::new_v4();
    let id = create_feature(&ctx, &format!("inactive-{marker}")).await;

    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/admin/features/{id}")))
        .json(&json!({ "active": false }))
        .send()
        .await
        .expect("Failed to patch");
    assert_eq!(resp.status(), StatusCode::OK);

    let public: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/public/features"))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body");
    assert!(public.iter().all(|f| f["id"] != id.as_str()));

    let admin: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/admin/features"))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("body");
    assert!(admin.iter().any(|f| f["id"] == id.as_str()));

    delete_feature(&ctx, &id).await;
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_delete_missing_is_not_found() {
    let ctx = TestContext::new();
    ctx.sign_in().await;

    let resp = ctx
        .client
        .delete(ctx.url(&format!("/api/admin/features/{}", Uuid::new_v4())))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
