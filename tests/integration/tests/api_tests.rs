//! API Integration Tests
//!
//! Every test spawns the full HTTP application over a fresh in-memory store,
//! so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, decision, restaurant_body, review_body, test_config,
    Envelope, Page, Reaction, Restaurant, RestaurantSummary, Review, Stats, TestServer,
    SUPER_ADMIN, USER_ID_HEADER,
};
use reqwest::StatusCode;
use serde_json::json;

const MODERATOR: i64 = 2;

/// Server with a bootstrap super admin and one regular moderator
async fn server() -> TestServer {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .put_as(
            &format!("/moderation/moderators/{MODERATOR}"),
            SUPER_ADMIN,
            &json!({"role": "admin"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    server
}

async fn create_restaurant(server: &TestServer, name: &str, cuisine: &str) -> Restaurant {
    let response = server
        .post_as("/restaurants", SUPER_ADMIN, &restaurant_body(name, cuisine))
        .await
        .unwrap();
    let body: Envelope<Restaurant> = assert_json(response, StatusCode::CREATED).await.unwrap();
    body.data
}

async fn submit_review(server: &TestServer, restaurant_id: i64, author: i64, ratings: [f64; 5]) -> Review {
    let response = server
        .post_as(
            &format!("/restaurants/{restaurant_id}/reviews"),
            author,
            &review_body(ratings),
        )
        .await
        .unwrap();
    let body: Envelope<Review> = assert_json(response, StatusCode::CREATED).await.unwrap();
    body.data
}

async fn moderate(server: &TestServer, review_id: i64, verdict: &str) -> Review {
    let response = server
        .post_as(&format!("/reviews/{review_id}/moderate"), MODERATOR, &decision(verdict))
        .await
        .unwrap();
    let body: Envelope<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    body.data
}

async fn approved_review(server: &TestServer, restaurant_id: i64, author: i64, rating: f64) -> Review {
    let review = submit_review(server, restaurant_id, author, [rating; 5]).await;
    moderate(server, review.id, "approve").await
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Identity Tests
// ============================================================================

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let server = server().await;
    let response = server
        .post("/restaurants", &restaurant_body("Anon", "Thai"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_IDENTITY");
}

#[tokio::test]
async fn test_malformed_identity_is_bad_request() {
    let server = server().await;
    let response = server
        .client
        .get(format!("{}/moderation/dashboard", server.base_url()))
        .header(USER_ID_HEADER, "not-a-number")
        .send()
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_IDENTITY");
}

// ============================================================================
// Restaurant Tests
// ============================================================================

#[tokio::test]
async fn test_restaurant_catalog() {
    let server = server().await;
    let created = create_restaurant(&server, "Sushi Bar", "Japanese").await;
    create_restaurant(&server, "Ramen House", "japanese").await;
    create_restaurant(&server, "Taqueria", "Mexican").await;

    let response = server.get(&format!("/restaurants/{}", created.id)).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["name"], "Sushi Bar");
    assert_eq!(body["data"]["awards"][0]["name"], "Best Newcomer");
    assert_eq!(body["data"]["stats"]["total_reviews"], 0);

    let response = server.get("/restaurants/cuisine/JAPANESE").await.unwrap();
    let body: Envelope<Vec<Restaurant>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.len(), 2);
}

#[tokio::test]
async fn test_restaurant_catalog_filters_and_pages() {
    let server = server().await;
    let sushi = create_restaurant(&server, "Sushi Bar", "Japanese").await;
    let ramen = create_restaurant(&server, "Ramen House", "japanese").await;
    create_restaurant(&server, "Taqueria", "Mexican").await;
    approved_review(&server, ramen.id, 10, 5.0).await;
    approved_review(&server, sushi.id, 11, 3.0).await;

    let response = server.get("/restaurants").await.unwrap();
    let page: Page<RestaurantSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 3);

    let response = server
        .get("/restaurants?cuisine=JAPANESE&sort=rating")
        .await
        .unwrap();
    let page: Page<RestaurantSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![ramen.id, sushi.id]);

    let response = server.get("/restaurants?min_rating=4").await.unwrap();
    let page: Page<RestaurantSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.data[0].id, ramen.id);

    let response = server.get("/restaurants?search=taq").await.unwrap();
    let page: Page<RestaurantSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Taqueria");

    let response = server
        .get("/restaurants?sort=name&limit=2&page=2")
        .await
        .unwrap();
    let page: Page<RestaurantSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Taqueria");

    let response = server.get("/restaurants?price_range=7").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_restaurant() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Osteria", "Italian").await;
    let path = format!("/restaurants/{}", restaurant.id);

    let response = server
        .patch_as(
            &path,
            SUPER_ADMIN,
            &json!({
                "name": "Osteria Nuova",
                "city": null,
                "awards": [{"name": "Three Forks", "year": 2024}],
                "highlights": []
            }),
        )
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["name"], "Osteria Nuova");
    assert!(body["data"]["city"].is_null());
    assert_eq!(body["data"]["price_range"], 2);

    let response = server.get(&path).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["awards"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["awards"][0]["name"], "Three Forks");
    assert_eq!(body["data"]["highlights"].as_array().map(Vec::len), Some(0));

    let response = server
        .patch_as(&path, SUPER_ADMIN, &json!({"awards": [{"name": "   "}]}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server.get(&path).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["awards"][0]["name"], "Three Forks");

    let response = server
        .patch_as(&path, MODERATOR, &json!({"name": "Taken over"}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "MISSING_PERMISSIONS");
}

#[tokio::test]
async fn test_restaurant_management_requires_super_admin() {
    let server = server().await;
    let response = server
        .post_as("/restaurants", MODERATOR, &restaurant_body("Nope", "Thai"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "MISSING_PERMISSIONS");
}

#[tokio::test]
async fn test_invalid_restaurant_body() {
    let server = server().await;
    let response = server
        .post_as(
            "/restaurants",
            SUPER_ADMIN,
            &json!({"name": "", "cuisine": "Thai", "price_range": 9}),
        )
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["price_range"].is_array());
}

#[tokio::test]
async fn test_toggle_featured_and_deactivate() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Osteria", "Italian").await;

    let response = server
        .post_as(&format!("/restaurants/{}/featured", restaurant.id), SUPER_ADMIN, &json!({}))
        .await
        .unwrap();
    let body: Envelope<Restaurant> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.data.featured);

    let response = server.get("/restaurants/featured").await.unwrap();
    let body: Envelope<Vec<RestaurantSummary>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.len(), 1);

    let response = server
        .delete_as(&format!("/restaurants/{}", restaurant.id), SUPER_ADMIN)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/restaurants/{}", restaurant.id)).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_RESTAURANT");
}

#[tokio::test]
async fn test_invalid_path_id() {
    let server = server().await;
    let response = server.get("/restaurants/abc/stats").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Review Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_review_lifecycle() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;

    let review = submit_review(&server, restaurant.id, 10, [5.0, 5.0, 4.0, 4.0, 3.0]).await;
    assert_eq!(review.status, "pending");
    assert_eq!(review.author_id, 10);
    assert_eq!(review.restaurant_id, restaurant.id);
    assert!((review.overall_rating - 4.2).abs() < 1e-9);

    // Pending reviews are not listed
    let response = server
        .get(&format!("/restaurants/{}/reviews", restaurant.id))
        .await
        .unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 0);

    let approved = moderate(&server, review.id, "approve").await;
    assert_eq!(approved.status, "approved");
    assert_eq!(approved.moderated_by, Some(MODERATOR));

    // A terminal review cannot be moderated again
    let response = server
        .post_as(&format!("/reviews/{}/moderate", review.id), MODERATOR, &decision("reject"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_TRANSITION");

    let response = server
        .get(&format!("/restaurants/{}/reviews", restaurant.id))
        .await
        .unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.data[0].id, review.id);
}

#[tokio::test]
async fn test_review_validation_errors() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    let path = format!("/restaurants/{}/reviews", restaurant.id);

    let response = server
        .post_as(&path, 10, &review_body([5.5, 3.0, 3.0, 3.0, 3.0]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_RATING");

    let response = server
        .post_as(
            &path,
            10,
            &json!({"title": "t", "content": "c", "ratings": {"food": 4}}),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "MISSING_RATING");

    let response = server
        .post_as(
            &path,
            10,
            &json!({"title": "", "content": "c", "ratings": {"food": 4}}),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .post_as("/restaurants/999/reviews", 10, &review_body([3.0; 5]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_RESTAURANT");
}

#[tokio::test]
async fn test_only_author_edits_and_rejected_is_locked() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    let review = submit_review(&server, restaurant.id, 10, [3.0; 5]).await;
    let path = format!("/reviews/{}", review.id);

    let response = server
        .patch_as(&path, 11, &json!({"title": "Hijacked"}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_REVIEW_AUTHOR");

    let response = server
        .patch_as(&path, 10, &json!({"ratings": {"food": 5.0}}))
        .await
        .unwrap();
    let body: Envelope<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!((body.data.overall_rating - 3.4).abs() < 1e-9);

    moderate(&server, review.id, "reject").await;
    let response = server
        .patch_as(&path, 10, &json!({"title": "Please reconsider"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_moderation_requires_permission() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    let review = submit_review(&server, restaurant.id, 10, [3.0; 5]).await;

    let response = server
        .post_as(&format!("/reviews/{}/moderate", review.id), 10, &decision("approve"))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_as("/moderation/queue", 10).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_delete_review() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    let review = submit_review(&server, restaurant.id, 10, [3.0; 5]).await;
    let path = format!("/reviews/{}", review.id);

    let response = server.delete_as(&path, 11).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_as(&path, 10).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_REVIEW");
}

#[tokio::test]
async fn test_unpublished_reviews_visible_to_author_and_moderators() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    approved_review(&server, restaurant.id, 10, 4.0).await;
    let pending = submit_review(&server, restaurant.id, 10, [3.0; 5]).await;
    let path = format!("/reviews/{}", pending.id);

    let response = server.get(&path).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_REVIEW");

    let response = server.get_as(&path, 11).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_as(&path, 10).await.unwrap();
    let body: Envelope<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.status, "pending");

    let response = server.get_as(&path, MODERATOR).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/users/10/reviews").await.unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert!(page.data.iter().all(|r| r.status == "approved"));

    let response = server.get_as("/users/10/reviews", 10).await.unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 2);
}

#[tokio::test]
async fn test_clear_visit_date() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    let review = submit_review(&server, restaurant.id, 10, [4.0; 5]).await;
    let path = format!("/reviews/{}", review.id);

    let response = server
        .patch_as(&path, 10, &json!({"visit_date": "2024-01-15"}))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["visit_date"], "2024-01-15");

    let response = server
        .patch_as(&path, 10, &json!({"title": "Edited"}))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["visit_date"], "2024-01-15");

    let response = server
        .patch_as(&path, 10, &json!({"visit_date": null}))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["data"]["visit_date"].is_null());
}

#[tokio::test]
async fn test_listing_filters_sort_and_pagination() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    for (author, rating) in [(10, 2.0), (11, 5.0), (12, 4.0)] {
        approved_review(&server, restaurant.id, author, rating).await;
    }
    let base = format!("/restaurants/{}/reviews", restaurant.id);

    let response = server
        .get(&format!("{base}?sort=rating_desc&limit=2"))
        .await
        .unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.pagination.limit, 2);
    assert_eq!(page.data.iter().map(|r| r.author_id).collect::<Vec<_>>(), vec![11, 12]);

    let response = server
        .get(&format!("{base}?sort=rating_desc&limit=2&page=2"))
        .await
        .unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].author_id, 10);

    let response = server.get(&format!("{base}?min_rating=4")).await.unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 2);

    let response = server.get(&format!("{base}?author_id=12")).await.unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].author_id, 12);

    let response = server.get(&format!("{base}?limit=1000")).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");

    let response = server.get("/users/11/reviews").await.unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 1);
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reactions() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    let review = approved_review(&server, restaurant.id, 10, 4.0).await;
    let path = format!("/reviews/{}/reaction", review.id);

    let response = server
        .put_as(&path, 20, &json!({"kind": "helpful"}))
        .await
        .unwrap();
    let body: Envelope<Reaction> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.helpful_count, 1);

    let response = server
        .put_as(&path, 21, &json!({"kind": "unhelpful"}))
        .await
        .unwrap();
    let body: Envelope<Reaction> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.helpful_count, 1);
    assert_eq!(body.data.unhelpful_count, 1);

    // Switching moves the vote
    let response = server
        .put_as(&path, 20, &json!({"kind": "unhelpful"}))
        .await
        .unwrap();
    let body: Envelope<Reaction> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.helpful_count, 0);
    assert_eq!(body.data.unhelpful_count, 2);

    let response = server.delete_as(&path, 21).await.unwrap();
    let body: Envelope<Reaction> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.unhelpful_count, 1);
    assert!(body.data.kind.is_none());

    let response = server.get_as(&path, 20).await.unwrap();
    let body: Envelope<Reaction> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.kind.as_deref(), Some("unhelpful"));

    let response = server.get(&format!("/reviews/{}", review.id)).await.unwrap();
    let body: Envelope<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.helpful_count, 0);
    assert_eq!(body.data.unhelpful_count, 1);
}

#[tokio::test]
async fn test_concurrent_reactions() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    let review = approved_review(&server, restaurant.id, 10, 4.0).await;
    let path = format!("/reviews/{}/reaction", review.id);

    let url = format!("{}{path}", server.base_url());
    let handles: Vec<_> = (100..120)
        .map(|user: i64| {
            let client = server.client.clone();
            let url = url.clone();
            let kind = if user % 2 == 0 { "helpful" } else { "unhelpful" };
            tokio::spawn(async move {
                client
                    .put(url)
                    .header(USER_ID_HEADER, user.to_string())
                    .json(&json!({ "kind": kind }))
                    .send()
                    .await
            })
        })
        .collect();
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server.get(&format!("/reviews/{}", review.id)).await.unwrap();
    let body: Envelope<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.helpful_count, 10);
    assert_eq!(body.data.unhelpful_count, 10);
}

// ============================================================================
// Stats and Ranking Tests
// ============================================================================

#[tokio::test]
async fn test_stats_and_rankings() {
    let server = server().await;
    let nopa = create_restaurant(&server, "Nopa", "Californian").await;
    let solo = create_restaurant(&server, "Solo", "Californian").await;
    for (author, rating) in [(10, 5.0), (11, 4.0), (12, 3.0)] {
        approved_review(&server, nopa.id, author, rating).await;
    }
    approved_review(&server, solo.id, 10, 5.0).await;

    let response = server.get(&format!("/restaurants/{}/stats", nopa.id)).await.unwrap();
    let body: Envelope<Stats> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.total_reviews, 3);
    assert!((body.data.average_rating - 4.0).abs() < 1e-9);
    assert_eq!(body.data.rating_distribution.len(), 5);
    for bucket in &body.data.rating_distribution {
        let expected = if bucket.stars >= 3 { 1 } else { 0 };
        assert_eq!(bucket.count, expected);
        if expected == 1 {
            assert!((bucket.percentage - 100.0 / 3.0).abs() < 1e-6);
        }
    }

    let response = server.get("/restaurants/top-rated").await.unwrap();
    let body: Envelope<Vec<RestaurantSummary>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].id, nopa.id);
    assert_eq!(body.data[0].review_count, 3);

    let response = server.get("/restaurants/top-rated?min_reviews=1").await.unwrap();
    let body: Envelope<Vec<RestaurantSummary>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![solo.id, nopa.id]);
    assert!((body.data[0].average_rating - 5.0).abs() < 1e-9);

    let response = server.get("/restaurants/999/stats").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_configured_top_rated_threshold() {
    let config = test_config(&[("TOP_RATED_MIN_REVIEWS", "1")]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();
    let restaurant = create_restaurant(&server, "Solo", "Thai").await;
    let review = submit_review(&server, restaurant.id, 10, [4.0; 5]).await;
    let response = server
        .post_as(&format!("/reviews/{}/moderate", review.id), SUPER_ADMIN, &decision("approve"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/restaurants/top-rated").await.unwrap();
    let body: Envelope<Vec<RestaurantSummary>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.len(), 1);
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_queue_and_dashboard() {
    let server = server().await;
    let restaurant = create_restaurant(&server, "Trattoria", "Italian").await;
    let first = submit_review(&server, restaurant.id, 10, [3.0; 5]).await;
    let second = submit_review(&server, restaurant.id, 11, [4.0; 5]).await;
    let third = submit_review(&server, restaurant.id, 12, [5.0; 5]).await;
    moderate(&server, second.id, "approve").await;

    let response = server.get_as("/moderation/queue", MODERATOR).await.unwrap();
    let page: Page<Review> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![first.id, third.id]);

    moderate(&server, third.id, "reject").await;

    let response = server.get_as("/moderation/dashboard", MODERATOR).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["review_counts"]["pending"], 1);
    assert_eq!(body["data"]["review_counts"]["approved"], 1);
    assert_eq!(body["data"]["review_counts"]["rejected"], 1);
    assert_eq!(body["data"]["total_reviews"], 3);
    assert_eq!(body["data"]["top_restaurants"][0]["id"], restaurant.id);
}

#[tokio::test]
async fn test_assign_role_requires_super_admin() {
    let server = server().await;
    let response = server
        .put_as("/moderation/moderators/30", MODERATOR, &json!({"role": "super_admin"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_as("/moderation/moderators/30", SUPER_ADMIN, &json!({"role": "bogus"}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");
}
