use axum::{Json, Router, routing::get};

use shuk_types::api::HealthResponse;

use crate::state::AppState;
use crate::{categories, listings};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/listings",
            get(listings::list_listings)
                .post(listings::create_listing)
                .fallback(listings::method_not_allowed),
        )
        .route(
            "/api/listings/{id}",
            get(listings::get_listing).fallback(listings::method_not_allowed),
        )
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/{slug}", get(categories::get_category))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use shuk_db::Database;
    use shuk_types::Listing;
    use shuk_types::fixtures::sample_listings;

    use super::*;
    use crate::auth::issue_token;
    use crate::state::AppStateInner;

    const SECRET: &str = "router-test-secret";

    fn app(seed: bool) -> (Router, AppState) {
        app_with_timeout(seed, Duration::from_secs(5))
    }

    fn app_with_timeout(seed: bool, timeout: Duration) -> (Router, AppState) {
        let db = Database::open_in_memory().unwrap();
        if seed {
            db.insert_listings(&sample_listings()).unwrap();
        }
        let state = AppStateInner::new(db, SECRET.into(), timeout);
        (router(state.clone()), state)
    }

    fn bearer(sub: &str) -> String {
        format!("Bearer {}", issue_token(SECRET, sub, chrono::Duration::hours(1)).unwrap())
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post(body: &Value, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::post("/api/listings").header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn payload() -> Value {
        json!({
            "title": "Seder Plate",
            "description": "Hand-painted ceramic seder plate",
            "price": 65.5,
            "location": "Manchester",
            "categoryId": 3,
            "images": ["https://img.example/seder.jpg"],
            "isShabbatRestricted": true,
            "contactEmail": "plates@example.com",
        })
    }

    fn titles(body: &Value) -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|l| l["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn unfiltered_query_is_ordered_and_idempotent() {
        let (app, _) = app(true);
        let (status, first) = send(&app, get("/api/listings")).await;
        assert_eq!(status, StatusCode::OK);
        let (_, second) = send(&app, get("/api/listings")).await;
        assert_eq!(first, second);

        let listings: Vec<Listing> = serde_json::from_value(first).unwrap();
        assert_eq!(listings.len(), 8);
        assert!(listings.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn category_and_shabbat_query() {
        let (app, _) = app(true);
        let (status, body) = send(&app, get("/api/listings?categoryId=1&isShabbatRestricted=true")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["Antique Silver Menorah"]);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let (app, _) = app(true);
        let (_, body) = send(&app, get("/api/listings?search=menorah")).await;
        assert_eq!(titles(&body), vec!["Antique Silver Menorah"]);
        let (_, body) = send(&app, get("/api/listings?search=MeNoRaH")).await;
        assert_eq!(titles(&body), vec!["Antique Silver Menorah"]);
    }

    #[tokio::test]
    async fn price_bounds_include_exact_price() {
        let (app, _) = app(true);
        let (_, body) = send(&app, get("/api/listings?minPrice=450&maxPrice=450")).await;
        assert_eq!(titles(&body), vec!["Antique Silver Menorah"]);

        let (_, body) = send(&app, get("/api/listings?minPrice=lots&location=edgware")).await;
        assert_eq!(titles(&body), vec!["Handmade Mezuzah Cases"]);
    }

    #[tokio::test]
    async fn malformed_category_is_bad_request() {
        let (app, _) = app(true);
        let (status, body) = send(&app, get("/api/listings?categoryId=judaica")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("categoryId"));
    }

    #[tokio::test]
    async fn unparseable_query_string_gets_json_error() {
        let (app, _) = app(true);
        let response = app.clone().oneshot(get("/api/listings?search=a&search=b")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("search"));
    }

    #[tokio::test]
    async fn timed_out_create_stores_nothing() {
        let (app, state) = app_with_timeout(false, Duration::from_millis(50));
        let holder = state.clone();
        let blocker = std::thread::spawn(move || {
            holder.db.with_conn(|_| {
                std::thread::sleep(Duration::from_millis(300));
                Ok(())
            })
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        let (status, body) = send(&app, post(&payload(), Some(&bearer("user-7")))).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "Request timed out");

        blocker.join().unwrap().unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(state.db.count_listings().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_then_query_round_trip() {
        let (app, _) = app(true);
        let mut body = payload();
        body["ownerId"] = json!("spoofed-owner");
        body["userId"] = json!("spoofed-owner");

        let (status, created) = send(&app, post(&body, Some(&bearer("user-777")))).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Listing = serde_json::from_value(created).unwrap();
        assert_eq!(created.owner_id, "user-777");
        assert_eq!(created.title, "Seder Plate");
        assert_eq!(created.price, Some(Decimal::new(655, 1)));
        assert_eq!(created.category_id, 3);
        assert!(created.is_shabbat_restricted);
        assert_eq!(created.images, vec!["https://img.example/seder.jpg".to_string()]);

        let (_, all) = send(&app, get("/api/listings")).await;
        let all: Vec<Listing> = serde_json::from_value(all).unwrap();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], created);

        let (status, fetched) = send(&app, get(&format!("/api/listings/{}", created.id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_value::<Listing>(fetched).unwrap(), created);
    }

    #[tokio::test]
    async fn create_without_credential_persists_nothing() {
        let (app, state) = app(false);
        let (status, body) = send(&app, post(&payload(), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Missing Authorization header");
        assert_eq!(state.db.count_listings().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_with_bad_token_is_unauthorized() {
        let (app, state) = app(false);
        let (status, body) = send(&app, post(&payload(), Some("Bearer garbage"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token");

        let forged = format!(
            "Bearer {}",
            issue_token("another-secret", "user-1", chrono::Duration::hours(1)).unwrap()
        );
        let (status, _) = send(&app, post(&payload(), Some(&forged))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(state.db.count_listings().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload() {
        let (app, state) = app(false);
        let body = json!({ "title": "  ", "categoryId": 3, "location": "Leeds" });
        let (status, body) = send(&app, post(&body, Some(&bearer("user-1")))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["title"], "Title is required");
        assert!(body["fields"]["price"].is_string());
        assert!(body["fields"]["contactEmail"].is_string());
        assert_eq!(state.db.count_listings().unwrap(), 0);

        let req = Request::post("/api/listings")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, bearer("user-1"))
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn other_methods_are_not_allowed() {
        let (app, _) = app(false);
        for method in [Method::PUT, Method::DELETE, Method::PATCH] {
            let req = Request::builder()
                .method(method.clone())
                .uri("/api/listings")
                .body(Body::empty())
                .unwrap();
            let (status, body) = send(&app, req).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
            assert_eq!(body["error"], "Method not allowed");
        }
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let (app, _) = app(true);
        let (status, body) = send(&app, get(&format!("/api/listings/{}", uuid::Uuid::new_v4()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Listing not found");

        let (status, _) = send(&app, get("/api/listings/not-a-uuid")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn categories_are_served() {
        let (app, _) = app(false);
        let (status, body) = send(&app, get("/api/categories")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 11);

        let (status, body) = send(&app, get("/api/categories/services")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 7);

        let (status, _) = send(&app, get("/api/categories/cars")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = app(false);
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
