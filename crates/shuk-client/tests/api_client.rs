use std::time::Duration;

use shuk_api::AppStateInner;
use shuk_api::auth::issue_token;
use shuk_client::{
    ApiClient, ClientError, FilterState, HttpListingSource, ListingSource, ListingsPage, PageState,
    Session, StaticListingSource,
};
use shuk_db::Database;
use shuk_types::fixtures::sample_listings;
use shuk_types::{ListingFilter, NewListing};

const SECRET: &str = "client-test-secret";

async fn spawn_server() -> String {
    let db = Database::open_in_memory().unwrap();
    db.insert_listings(&sample_listings()).unwrap();
    let state = AppStateInner::new(db, SECRET.into(), Duration::from_secs(5));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, shuk_api::router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(5)).unwrap()
}

fn seder_plate() -> NewListing {
    NewListing {
        title: "Seder Plate".into(),
        description: "Hand-painted ceramic seder plate".into(),
        price_text: Some("Negotiable".into()),
        location: "Manchester".into(),
        category_id: Some(3),
        contact_phone: Some("07700 900999".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn http_and_local_filtering_agree() {
    let base = spawn_server().await;
    let api = client(&base);

    let forms = [
        FilterState::default(),
        FilterState {
            category_id: "1".into(),
            shabbat_restricted_only: true,
            ..Default::default()
        },
        FilterState {
            search: "MENORAH".into(),
            ..Default::default()
        },
        FilterState {
            min_price: "35".into(),
            max_price: "450".into(),
            location: "london".into(),
            ..Default::default()
        },
    ];

    for form in forms {
        let filter = form.to_filter().unwrap();
        let remote = api.list_listings(&filter).await.unwrap();

        let mut page = ListingsPage::new(StaticListingSource::new(sample_listings()), form.clone()).unwrap();
        page.load().await;
        assert_eq!(remote, page.visible(), "tiers disagree for {form:?}");
    }
}

#[tokio::test]
async fn created_listing_is_visible_to_next_query() {
    let base = spawn_server().await;
    let api = client(&base);

    let mut session = Session::signed_out();
    let err = api.create_listing(&session, &seder_plate()).await.unwrap_err();
    assert!(matches!(err, ClientError::SignedOut));

    let token = issue_token(SECRET, "user-900", chrono::Duration::hours(1)).unwrap();
    session.sign_in("user-900", None, token);
    let created = api.create_listing(&session, &seder_plate()).await.unwrap();
    assert_eq!(created.owner_id, "user-900");

    let all = api.list_listings(&ListingFilter::default()).await.unwrap();
    assert_eq!(all.first(), Some(&created));
    assert_eq!(api.get_listing(created.id).await.unwrap(), Some(created));
    assert_eq!(api.get_listing(uuid::Uuid::new_v4()).await.unwrap(), None);

    session.sign_out();
    assert!(matches!(
        api.create_listing(&session, &seder_plate()).await,
        Err(ClientError::SignedOut)
    ));
}

#[tokio::test]
async fn invalid_listing_is_rejected_before_sending() {
    let base = spawn_server().await;
    let api = client(&base);
    let mut session = Session::signed_out();
    session.sign_in("user-1", None, "irrelevant");

    let err = api.create_listing(&session, &NewListing::default()).await.unwrap_err();
    match err {
        ClientError::Validation(errors) => assert!(errors.get("title").is_some()),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn rejected_token_is_unauthorized() {
    let base = spawn_server().await;
    let api = client(&base);
    let mut session = Session::signed_out();
    session.sign_in("user-1", None, "not-a-real-token");

    let err = api.create_listing(&session, &seder_plate()).await.unwrap_err();
    match err {
        ClientError::Unauthorized(message) => assert_eq!(message, "Invalid token"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn http_source_drives_page() {
    let base = spawn_server().await;
    let scope = ListingFilter {
        category_id: Some(1),
        ..Default::default()
    };
    let source = HttpListingSource::new(client(&base), scope);
    assert_eq!(source.fetch().await.unwrap().len(), 3);

    let mut page = ListingsPage::new(source, FilterState::default()).unwrap();
    assert_eq!(page.load().await, &PageState::Ready);
    assert_eq!(page.visible().len(), 3);
}

#[tokio::test]
async fn unreachable_server_fails_page() {
    // Nothing listens on port 9 locally.
    let source = HttpListingSource::new(client("http://127.0.0.1:9"), ListingFilter::default());
    let mut page = ListingsPage::new(source, FilterState::default()).unwrap();
    assert!(matches!(page.load().await, PageState::Failed(_)));
}

/// A server that answers with canned responses instead of the real API.
async fn spawn_stub() -> String {
    use axum::http::StatusCode;
    use axum::routing::get;
    use shuk_types::api::ErrorBody;

    let app = axum::Router::new().route(
        "/api/listings",
        get(|| async { "<html>maintenance</html>" }).post(|| async {
            let mut body = ErrorBody::new("Validation failed");
            body.fields = Some([("categoryId".to_string(), "Unknown category".to_string())].into());
            (StatusCode::BAD_REQUEST, axum::Json(body))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn server_side_field_errors_are_validation() {
    let base = spawn_stub().await;
    let mut session = Session::signed_out();
    session.sign_in("user-1", None, "token");

    let err = client(&base).create_listing(&session, &seder_plate()).await.unwrap_err();
    match err {
        ClientError::Validation(errors) => assert_eq!(errors.get("categoryId"), Some("Unknown category")),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let base = spawn_stub().await;
    let err = client(&base).list_listings(&ListingFilter::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "unexpected {err:?}");
}
