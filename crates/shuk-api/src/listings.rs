use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{SubsecRound, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use shuk_types::{Listing, ListingFilter, ListingQuery, NewListing};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::{AppState, run_db, run_db_write};

/// GET /api/listings — public, filtered, most recent first.
pub async fn list_listings(
    State(state): State<AppState>,
    query: Result<Query<ListingQuery>, QueryRejection>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filter = ListingFilter::from_query(&query).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    debug!("Listings query: {:?}", filter);

    let listings = run_db(&state, "Failed to fetch listings", move |db| db.query_listings(&filter)).await?;
    debug!("Retrieved {} listings", listings.len());

    Ok(Json(listings))
}

/// POST /api/listings — owner comes from the token, never from the body.
pub async fn create_listing(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<NewListing>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_listing) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    new_listing.validate()?;

    // Stored timestamps keep microsecond precision.
    let now = Utc::now().trunc_subsecs(6);
    let listing = new_listing.into_listing(user.id(), now);

    let stored = listing.clone();
    run_db_write(&state, "Failed to create listing", move |db, claim| {
        db.insert_listing_claimed(&stored, || claim.start())
    })
    .await?;

    info!("Listing {} created by {}", listing.id, listing.owner_id);
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Listing>, ApiError> {
    // A malformed id cannot name any listing.
    let Path(id) = id.map_err(|_| ApiError::NotFound("Listing"))?;

    run_db(&state, "Failed to fetch listing", move |db| db.get_listing(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Listing"))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
