use std::time::Duration;

use reqwest::{StatusCode, header};
use tracing::{debug, warn};
use uuid::Uuid;

use shuk_types::api::ErrorBody;
use shuk_types::{Category, Listing, ListingFilter, NewListing, ValidationErrors};

use crate::error::ClientError;
use crate::session::Session;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the listings API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/listings"))
            .query(&filter.to_query())
            .send()
            .await?;
        let listings: Vec<Listing> = expect_success(response).await?.json().await?;
        debug!("Fetched {} listings", listings.len());
        Ok(listings)
    }

    /// `Ok(None)` when the listing does not exist.
    pub async fn get_listing(&self, id: Uuid) -> Result<Option<Listing>, ClientError> {
        let response = self.http.get(self.url(&format!("/api/listings/{id}"))).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(expect_success(response).await?.json().await?))
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self.http.get(self.url("/api/categories")).send().await?;
        Ok(expect_success(response).await?.json().await?)
    }

    /// Validates locally with the server's rules before sending.
    pub async fn create_listing(&self, session: &Session, listing: &NewListing) -> Result<Listing, ClientError> {
        let bearer = session.bearer().ok_or(ClientError::SignedOut)?;
        listing.validate()?;

        let response = self
            .http
            .post(self.url("/api/listings"))
            .header(header::AUTHORIZATION, bearer)
            .json(listing)
            .send()
            .await?;
        Ok(expect_success(response).await?.json().await?)
    }
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let (message, fields) = match response.json::<ErrorBody>().await {
        Ok(body) => (body.error, body.fields),
        Err(_) => (status.canonical_reason().unwrap_or("unknown error").to_string(), None),
    };
    warn!("Request failed with {}: {}", status, message);

    Err(match (status, fields) {
        (StatusCode::BAD_REQUEST, Some(fields)) => ClientError::Validation(ValidationErrors::from(fields)),
        (StatusCode::UNAUTHORIZED, _) => ClientError::Unauthorized(message),
        (StatusCode::GATEWAY_TIMEOUT, _) => ClientError::Timeout,
        _ => ClientError::Http {
            status: status.as_u16(),
            message,
        },
    })
}
