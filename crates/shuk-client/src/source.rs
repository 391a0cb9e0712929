use std::future::Future;

use shuk_types::filter;
use shuk_types::{Listing, ListingFilter};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Where a page gets its listings from.
pub trait ListingSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Listing>, ClientError>> + Send;
}

/// Fetches from the API, narrowed server-side by `scope` (e.g. a
/// category page only asks for its category).
#[derive(Debug, Clone)]
pub struct HttpListingSource {
    client: ApiClient,
    scope: ListingFilter,
}

impl HttpListingSource {
    pub fn new(client: ApiClient, scope: ListingFilter) -> Self {
        Self { client, scope }
    }
}

impl ListingSource for HttpListingSource {
    async fn fetch(&self) -> Result<Vec<Listing>, ClientError> {
        self.client.list_listings(&self.scope).await
    }
}

/// Listings held in memory, such as the bundled sample set.
#[derive(Debug, Clone, Default)]
pub struct StaticListingSource {
    listings: Vec<Listing>,
    scope: ListingFilter,
}

impl StaticListingSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            scope: ListingFilter::default(),
        }
    }

    pub fn scoped(mut self, scope: ListingFilter) -> Self {
        self.scope = scope;
        self
    }
}

impl ListingSource for StaticListingSource {
    async fn fetch(&self) -> Result<Vec<Listing>, ClientError> {
        Ok(filter::apply(&self.scope, &self.listings))
    }
}
