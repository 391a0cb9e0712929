//! Client tier: talks to the listings API and filters fetched listings
//! locally with the same predicates the server uses.

pub mod client;
pub mod error;
pub mod page;
pub mod session;
pub mod source;

pub use client::ApiClient;
pub use error::ClientError;
pub use page::{FilterState, ListingsPage, PageState};
pub use session::Session;
pub use source::{HttpListingSource, ListingSource, StaticListingSource};
