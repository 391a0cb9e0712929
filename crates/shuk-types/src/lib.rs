pub mod api;
pub mod category;
pub mod filter;
pub mod fixtures;
pub mod listing;
pub mod price;

pub use category::Category;
pub use filter::{Clause, ListingFilter, ListingQuery};
pub use listing::{Listing, NewListing, ValidationErrors};
