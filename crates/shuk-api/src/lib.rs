pub mod auth;
pub mod categories;
pub mod error;
pub mod listings;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
