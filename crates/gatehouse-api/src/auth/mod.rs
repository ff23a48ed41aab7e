// Authentication HTTP plumbing: shared state, extractor, routes

pub mod middleware;
pub mod routes;

pub use middleware::{AuthState, CurrentUser};
