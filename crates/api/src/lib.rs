//! HTTP surface for QuestReel.
//!
//! Settings travel in the query string exactly as the viewer persists them,
//! so every read endpoint can be bookmarked. See [`routes::api_routes`] for
//! the route tree.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
