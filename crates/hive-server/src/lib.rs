//! # hive-server
//!
//! HTTP transport for the Hive bot-fleet API: the axum router, request
//! authentication middleware, validation, and the wire error envelopes.
//! All business behavior lives in the lifecycle services; handlers here
//! check the route's permission requirement, validate inputs, call one
//! service operation, and shape the response.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validate;

pub use routes::router;
pub use state::AppState;
