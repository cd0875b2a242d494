//! npsdb - REST API over the National Park Service relational database
//!
//! Layers, bottom up:
//! - [`store`]: the SQLite connection, schema bootstrap and row normalization
//! - [`model`]: request contracts and their validation
//! - [`http_server`]: the axum router, one route group per resource
//! - [`cli`]: `init`, `serve` and `query` commands
//! - [`observability`]: tracing setup and lifecycle event names

pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod store;
