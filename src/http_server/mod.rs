//! # NPS HTTP Server Module
//!
//! The request router: one route group per resource, all sharing a single
//! [`Store`](crate::store::Store).
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/stats` - Dashboard aggregates
//! - `/api/persons`, `/api/parks`, `/api/programs`, `/api/visitors`,
//!   `/api/enrollments`, `/api/rangers`, `/api/teams`, `/api/researchers`,
//!   `/api/donors`, `/api/donations`, `/api/projects`, `/api/mailing-list`
//! - `/api/operations/*` - Bulk administrative updates
//! - `/api/query` - Raw SQL escape hatch (configurable)
//! - anything else (GET) - Browser client

pub mod config;
pub mod errors;
pub mod extract;
pub mod responses;
pub mod server;

mod donation_routes;
mod observability_routes;
mod operations_routes;
mod park_routes;
mod person_routes;
mod project_routes;
mod ranger_routes;
mod researcher_routes;
mod stats_routes;
mod visitor_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_router, shutdown_signal, HttpServer};
pub use stats_routes::StatsResponse;
