//! Infrastructure layer: REST transport, configuration, and logging
//!
//! Implements the persistence ports defined in `salesdesk-core` against the
//! CRM's HTTP backend, and provides the ambient pieces the rest of the
//! application plugs into: config loading and tracing setup.

pub mod api;
pub mod config;
pub mod gateway;
pub mod http;
pub mod observability;

pub use api::{AccessTokenProvider, ApiClient, ApiError, StaticTokenProvider};
pub use gateway::HttpOpportunityGateway;
pub use http::HttpClient;
