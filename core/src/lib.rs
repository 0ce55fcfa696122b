//! Blocking client for the review-assignment API.
//!
//! # Overview
//! `ReviewsClient` authenticates with a bearer token read from the
//! environment and exposes one method per API operation: certifications,
//! certified languages, new review requests, assigned count and submission
//! requests. Responses are returned as `serde_json::Value`, unmodified.
//!
//! # Design
//! - Every call goes through `ReviewsClient::execute`, which performs one
//!   round trip and reports any failure as `UnauthorizedToken`.
//! - Requests are plain data (`HttpRequest`); the `Transport` trait sends
//!   them. `UreqTransport` is the network implementation, and closures can
//!   stand in for it in tests.
//! - Headers are built once at construction and never change.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod selection;
pub mod transport;
pub mod types;

pub use client::ReviewsClient;
pub use config::{Credentials, Endpoints};
pub use error::{CallFailure, ConfigError, TransportError, UnauthorizedToken};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{ProjectLanguage, ProjectSelection};
