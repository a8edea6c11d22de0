//! Fluent synchronous client for the Statamic REST API.
//!
//! # Overview
//! `StatamicClient` covers collections, entries, taxonomies, globals,
//! navigation trees and assets; `GlideClient` covers the glide image
//! transform endpoint. A chain of parameter calls accumulates query
//! parameters, one terminal call performs a single GET, and the returned
//! `Response` exposes the body as JSON (`all`), as the `data` items (`data`)
//! or as a chainable `Collection` (`to_collection`).
//!
//! # Design
//! - Builders are fresh per chain and consumed by the terminal call, so
//!   query state never leaks between requests and data cannot be read
//!   before a request has been made.
//! - Request building and response reading are plain functions over
//!   `HttpRequest` / `HttpResponse`; I/O happens behind the `Transport`
//!   trait, with `UreqTransport` as the default.
//! - Non-2xx responses are returned as data; `Response::error_for_status`
//!   turns them into errors on request.

pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod glide;
pub mod http;
pub mod query;
pub mod reader;
pub mod resource;
pub mod response;
pub mod transport;

pub use client::{RequestBuilder, StatamicClient};
pub use collection::Collection;
pub use config::ClientConfig;
pub use error::{ApiError, BoxError, Result};
pub use glide::{GlideClient, GlideRequestBuilder};
pub use http::{HttpRequest, HttpResponse};
pub use query::{Condition, Query};
pub use resource::Resource;
pub use response::Response;
pub use transport::{Transport, UreqTransport};
