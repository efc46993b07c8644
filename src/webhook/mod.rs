//! Transport layer for talking to webhook endpoints over HTTP.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//!
//! Discord-specific semantics live in [`crate::discord`]; nothing here
//! interprets status codes.

mod client;
mod error;
mod http;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
