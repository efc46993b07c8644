//! Request and response values exchanged with an [`HttpClient`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode};
use url::Url;

use super::HttpError;

/// An outgoing request to a webhook endpoint.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// GET for probes, POST for messages
    pub method: Method,
    /// Full webhook URL, token included
    pub url: Url,
    /// Extra headers
    pub headers: HeaderMap,
    /// Request body, if any
    pub body: Option<Vec<u8>>,
    /// Upper bound on the whole exchange, if any
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a bodiless request with no extra headers and no timeout.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Attaches an already-encoded JSON document as the body.
    ///
    /// Sets `Content-Type: application/json`, replacing any earlier value.
    #[must_use]
    pub fn with_json_body(mut self, json: String) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(json.into_bytes());
        self
    }

    /// Adds a header. Repeated names keep every value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Bounds the exchange by `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code as sent by the server
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a header-less response with a text body.
    #[must_use]
    pub fn with_text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, HeaderMap::new(), body.into().into_bytes())
    }

    /// Body as text, with invalid UTF-8 replaced by U+FFFD.
    #[must_use]
    pub fn body_text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport used by the Discord layer.
///
/// Any status code counts as a response; only failures to complete the
/// exchange are errors. Tests substitute scripted implementations:
///
/// ```ignore
/// use hooksend::webhook::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct AlwaysNoContent;
///
/// impl HttpClient for AlwaysNoContent {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::with_text(http::StatusCode::NO_CONTENT, ""))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Performs one exchange.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Connection`] when the server cannot be reached,
    /// [`HttpError::Timeout`] when the request timeout elapses and
    /// [`HttpError::InvalidUrl`] when the request cannot be built.
    fn request(&self, req: HttpRequest)
    -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}
