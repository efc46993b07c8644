//! [`HttpClient`] backed by reqwest.

use http::header::{HeaderValue, USER_AGENT};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// `User-Agent` sent with every request unless the request sets its own.
pub const DEFAULT_USER_AGENT: &str = concat!("hooksend/", env!("CARGO_PKG_VERSION"));

/// Production client.
///
/// Request timeouts are handed to reqwest, which enforces them across
/// connect, send and body download.
///
/// ```no_run
/// use hooksend::webhook::{HttpClient, HttpRequest, ReqwestClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = url::Url::parse("https://discord.com/api/webhooks/1/abc")?;
/// let response = ReqwestClient::new().request(HttpRequest::get(url)).await?;
/// println!("{}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with reqwest's default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a preconfigured reqwest client (proxy, TLS roots, ...).
    #[must_use]
    pub const fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    pub(super) fn prepare(&self, req: HttpRequest) -> reqwest::RequestBuilder {
        let HttpRequest {
            method,
            url,
            mut headers,
            body,
            timeout,
        } = req;

        headers
            .entry(USER_AGENT)
            .or_insert(HeaderValue::from_static(DEFAULT_USER_AGENT));

        let builder = self.inner.request(method, url).headers(headers);
        let builder = match body {
            Some(body) => builder.body(body),
            None => builder,
        };

        match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self.prepare(req).send().await.map_err(into_http_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(into_http_error)?;

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

fn into_http_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
