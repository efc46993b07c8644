//! Timeout-bounded request helper shared by the validator and dispatcher.

use std::time::Duration;

use crate::webhook::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Sends `request` and gives up once `timeout` has elapsed.
///
/// The timeout is also attached to the request so transports that support it
/// can abort the connection themselves. Either way an elapsed deadline
/// surfaces as [`HttpError::Timeout`].
pub(super) async fn exchange<H: HttpClient>(
    client: &H,
    request: HttpRequest,
    timeout: Duration,
) -> Result<HttpResponse, HttpError> {
    let request = request.with_timeout(timeout);

    tokio::time::timeout(timeout, client.request(request))
        .await
        .unwrap_or(Err(HttpError::Timeout))
}
