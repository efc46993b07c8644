//! Tests for `WebhookValidator`.

use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;

use super::mock::{MockClient, Reply, TEST_URL, test_endpoint};
use super::validator::{ProbeError, Reachable, WebhookValidator};
use crate::webhook::HttpError;

const TIMEOUT: Duration = Duration::from_secs(5);

mod probe {
    use super::*;

    #[tokio::test]
    async fn status_200_is_reachable() {
        let validator = WebhookValidator::new(MockClient::status(200, r#"{"id": "1"}"#));

        let result = validator.probe_endpoint(&test_endpoint(), TIMEOUT).await;

        assert_eq!(result, Ok(Reachable));
    }

    #[tokio::test]
    async fn status_404_is_unreachable() {
        let validator = WebhookValidator::new(MockClient::status(404, r#"{"code": 10015}"#));

        let result = validator.probe_endpoint(&test_endpoint(), TIMEOUT).await;

        assert_eq!(
            result,
            Err(ProbeError::Unreachable {
                status: StatusCode::NOT_FOUND
            })
        );
    }

    #[tokio::test]
    async fn other_success_codes_are_unreachable() {
        for code in [201, 204] {
            let validator = WebhookValidator::new(MockClient::status(code, ""));

            let result = validator.probe_endpoint(&test_endpoint(), TIMEOUT).await;

            assert!(
                matches!(result, Err(ProbeError::Unreachable { status }) if status.as_u16() == code),
                "Expected {code} to be unreachable"
            );
        }
    }

    #[tokio::test]
    async fn sends_get_to_exact_url_with_timeout() {
        let client = Arc::new(MockClient::status(200, ""));
        let validator = WebhookValidator::new(Arc::clone(&client));

        validator
            .probe_endpoint(&test_endpoint(), TIMEOUT)
            .await
            .unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, http::Method::GET);
        assert_eq!(requests[0].url.as_str(), TEST_URL);
        assert_eq!(requests[0].timeout, Some(TIMEOUT));
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn connection_error_is_network_failure() {
        let validator = WebhookValidator::new(MockClient::error(HttpError::Connection(
            Box::new(std::io::Error::other("connection refused")),
        )));

        let result = validator.probe_endpoint(&test_endpoint(), TIMEOUT).await;

        assert_eq!(
            result,
            Err(ProbeError::NetworkFailure(
                "connection error: connection refused".to_string()
            ))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_endpoint_times_out() {
        let validator = WebhookValidator::new(MockClient::hanging());
        let started = tokio::time::Instant::now();

        let result = validator.probe_endpoint(&test_endpoint(), TIMEOUT).await;

        assert_eq!(result, Err(ProbeError::NetworkFailure("timeout".to_string())));
        assert!(started.elapsed() >= TIMEOUT);
        assert!(started.elapsed() < TIMEOUT + Duration::from_millis(100));
    }

    #[tokio::test]
    async fn transport_timeout_is_network_failure() {
        let validator = WebhookValidator::new(MockClient::new(vec![Reply::Error(
            HttpError::Timeout,
        )]));

        let result = validator.probe_endpoint(&test_endpoint(), TIMEOUT).await;

        assert_eq!(result, Err(ProbeError::NetworkFailure("timeout".to_string())));
    }
}

mod format {
    use super::*;

    #[test]
    fn associated_fn_matches_free_fn() {
        let url = "https://discord.com/api/webhooks/1/t";

        assert_eq!(
            WebhookValidator::<MockClient>::validate_format(url),
            super::super::validate_format(url)
        );
        assert!(WebhookValidator::<MockClient>::validate_format("https://example.com").is_err());
    }
}

mod probe_error {
    use super::*;

    #[test]
    fn transient_classification() {
        let transient = [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::REQUEST_TIMEOUT,
        ];
        for status in transient {
            assert!(ProbeError::Unreachable { status }.is_transient(), "{status}");
        }

        let permanent = [
            StatusCode::NOT_FOUND,
            StatusCode::UNAUTHORIZED,
            StatusCode::BAD_REQUEST,
        ];
        for status in permanent {
            assert!(!ProbeError::Unreachable { status }.is_transient(), "{status}");
        }

        assert!(ProbeError::NetworkFailure("timeout".to_string()).is_transient());
    }

    #[test]
    fn display_includes_status() {
        let err = ProbeError::Unreachable {
            status: StatusCode::NOT_FOUND,
        };

        assert!(err.to_string().contains("404"));
    }
}
