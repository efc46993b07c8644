//! Tests for `MessageDispatcher` and `DeliveryOutcome`.

use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;

use super::dispatcher::{DeliveryOutcome, MessageDispatcher};
use super::message::{MAX_MESSAGE_CHARS, MessageError, OutboundMessage};
use super::mock::{MockClient, TEST_URL, test_endpoint};
use crate::webhook::HttpError;

const TIMEOUT: Duration = Duration::from_secs(5);

mod classification {
    use super::*;

    #[tokio::test]
    async fn status_204_is_delivered() {
        let dispatcher = MessageDispatcher::new(MockClient::status(204, ""));

        let outcome = dispatcher
            .send_text(&test_endpoint(), "hello", TIMEOUT)
            .await;

        assert_eq!(outcome, DeliveryOutcome::Delivered);
        assert!(outcome.is_delivered());
    }

    #[tokio::test]
    async fn status_400_passes_body_through() {
        let dispatcher =
            MessageDispatcher::new(MockClient::status(400, r#"{"message": "bad request"}"#));

        let outcome = dispatcher
            .send_text(&test_endpoint(), "hello", TIMEOUT)
            .await;

        assert_eq!(
            outcome,
            DeliveryOutcome::Failed {
                status: StatusCode::BAD_REQUEST,
                body: "{\"message\": \"bad request\"}".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn other_2xx_codes_are_failures() {
        for code in [200, 201, 202] {
            let dispatcher = MessageDispatcher::new(MockClient::status(code, "{}"));

            let outcome = dispatcher
                .send_text(&test_endpoint(), "hello", TIMEOUT)
                .await;

            assert!(
                matches!(outcome, DeliveryOutcome::Failed { status, .. } if status.as_u16() == code),
                "Expected {code} to be a failure"
            );
        }
    }

    #[tokio::test]
    async fn rate_limit_and_missing_webhook_are_failures() {
        for code in [404, 429, 500] {
            let dispatcher = MessageDispatcher::new(MockClient::status(code, "nope"));

            let outcome = dispatcher
                .send_text(&test_endpoint(), "hello", TIMEOUT)
                .await;

            assert!(!outcome.is_delivered());
            assert!(matches!(outcome, DeliveryOutcome::Failed { ref body, .. } if body == "nope"));
        }
    }

    #[tokio::test]
    async fn connection_error_is_network_error() {
        let dispatcher = MessageDispatcher::new(MockClient::error(HttpError::Connection(
            Box::new(std::io::Error::other("reset by peer")),
        )));

        let outcome = dispatcher
            .send_text(&test_endpoint(), "hello", TIMEOUT)
            .await;

        assert_eq!(
            outcome,
            DeliveryOutcome::NetworkError {
                description: "connection error: reset by peer".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_transport_times_out_on_schedule() {
        let dispatcher = MessageDispatcher::new(MockClient::hanging());
        let started = tokio::time::Instant::now();

        let outcome = dispatcher
            .send_text(&test_endpoint(), "hello", TIMEOUT)
            .await;

        assert_eq!(
            outcome,
            DeliveryOutcome::NetworkError {
                description: "timeout".to_string()
            }
        );
        assert!(started.elapsed() >= TIMEOUT);
        assert!(started.elapsed() < TIMEOUT + Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_timeout_is_honored() {
        let dispatcher = MessageDispatcher::new(MockClient::hanging());
        let started = tokio::time::Instant::now();

        let outcome = dispatcher
            .send_text(&test_endpoint(), "hello", Duration::from_secs(1))
            .await;

        assert!(matches!(outcome, DeliveryOutcome::NetworkError { .. }));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}

mod request_shape {
    use super::*;

    #[tokio::test]
    async fn posts_json_content_to_endpoint() {
        let client = Arc::new(MockClient::status(204, ""));
        let dispatcher = MessageDispatcher::new(Arc::clone(&client));

        dispatcher
            .send_text(&test_endpoint(), "say \"hi\"\nnow", TIMEOUT)
            .await;

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.url.as_str(), TEST_URL);
        assert_eq!(
            request.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(request.timeout, Some(TIMEOUT));

        let body: serde_json::Value =
            serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "content": "say \"hi\"\nnow" }));
    }

    #[tokio::test]
    async fn send_accepts_prebuilt_message() {
        let client = Arc::new(MockClient::status(204, ""));
        let dispatcher = MessageDispatcher::new(Arc::clone(&client));
        let message = OutboundMessage::new("prebuilt").unwrap();

        let outcome = dispatcher.send(&test_endpoint(), &message, TIMEOUT).await;

        assert!(outcome.is_delivered());
        assert_eq!(client.calls(), 1);
    }
}

mod local_rejection {
    use super::*;

    #[tokio::test]
    async fn over_long_text_is_rejected_without_request() {
        let client = Arc::new(MockClient::new(vec![]));
        let dispatcher = MessageDispatcher::new(Arc::clone(&client));
        let text = "x".repeat(MAX_MESSAGE_CHARS + 1);

        let outcome = dispatcher.send_text(&test_endpoint(), &text, TIMEOUT).await;

        assert_eq!(
            outcome,
            DeliveryOutcome::Rejected(MessageError::TooLong {
                length: MAX_MESSAGE_CHARS + 1,
                max: MAX_MESSAGE_CHARS,
            })
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_request() {
        let client = Arc::new(MockClient::new(vec![]));
        let dispatcher = MessageDispatcher::new(Arc::clone(&client));

        let outcome = dispatcher.send_text(&test_endpoint(), "   ", TIMEOUT).await;

        assert_eq!(outcome, DeliveryOutcome::Rejected(MessageError::Empty));
        assert_eq!(client.calls(), 0);
    }
}

mod display {
    use super::*;

    #[test]
    fn renders_each_variant() {
        assert_eq!(DeliveryOutcome::Delivered.to_string(), "Message delivered");
        assert_eq!(
            DeliveryOutcome::Failed {
                status: StatusCode::NOT_FOUND,
                body: r#"{"message": "Unknown Webhook"}"#.to_string(),
            }
            .to_string(),
            r#"Send failed with status 404: {"message": "Unknown Webhook"}"#
        );
        assert_eq!(
            DeliveryOutcome::Failed {
                status: StatusCode::BAD_GATEWAY,
                body: String::new(),
            }
            .to_string(),
            "Send failed with status 502"
        );
        assert_eq!(
            DeliveryOutcome::NetworkError {
                description: "timeout".to_string()
            }
            .to_string(),
            "Send failed: timeout"
        );
        assert_eq!(
            DeliveryOutcome::Rejected(MessageError::Empty).to_string(),
            "Message not sent: Message is empty"
        );
    }
}
