//! Scripted HTTP client shared by the discord and session tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::webhook::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// What the mock does with the next request.
#[derive(Debug)]
pub enum Reply {
    /// Answer with the given status and body.
    Status(u16, &'static str),
    /// Fail with a transport error.
    Error(HttpError),
    /// Never answer.
    Hang,
}

/// Mock HTTP client that replays a fixed sequence of replies.
#[derive(Debug)]
pub struct MockClient {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn status(code: u16, body: &'static str) -> Self {
        Self::new(vec![Reply::Status(code, body)])
    }

    pub fn hanging() -> Self {
        Self::new(vec![Reply::Hang])
    }

    pub fn error(error: HttpError) -> Self {
        Self::new(vec![Reply::Error(error)])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock received more requests than scripted");

        match reply {
            Reply::Status(code, body) => Ok(HttpResponse::with_text(
                http::StatusCode::from_u16(code).unwrap(),
                body,
            )),
            Reply::Error(error) => Err(error),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub const TEST_URL: &str = "https://discord.com/api/webhooks/123456789/s3cr3t-token";

pub fn test_endpoint() -> crate::discord::WebhookEndpoint {
    crate::discord::validate_format(TEST_URL).unwrap()
}
