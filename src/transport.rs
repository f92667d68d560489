//! Transport to the chat endpoint.
//!
//! [`ChatTransport`] is the seam between the widget and the network. The
//! widget only ever sees a decoded [`ChatResponse`] or a [`TransportError`].

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::protocol::{ChatRequest, ChatResponse};

/// One request/response round-trip with the chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// JSON-over-HTTP transport.
///
/// Posts `{"message": ...}` and decodes `{"response": ...}`. The HTTP status
/// is not inspected: any body that decodes is a reply. No
/// timeout is applied.
///
/// # Example
///
/// ```rust,no_run
/// use chat_widget::protocol::ChatRequest;
/// use chat_widget::transport::{ChatTransport, HttpTransport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new("http://localhost:3000/api/chat")?;
/// let reply = transport.send(&ChatRequest::new("Hello!")).await?;
/// println!("{}", reply.response);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for an absolute endpoint URL.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create a transport with a custom reqwest client.
    pub fn with_client(endpoint: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref())?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        tracing::debug!(
            name: "transport.response",
            endpoint = %self.endpoint,
            status = response.status().as_u16(),
            "Chat endpoint responded"
        );

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
