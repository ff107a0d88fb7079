use crate::errors::ToggleError;
use crate::models::{CsrfToken, LikeAction, PostId};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::COOKIE;
use serde_json::Value;
use tracing::debug;

pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Where like/unlike requests go. A successful return means the server
/// accepted the state change.
#[async_trait]
pub trait LikeEndpoint: Send + Sync {
    async fn send(&self, post_id: &PostId, action: LikeAction) -> Result<(), ToggleError>;
}

#[derive(Debug, Clone)]
pub struct HttpLikeClient {
    http: Client,
    base_url: String,
    csrf_token: CsrfToken,
    cookie: Option<String>,
}

impl HttpLikeClient {
    pub fn new(base_url: impl Into<String>, csrf_token: CsrfToken) -> Self {
        Self::with_client(Client::new(), base_url, csrf_token)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, csrf_token: CsrfToken) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            csrf_token,
            cookie: None,
        }
    }

    /// Raw `Cookie` header sent with every request, e.g. a session id.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn url_for(&self, post_id: &PostId, action: LikeAction) -> String {
        format!("{}/tweets/{}/{}/", self.base_url, post_id, action.path_segment())
    }
}

#[async_trait]
impl LikeEndpoint for HttpLikeClient {
    async fn send(&self, post_id: &PostId, action: LikeAction) -> Result<(), ToggleError> {
        let url = self.url_for(post_id, action);
        debug!(%url, "sending like toggle");

        let mut request = self
            .http
            .post(&url)
            .header(CSRF_HEADER, self.csrf_token.as_str());
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await?;
        Err(ToggleError::rejected(status, error_detail(body)))
    }
}

/// Error bodies are expected to be JSON; anything else is kept verbatim.
fn error_detail(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}
