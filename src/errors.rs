use crate::models::PostId;
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

/// Why a click left the page unchanged.
#[derive(Debug)]
pub enum ToggleError {
    /// The request never produced a response.
    Transport(reqwest::Error),
    /// The server answered with a non-2xx status.
    Rejected { status: StatusCode, detail: Value },
    /// No button/counter pair is bound for the post. Buttons whose counter is
    /// missing from the page are never bound, so such a click fails here
    /// before any request is sent, rather than after the server has already
    /// accepted it.
    UnknownPost(PostId),
    InvalidCount { post_id: PostId, text: String },
    CounterUnderflow(PostId),
}

impl ToggleError {
    pub fn rejected(status: StatusCode, detail: Value) -> Self {
        Self::Rejected { status, detail }
    }
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::Rejected { status, detail } => write!(f, "server returned {status}: {detail}"),
            Self::UnknownPost(post_id) => write!(f, "no like control bound for post {post_id}"),
            Self::InvalidCount { post_id, text } => {
                write!(f, "like counter for post {post_id} is not a number: {text:?}")
            }
            Self::CounterUnderflow(post_id) => {
                write!(f, "like counter for post {post_id} is already zero")
            }
        }
    }
}

impl std::error::Error for ToggleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ToggleError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

#[derive(Debug)]
pub enum PageError {
    Io(std::io::Error),
    MissingCsrfToken,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read page: {err}"),
            Self::MissingCsrfToken => f.write_str("page has no csrfmiddlewaretoken field"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::MissingCsrfToken => None,
        }
    }
}

impl From<std::io::Error> for PageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
