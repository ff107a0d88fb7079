use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_LIKE_LABEL: &str = "いいねする";
pub const DEFAULT_UNLIKE_LABEL: &str = "いいねを取り消す";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value sent in the `X-CSRFToken` header. Kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    /// The action a click requests: always the inverse of what is displayed.
    pub fn for_state(is_liked: bool) -> Self {
        if is_liked { Self::Unlike } else { Self::Like }
    }

    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Unlike => "unlike",
        }
    }

    pub fn resulting_state(self) -> bool {
        matches!(self, Self::Like)
    }
}

impl fmt::Display for LikeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub like: String,
    pub unlike: String,
}

impl Labels {
    /// Label shown on a control whose post is (or is not) liked.
    pub fn for_state(&self, is_liked: bool) -> &str {
        if is_liked { &self.unlike } else { &self.like }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            like: DEFAULT_LIKE_LABEL.to_string(),
            unlike: DEFAULT_UNLIKE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleControl {
    pub post_id: PostId,
    pub is_liked: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterDisplay {
    pub post_id: PostId,
    pub text: String,
}

/// Everything the page exposes at load time.
#[derive(Debug, Clone)]
pub struct Page {
    pub csrf_token: CsrfToken,
    pub controls: Vec<ToggleControl>,
    pub counters: Vec<CounterDisplay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub post_id: PostId,
    pub is_liked: bool,
    pub label: String,
    pub count: String,
}
