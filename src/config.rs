use crate::controller::ControllerOptions;
use std::{env, path::PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_PATH: &str = "page.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub page_path: PathBuf,
    pub cookie: Option<String>,
    pub ignore_pending_clicks: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("LIKE_BASE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let page_path = lookup("LIKE_PAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PAGE_PATH));
        let cookie = lookup("LIKE_COOKIE").filter(|value| !value.is_empty());
        let ignore_pending_clicks = lookup("LIKE_IGNORE_PENDING")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            base_url,
            page_path,
            cookie,
            ignore_pending_clicks,
        }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            ignore_pending_clicks: self.ignore_pending_clicks,
        }
    }
}
